//! End-to-end worksheet sessions driven through text commands.

use pretty_assertions::assert_eq;
use rendement_core::{Field, Period};
use rendement_ui::{CommandError, DisplayConfig, Outcome, Session, StateError};
use rust_decimal_macros::dec;

fn session() -> Session {
    Session::new(DisplayConfig::default())
}

fn run(
    session: &mut Session,
    lines: &[&str],
) {
    for line in lines {
        session
            .handle_line(line)
            .unwrap_or_else(|e| panic!("'{line}' failed: {e}"));
    }
}

#[test]
fn three_inputs_derive_the_fourth() {
    let mut s = session();

    run(&mut s, &["loyer 1000", "charges 100", "rendement 5"]);

    assert_eq!(s.result().achat, Some(dec!(216000)));
    assert_eq!(s.rendered().achat, "216\u{202f}000\u{a0}€");
    assert_eq!(s.rendered().rendement, "--");
}

#[test]
fn toggling_rent_keeps_the_derived_price() {
    let mut s = session();
    run(&mut s, &["loyer 1000", "charges 100", "rendement 5"]);

    run(&mut s, &["period loyer annuel"]);

    assert_eq!(s.state().period(Field::Loyer), Period::Annual);
    assert_eq!(s.state().fields().loyer.raw_value, Some(dec!(12000)));
    assert_eq!(s.result().achat, Some(dec!(216000)));
    assert_eq!(
        s.rendered().input_equivalence_loyer,
        "soit 1\u{202f}000\u{a0}€/mois"
    );
}

#[test]
fn malformed_text_behaves_like_a_blank_field() {
    let mut s = session();
    run(&mut s, &["loyer 1000", "charges 100", "rendement cinq"]);

    assert_eq!(s.result().achat, None);
    assert_eq!(s.rendered().achat, "--");
}

#[test]
fn zero_yield_leaves_price_unavailable() {
    let mut s = session();

    run(&mut s, &["loyer 1000", "charges 100", "rendement 0"]);

    assert_eq!(s.result().achat, None);
}

#[test]
fn rejected_command_leaves_worksheet_untouched() {
    let mut s = session();
    run(&mut s, &["achat 200000"]);
    let before = s.worksheet();

    let err = s.handle_line("period rendement annuel").unwrap_err();

    assert_eq!(err, CommandError::State(StateError::NoPeriod(Field::Rendement)));
    assert_eq!(s.worksheet(), before);
}

#[test]
fn reset_after_edits_shows_blank_worksheet() {
    let blank = session().worksheet();
    let mut s = session();
    run(&mut s, &["achat 1", "loyer 2", "toggle charges", "charges 3"]);

    let outcome = s.handle_line("reset").unwrap();

    assert_eq!(outcome, Outcome::Render(blank));
}
