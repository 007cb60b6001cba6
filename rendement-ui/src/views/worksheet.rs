use rendement_core::Field;

use crate::models::RenderedResult;
use crate::state::AppState;

const LABEL_WIDTH: usize = 22;
const COLUMN_WIDTH: usize = 28;

fn row_label(
    state: &AppState,
    field: Field,
) -> String {
    match field {
        Field::Achat => field.label().to_string(),
        Field::Loyer | Field::Charges => format!("{} ({})", field.label(), state.period(field)),
        Field::Rendement => format!("{} (%)", field.label()),
    }
}

fn push_row(
    out: &mut String,
    label: &str,
    data: &str,
    calc: &str,
) {
    let line = format!("{label:<LABEL_WIDTH$}{data:<COLUMN_WIDTH$}{calc}");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Renders the full worksheet: what was typed on the left, what was derived
/// on the right, with the period restatements under rent and charges.
pub fn render_worksheet(
    state: &AppState,
    rendered: &RenderedResult,
) -> String {
    let mut out = String::new();
    push_row(&mut out, "", "Données", "Calcul");

    for field in Field::ALL {
        push_row(
            &mut out,
            &row_label(state, field),
            state.text(field),
            rendered.derived(field),
        );
        if field.has_period() {
            let input_eq = rendered.input_equivalence(field);
            let derived_eq = rendered.derived_equivalence(field);
            if !input_eq.is_empty() || !derived_eq.is_empty() {
                push_row(&mut out, "", input_eq, derived_eq);
            }
        }
    }

    out.push('\n');
    push_row(&mut out, "Loyer annuel", "", &rendered.loyer_annual);
    push_row(&mut out, "Charges annuelles", "", &rendered.charges_annual);
    out
}

/// One-line summary used by batch output.
pub fn render_summary_line(
    index: usize,
    rendered: &RenderedResult,
) -> String {
    format!(
        "#{index}: achat {} | loyer {} ({}) | charges {} ({}) | rendement {}",
        rendered.achat,
        rendered.loyer,
        rendered.loyer_annual,
        rendered.charges,
        rendered.charges_annual,
        rendered.rendement
    )
}
