//! Interactive worksheet session.
//!
//! A [`Session`] owns the [`AppState`], applies user [`Command`]s to it and
//! recomputes the whole worksheet after every change.

use rendement_core::{
    DerivationEngine, DerivationResult, Field, ParseFieldError, ParsePeriodError, Period,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DisplayConfig;
use crate::models::RenderedResult;
use crate::state::{AppState, StateError};
use crate::views::{HELP, render_worksheet};

/// Errors that can occur while reading or applying a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error(transparent)]
    Field(#[from] ParseFieldError),

    #[error(transparent)]
    Period(#[from] ParsePeriodError),

    #[error(transparent)]
    State(#[from] StateError),
}

/// One user action on the worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace a field's text; blank text clears it.
    Set { field: Field, text: String },
    Clear(Field),
    SetPeriod { field: Field, period: Period },
    Toggle(Field),
    Reset,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Returns `Ok(None)` for a blank line.
    ///
    /// A line starting with a field name is shorthand for `set`:
    /// `loyer 850` is the same as `set loyer 850`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map(|(h, r)| (h, r.trim()))
            .unwrap_or((line, ""));

        let command = match head.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, text) = rest
                    .split_once(char::is_whitespace)
                    .map(|(f, t)| (f, t.trim()))
                    .unwrap_or((rest, ""));
                Self::Set {
                    field: require(field, "set", "a field")?.parse()?,
                    text: text.to_string(),
                }
            }
            "clear" => Self::Clear(require(rest, "clear", "a field")?.parse()?),
            "period" | "periode" | "période" => {
                let (field, period) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::MissingArgument {
                        command: "period",
                        argument: "a field and a period",
                    })?;
                Self::SetPeriod {
                    field: field.parse()?,
                    period: period.trim().parse()?,
                }
            }
            "toggle" => Self::Toggle(require(rest, "toggle", "a field")?.parse()?),
            "reset" => Self::Reset,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => match Field::parse(other) {
                Some(field) => Self::Set {
                    field,
                    text: rest.to_string(),
                },
                None => return Err(CommandError::UnknownCommand(head.to_string())),
            },
        };

        Ok(Some(command))
    }
}

fn require<'a>(
    arg: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(arg)
    }
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the refreshed worksheet.
    Render(String),
    Help(&'static str),
    Quit,
}

/// A worksheet being edited, with its latest rendering.
#[derive(Debug, Clone)]
pub struct Session {
    state: AppState,
    display: DisplayConfig,
    engine: DerivationEngine,
    result: DerivationResult,
    rendered: RenderedResult,
}

impl Session {
    pub fn new(display: DisplayConfig) -> Self {
        let mut session = Self {
            state: AppState::new(),
            display,
            engine: DerivationEngine::new(),
            result: DerivationResult::default(),
            rendered: RenderedResult::default(),
        };
        session.recompute();
        session
    }

    /// Starts a session from an already populated state.
    pub fn with_state(
        state: AppState,
        display: DisplayConfig,
    ) -> Self {
        let mut session = Self::new(display);
        session.state = state;
        session.recompute();
        session
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn result(&self) -> &DerivationResult {
        &self.result
    }

    pub fn rendered(&self) -> &RenderedResult {
        &self.rendered
    }

    /// Rebuilds the result from scratch from the current snapshot.
    pub fn recompute(&mut self) -> &RenderedResult {
        self.result = self.engine.calculate(&self.state.snapshot());
        self.rendered = RenderedResult::from_result(&self.result, &self.display);
        debug!(result = %self.rendered, "recomputed");
        &self.rendered
    }

    pub fn worksheet(&self) -> String {
        render_worksheet(&self.state, &self.rendered)
    }

    pub fn apply(
        &mut self,
        command: Command,
    ) -> Result<Outcome, CommandError> {
        match command {
            Command::Set { field, text } => self.state.set_input(field, &text),
            Command::Clear(field) => self.state.clear(field),
            Command::SetPeriod { field, period } => {
                self.state.set_period(field, period)?;
            }
            Command::Toggle(field) => {
                self.state.toggle_period(field)?;
            }
            Command::Reset => {
                info!("resetting worksheet");
                self.state.reset();
            }
            Command::Show => {}
            Command::Help => return Ok(Outcome::Help(HELP)),
            Command::Quit => return Ok(Outcome::Quit),
        }

        self.recompute();
        Ok(Outcome::Render(self.worksheet()))
    }

    /// Parses and applies one line. A blank line re-renders the worksheet.
    pub fn handle_line(
        &mut self,
        line: &str,
    ) -> Result<Outcome, CommandError> {
        match Command::parse(line)? {
            Some(command) => self.apply(command),
            None => Ok(Outcome::Render(self.worksheet())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // Command::parse tests
    // =========================================================================

    #[test]
    fn parse_blank_line_is_none() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn parse_set_keeps_the_rest_of_the_line() {
        assert_eq!(
            Command::parse("set achat 216 000"),
            Ok(Some(Command::Set {
                field: Field::Achat,
                text: "216 000".to_string()
            }))
        );
    }

    #[test]
    fn parse_field_shorthand() {
        assert_eq!(
            Command::parse("Loyer 850"),
            Ok(Some(Command::Set {
                field: Field::Loyer,
                text: "850".to_string()
            }))
        );
    }

    #[test]
    fn parse_period() {
        assert_eq!(
            Command::parse("period charges annuel"),
            Ok(Some(Command::SetPeriod {
                field: Field::Charges,
                period: Period::Annual
            }))
        );
    }

    #[test]
    fn parse_period_without_arguments_fails() {
        assert_eq!(
            Command::parse("period loyer"),
            Err(CommandError::MissingArgument {
                command: "period",
                argument: "a field and a period"
            })
        );
    }

    #[test]
    fn parse_unknown_period_fails() {
        assert_eq!(
            Command::parse("period loyer hebdo"),
            Err(CommandError::Period(ParsePeriodError("hebdo".to_string())))
        );
    }

    #[test]
    fn parse_unknown_command_fails() {
        assert_eq!(
            Command::parse("compute"),
            Err(CommandError::UnknownCommand("compute".to_string()))
        );
    }

    #[test]
    fn parse_clear_requires_a_field() {
        assert!(matches!(
            Command::parse("clear"),
            Err(CommandError::MissingArgument { command: "clear", .. })
        ));
    }

    // =========================================================================
    // Session tests
    // =========================================================================

    #[test]
    fn every_edit_recomputes() {
        let mut session = Session::new(DisplayConfig::default());

        session.handle_line("achat 200000").unwrap();
        session.handle_line("loyer 1000").unwrap();
        assert_eq!(session.result().rendement_percent, None);

        session.handle_line("charges 2000").unwrap();
        session.handle_line("period charges annuel").unwrap();

        // 2000 monthly became 24000 annual: (12000 - 24000) / 200000
        assert_eq!(session.result().rendement_percent, Some(dec!(-6)));
        assert_eq!(session.rendered().rendement, "-6,0 %");
    }

    #[test]
    fn toggle_on_price_is_rejected_and_state_unchanged() {
        let mut session = Session::new(DisplayConfig::default());
        session.handle_line("achat 100").unwrap();

        let err = session.handle_line("toggle achat").unwrap_err();

        assert_eq!(err, CommandError::State(StateError::NoPeriod(Field::Achat)));
        assert_eq!(session.state().fields().achat.raw_value, Some(dec!(100)));
    }

    #[test]
    fn reset_returns_to_blank_worksheet() {
        let mut session = Session::new(DisplayConfig::default());
        session.handle_line("loyer 1000").unwrap();
        session.handle_line("toggle loyer").unwrap();

        session.handle_line("reset").unwrap();

        assert_eq!(session.state(), &AppState::new());
        assert_eq!(session.result(), &DerivationResult::default());
    }

    #[test]
    fn help_and_quit_do_not_render() {
        let mut session = Session::new(DisplayConfig::default());

        assert_eq!(session.handle_line("help"), Ok(Outcome::Help(HELP)));
        assert_eq!(session.handle_line("quit"), Ok(Outcome::Quit));
    }

    #[test]
    fn blank_line_renders_current_worksheet() {
        let mut session = Session::new(DisplayConfig::default());

        let outcome = session.handle_line("").unwrap();

        assert_eq!(outcome, Outcome::Render(session.worksheet()));
    }
}
