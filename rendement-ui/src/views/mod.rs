//! Text views for the terminal front end.
//!
//! - `worksheet` - the two-column data/calculation table
//! - `help` - command summary for the interactive session

mod help;
mod worksheet;

pub use help::HELP;
pub use worksheet::{render_summary_line, render_worksheet};
