use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use rendement_core::{DerivationResult, FieldState, FieldStates, Period, derive};
use rendement_ui::models::RenderedResult;
use rendement_ui::utils::parse_decimal;
use rendement_ui::views::render_summary_line;
use rendement_ui::{AppConfig, AppState, DisplayConfig, Outcome, Session, csv_loader, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Rental yield calculator.
///
/// Enter any three of purchase price, rent, charges and yield to derive the
/// fourth. Rent and charges can be given monthly or annually.
#[derive(Debug, Parser)]
#[command(name = "rendement-loc", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (e.g. `debug`); overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append logs to this file; overrides the config file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Hide log output on the console.
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Derive once from the given values and print the worksheet.
    Calc(CalcArgs),
    /// Edit the worksheet interactively (default).
    Repl,
    /// Derive every scenario of a CSV file.
    Batch {
        /// CSV file with columns achat, loyer, loyer_period, charges,
        /// charges_period, rendement.
        file: PathBuf,

        /// Print JSON instead of one summary line per row.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct CalcArgs {
    /// Purchase price.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    achat: Option<Decimal>,

    /// Rent, in `--loyer-period`.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    loyer: Option<Decimal>,

    #[arg(long, default_value = "mensuel")]
    loyer_period: Period,

    /// Charges, in `--charges-period`.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    charges: Option<Decimal>,

    #[arg(long, default_value = "mensuel")]
    charges_period: Period,

    /// Yield in percent.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    rendement: Option<Decimal>,

    /// Print JSON instead of the worksheet.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl CalcArgs {
    fn to_fields(&self) -> FieldStates {
        FieldStates {
            achat: FieldState::new(self.achat),
            loyer: FieldState::with_period(self.loyer, self.loyer_period),
            charges: FieldState::with_period(self.charges, self.charges_period),
            rendement: FieldState::new(self.rendement),
        }
    }
}

// ─── output ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    fields: &'a FieldStates,
    result: &'a DerivationResult,
    rendered: &'a RenderedResult,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialise JSON output")?;
    println!("{text}");
    Ok(())
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_calc(
    args: &CalcArgs,
    display: DisplayConfig,
) -> Result<()> {
    let session = Session::with_state(AppState::from_fields(args.to_fields()), display);

    if args.json {
        print_json(&JsonReport {
            fields: session.state().fields(),
            result: session.result(),
            rendered: session.rendered(),
        })
    } else {
        print!("{}", session.worksheet());
        Ok(())
    }
}

fn run_repl(display: DisplayConfig) -> Result<()> {
    let mut session = Session::new(display);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("RendementLoc - simulateur de rendement locatif (tapez 'help')");
    print!("{}", session.worksheet());

    loop {
        print!("> ");
        stdout.flush().context("failed to flush stdout")?;

        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read stdin")?
            == 0
        {
            debug!("end of input");
            break;
        }

        match session.handle_line(&line) {
            Ok(Outcome::Render(worksheet)) => print!("{worksheet}"),
            Ok(Outcome::Help(help)) => print!("{help}"),
            Ok(Outcome::Quit) => break,
            Err(error) => {
                warn!(%error, input = line.trim(), "command rejected");
                eprintln!("erreur : {error}");
            }
        }
    }

    Ok(())
}

fn run_batch(
    file: &Path,
    json: bool,
    display: &DisplayConfig,
) -> Result<()> {
    let scenarios = csv_loader::load_from_file(file)
        .with_context(|| format!("failed to load scenarios from {}", file.display()))?;
    info!(rows = scenarios.len(), "deriving scenarios");

    let results: Vec<(FieldStates, DerivationResult, RenderedResult)> = scenarios
        .into_iter()
        .map(|fields| {
            let result = derive(&fields);
            let rendered = RenderedResult::from_result(&result, display);
            (fields, result, rendered)
        })
        .collect();

    if json {
        let reports: Vec<JsonReport<'_>> = results
            .iter()
            .map(|(fields, result, rendered)| JsonReport {
                fields,
                result,
                rendered,
            })
            .collect();
        return print_json(&reports);
    }

    for (idx, (_, _, rendered)) in results.iter().enumerate() {
        println!("{}", render_summary_line(idx + 1, rendered));
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();

    logging::set_console_enabled(!cli.quiet);

    let mut config = AppConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    if cli.log_level.is_some() {
        config.logging.level = cli.log_level;
    }
    if cli.log_file.is_some() {
        config.logging.file = cli.log_file;
    }
    logging::configure(&config.logging)?;

    debug!(?config, "configuration ready");
    let display = config.display;

    match cli.command.unwrap_or(CliCommand::Repl) {
        CliCommand::Calc(args) => run_calc(&args, display),
        CliCommand::Repl => run_repl(display),
        CliCommand::Batch { file, json } => run_batch(&file, json, &display),
    }
}
