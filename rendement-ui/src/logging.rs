//! Logging for the worksheet front end.
//!
//! Records go to stderr, so stdout carries only worksheet and JSON output,
//! and optionally to a log file opened once the configuration is known.
//! The level filter can be replaced at any time.

use std::fmt;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, filter, reload};

use crate::config::LoggingConfig;

const DEFAULT_FILTER: &str = "info";

static LEVEL_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();
static CONSOLE_ENABLED: AtomicBool = AtomicBool::new(true);
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

// --- Event format ---

/// `14:02:11.532  INFO rendement_ui::app: message key=value`
struct RecordFormat;

impl RecordFormat {
    fn level_color(level: Level) -> &'static str {
        match level {
            Level::ERROR => "\x1b[31m",
            Level::WARN => "\x1b[33m",
            Level::INFO => "\x1b[32m",
            Level::DEBUG => "\x1b[34m",
            Level::TRACE => "\x1b[35m",
        }
    }
}

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let time = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            let color = Self::level_color(*meta.level());
            write!(writer, "\x1b[2m{time}\x1b[0m {color}{:>5}\x1b[0m ", meta.level())?;
        } else {
            write!(writer, "{time} {:>5} ", meta.level())?;
        }
        write!(writer, "{}: ", meta.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Log file sink ---

fn log_file() -> MutexGuard<'static, Option<File>> {
    LOG_FILE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes to the log file when one is open, otherwise drops the record.
struct LogFileWriter;

struct LogFileGuard(MutexGuard<'static, Option<File>>);

impl Write for LogFileGuard {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), File::flush)
    }
}

impl<'a> MakeWriter<'a> for LogFileWriter {
    type Writer = LogFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileGuard(log_file())
    }
}

// --- Public API ---

/// Installs the global subscriber. Later calls are no-ops.
///
/// The filter comes from `RUST_LOG`, or `info` when it is unset or invalid.
pub fn init_default_logging() {
    let initial = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (level_filter, level_handle) = reload::Layer::new(initial);

    let console = tracing_subscriber::fmt::layer()
        .event_format(RecordFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(filter::filter_fn(|_| CONSOLE_ENABLED.load(Ordering::Relaxed)));

    let file = tracing_subscriber::fmt::layer()
        .event_format(RecordFormat)
        .with_ansi(false)
        .with_writer(LogFileWriter);

    let installed = tracing_subscriber::registry()
        .with(level_filter)
        .with(console)
        .with(file)
        .try_init()
        .is_ok();

    if installed {
        let _ = LEVEL_HANDLE.set(level_handle);
    }
}

/// Replaces the level filter. Takes a bare level (`debug`) or any
/// `EnvFilter` directive (`rendement_core=trace,info`).
pub fn set_log_level(directive: &str) -> Result<()> {
    let handle = LEVEL_HANDLE
        .get()
        .ok_or_else(|| anyhow!("logging is not initialized"))?;
    let filter =
        EnvFilter::try_new(directive).with_context(|| format!("invalid log level '{directive}'"))?;
    handle.reload(filter).context("cannot reload log filter")
}

/// Mutes or unmutes the console. The log file is not affected.
pub fn set_console_enabled(enabled: bool) {
    CONSOLE_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Appends log records to `path`, replacing any file opened before.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    *log_file() = Some(file);
    Ok(())
}

/// Applies the `[logging]` section of the configuration.
pub fn configure(config: &LoggingConfig) -> Result<()> {
    if let Some(level) = config.level.as_deref() {
        set_log_level(level)?;
    }
    if let Some(path) = config.file.as_deref() {
        enable_file_logging(path)?;
    }
    Ok(())
}
