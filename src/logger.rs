//! Debug logging for the library and the CLI
//!
//! `log` records and `tracing` events end up in the same optional log file.
//! Nothing is written until [`enable_logging`] is called and a sink is set.

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::{LazyLock, OnceLock};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
};

/// Targets muted unless verbose logging is on
const NOISY_TARGETS: &[&str] = &["reqwest", "hyper", "h2", "rustls", "want", "mio"];

const DEFAULT_FILTER: &str = "wayfarer=debug,warn";

#[derive(Default)]
struct LogSinks {
    enabled: bool,
    verbose: bool,
    to_stdout: bool,
    file: Option<File>,
}

static SINKS: LazyLock<Mutex<LogSinks>> = LazyLock::new(|| Mutex::new(LogSinks::default()));

fn append_to_file(bytes: &[u8]) {
    if let Some(file) = SINKS.lock().file.as_mut() {
        let _ = file.write_all(bytes);
        let _ = file.flush();
    }
}

fn is_noisy(target: &str) -> bool {
    NOISY_TARGETS.iter().any(|noisy| target.starts_with(noisy))
}

fn format_line(level: Level, target: &str, message: &std::fmt::Arguments<'_>) -> String {
    format!(
        "{} {level} [{target}] - {message}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
    )
}

/// `tracing` writer targeting the log file
#[derive(Clone, Copy)]
struct FileWriter;

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        append_to_file(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> fmt::MakeWriter<'a> for FileWriter {
    type Writer = FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        *self
    }
}

struct WayfarerLogger;

static LOGGER: WayfarerLogger = WayfarerLogger;

impl log::Log for WayfarerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let sinks = SINKS.lock();
        if !sinks.enabled || metadata.level() > Level::Debug {
            return false;
        }
        let target = metadata.target();
        target.starts_with("wayfarer") || sinks.verbose || !is_noisy(target)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record.level(), record.target(), record.args());
        append_to_file(line.as_bytes());
        if SINKS.lock().to_stdout {
            print!("{line}");
        }
    }

    fn flush(&self) {}
}

/// Install the `log` logger and the `tracing` subscriber; later calls return the first outcome
///
/// `WAYFARER_VERBOSE`, or a debug/trace `RUST_LOG`, lets HTTP client logs through.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    let outcome = INIT.get_or_init(|| {
        let verbose = std::env::var_os("WAYFARER_VERBOSE").is_some()
            || std::env::var("RUST_LOG").is_ok_and(|v| v.contains("debug") || v.contains("trace"));
        set_verbose_logging(verbose);

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let fmt_layer = fmt::Layer::new()
            .with_target(true)
            .with_timer(fmt::time::ChronoUtc::rfc_3339())
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .with_writer(FileWriter);

        // `log` records go through WayfarerLogger, not a tracing bridge
        log::set_logger(&LOGGER)
            .map(|()| log::set_max_level(LevelFilter::Debug))
            .map_err(|e| format!("log facade: {e}"))?;
        tracing::subscriber::set_global_default(Registry::default().with(env_filter).with(fmt_layer))
            .map_err(|e| format!("tracing subscriber: {e}"))
    });

    outcome.clone().map_err(Into::into)
}

pub fn enable_logging() {
    SINKS.lock().enabled = true;
}

pub fn disable_logging() {
    SINKS.lock().enabled = false;
}

pub fn set_verbose_logging(enabled: bool) {
    SINKS.lock().verbose = enabled;
}

/// Append log lines to `file_path`, creating it if needed
pub fn set_log_file(file_path: &str) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    SINKS.lock().file = Some(file);
    Ok(())
}

pub fn set_log_to_stdout(enabled: bool) {
    SINKS.lock().to_stdout = enabled;
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}
