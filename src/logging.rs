//! Stderr logging for the binaries, filtered through `BATTLESHIP_LOG`.

use std::env;
use std::io::{self, Write};

use chrono::{SecondsFormat, Utc};
use log::{LevelFilter, Log, Metadata, Record};

use crate::config::LOG_ENV_VAR;

/// Writes `<utc timestamp> <level> <target>: <message>` lines to stderr so
/// that stdout stays free for machine-readable output.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut out = io::stderr().lock();
        let _ = writeln!(
            out,
            "{} {:<5} {}: {}",
            stamp,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Level named by `value` (`off`, `error` through `trace`, any case).
/// Falls back to `info` when the value is absent or not a level name.
pub fn log_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger at the level read from `BATTLESHIP_LOG`.
/// Later calls keep the first logger and leave the level unchanged.
pub fn init_logging() {
    let level = log_level(env::var(LOG_ENV_VAR).ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
