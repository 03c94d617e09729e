//! File-backed logger.
//!
//! Stdout carries the JSON-RPC protocol stream, so log output must never
//! touch it. Everything routed through the `log` facade is appended to
//! `paneldeck.log` in the system temp directory instead.
//!
//! The level comes from the `PANELDECK_LOG` environment variable
//! (`error`, `warn`, `info`, `debug`, `trace`); unset or unrecognized
//! values mean `info`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Metadata, Record};
use parking_lot::Mutex;

/// Environment variable controlling the log level.
pub const LOG_LEVEL_ENV: &str = "PANELDECK_LOG";

/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV: &str = "PANELDECK_LOG_FILE";

/// Default log file name, relative to the system temp directory.
pub const LOG_FILENAME: &str = "paneldeck.log";

pub fn log_path() -> PathBuf {
    match std::env::var(LOG_FILE_ENV) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => std::env::temp_dir().join(LOG_FILENAME),
    }
}

fn level_from_env() -> LevelFilter {
    match std::env::var(LOG_LEVEL_ENV).as_deref() {
        Ok("error") => LevelFilter::Error,
        Ok("warn") => LevelFilter::Warn,
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        Ok("off") => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

struct FileLogger {
    file: Mutex<File>,
}

impl log::Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| format!("{}.{:06}", d.as_secs(), d.subsec_micros()))
            .unwrap_or_default();
        let mut file = self.file.lock();
        let _ = writeln!(
            file,
            "[{timestamp}] [{:5}] [{}] {}",
            record.level(),
            record.target(),
            record.args()
        );
        let _ = file.flush();
    }

    fn flush(&self) {
        let _ = self.file.lock().flush();
    }
}

/// Install the file logger. Failure to open the log file is not fatal;
/// the process simply runs without logging.
pub fn init() {
    let Ok(file) = OpenOptions::new().create(true).append(true).open(log_path()) else {
        return;
    };
    let logger = FileLogger {
        file: Mutex::new(file),
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level_from_env());
    }
}
