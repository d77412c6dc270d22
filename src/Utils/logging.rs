use crate::Utils::config::ConfigError;
use chrono::Local;
use log::{LevelFilter, debug, info};
use simplelog::*;
use std::fs::File;
use std::path::PathBuf;

/// "debug" | "info" | "warn" | "error" (case insensitive)
pub fn parse_loglevel(level: &str) -> Result<LevelFilter, ConfigError> {
    match level.trim().to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        other => Err(ConfigError::Invalid(format!(
            "loglevel must be debug, info, warn or error, got '{}'",
            other
        ))),
    }
}

pub fn log_file_name() -> PathBuf {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    PathBuf::from(format!("log_{}.txt", date_and_time))
}

/// Terminal logger on stderr, stdout is left to the result table.
/// With `log_to_file` the same records also go to `log_<timestamp>.txt`.
/// A logger installed earlier in the process is kept; returns whether this call
/// installed one.
pub fn init_logging(level: LevelFilter, log_to_file: bool) -> Result<bool, ConfigError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if log_to_file {
        let path = log_file_name();
        let file = File::create(&path).map_err(|source| ConfigError::Io { path, source })?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    let logger_instance = CombinedLogger::init(loggers);
    match logger_instance {
        Ok(()) => {
            info!("logging started with loglevel {}", level);
            Ok(true)
        }
        Err(e) => {
            debug!("keeping the logger installed earlier: {}", e);
            Ok(false)
        }
    }
}
