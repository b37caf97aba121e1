use crate::{CliError, CliResult};

use drawat_config::LogLevel;

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

/// Where log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// stderr, optionally with colored levels; stdout is kept for command output
    Console { colored: bool },
    /// Appended to a file; lines carry the log target
    File(PathBuf),
}

impl LogSink {
    pub fn new(log_file: Option<PathBuf>, colored: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path),
            None => Self::Console { colored },
        }
    }
}

fn timestamp() -> humantime::Rfc3339Timestamp {
    humantime::format_rfc3339(SystemTime::now())
}

fn sink_dispatch(sink: &LogSink) -> CliResult<Dispatch> {
    let dispatch = match sink {
        LogSink::File(path) => {
            let file = fern::log_file(path).map_err(|e| CliError::Io {
                path: path.clone(),
                source: e,
            })?;
            Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{} - {}] {} [{}]",
                        timestamp(),
                        record.level(),
                        message,
                        record.target()
                    ))
                })
                .chain(file)
        }
        LogSink::Console { colored: true } => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);
            Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{} - {}] {}",
                        timestamp(),
                        colors.color(record.level()),
                        message
                    ))
                })
                .chain(std::io::stderr())
        }
        LogSink::Console { colored: false } => Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} - {}] {}",
                    timestamp(),
                    record.level(),
                    message
                ))
            })
            .chain(std::io::stderr()),
    };
    Ok(dispatch)
}

/// Install the global logger. Call once, before anything logs.
pub fn initialize(log_level: LogLevel, sink: LogSink) -> CliResult<()> {
    Dispatch::new()
        .level(log_level.0)
        .chain(sink_dispatch(&sink)?)
        .apply()
        .map_err(|e| CliError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match sink {
        LogSink::File(ref path) => info!("Logging at {} to {}", *log_level, path.display()),
        LogSink::Console { .. } => info!("Logging at {} to stderr", *log_level),
    }

    tracing_log::LogTracer::init().ok();

    Ok(())
}
