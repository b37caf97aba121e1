//! drawat - shared canvas sync from the command line
//!
//! Every command prints one JSON document on stdout; logs go to stderr or
//! to the configured log file.
//!
//! # Examples
//!
//! ```bash
//! # Sign in (open the printed URL, then pass the redirect parameters back)
//! drawat login --handle alice.bsky.social
//! drawat callback --code <code> --state <state> --iss https://bsky.social
//!
//! # Fetch the shared canvas
//! drawat pull --strokes --pretty
//!
//! # Keep the canvas in sync until Ctrl+C
//! drawat watch --interval-secs 10
//! ```

use drawat_cli::logger::{self, LogSink};
use drawat_cli::{App, Cli, CliError, CliResult, Commands};
use drawat_config::Config;
use drawat_core::SystemClock;
use drawat_sync::ShutdownCoordinator;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use serde_json::Value;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> CliResult<Value> {
    let _ = dotenvy::dotenv();

    let config = Config::load()?;
    config.validate()?;
    let config_dir = Config::config_dir()?;

    let log_file_path: Option<PathBuf> = match config.logging.file {
        Some(ref filename) => {
            let log_dir = config_dir.join(&config.logging.dir);
            std::fs::create_dir_all(&log_dir).map_err(|e| CliError::Io {
                path: log_dir.clone(),
                source: e,
            })?;
            Some(log_dir.join(filename))
        }
        None => None,
    };

    logger::initialize(
        config.logging.level,
        LogSink::new(log_file_path, config.logging.colored),
    )?;

    info!("Starting drawat v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let app = App::new(config, &config_dir, Arc::new(SystemClock))?;

    let shutdown = ShutdownCoordinator::new();
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), stopping");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    app.run(command, Some(shutdown.subscribe())).await
}
