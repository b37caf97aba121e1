//! drawat CLI library
//!
//! Exposes the command runner so integration tests can drive it without a
//! terminal.

pub mod app;
pub mod cli;
pub mod commands;
pub(crate) mod error;
pub mod logger;


pub use app::App;
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
