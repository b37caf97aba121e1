use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "drawat")]
#[command(about = "Sync shared canvas records between your repository and the drawat directory")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
