use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start an OAuth login and print the authorization URL
    Login {
        /// Handle to sign in as (e.g. alice.bsky.social)
        #[arg(long)]
        handle: String,

        /// OAuth provider / handle resolver (defaults to oauth.provider)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Complete a login with the parameters of the redirect
    Callback {
        #[arg(long)]
        code: String,

        #[arg(long)]
        state: String,

        #[arg(long)]
        iss: Option<String>,
    },

    /// Delete your record, revoke the token and forget the session
    Logout,

    /// Show the session and store configuration
    Status,

    /// Fetch every retained record
    Pull {
        /// Print a per-stroke summary instead of raw records
        #[arg(long)]
        strokes: bool,
    },

    /// Replace your record with the points in a JSON file
    Push {
        /// File holding an array of points
        #[arg(long)]
        file: PathBuf,
    },

    /// Pull (and push local changes) periodically until Ctrl+C
    Watch {
        /// Seconds between pulls (defaults to sync.poll_interval_secs)
        #[arg(long)]
        interval_secs: Option<u64>,
    },

    /// Print the OAuth client metadata document for this deployment
    ClientMetadata,
}
