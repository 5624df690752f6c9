use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pushfeed")]
#[command(about = "Check feeds for new items and send Pushover notifications")]
#[command(version)]
pub struct Cli {
    /// Path to the checkpoint file (overrides FEED_DATA, default feeds.json)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fetch all feeds and notify new items (default)
    Run {
        /// Dry run - don't send notifications or save checkpoints, just show what would be sent
        #[arg(long)]
        dry_run: bool,
    },

    /// List tracked feeds and their last seen times
    List,

    /// Start tracking a feed
    Add {
        /// Name used in notification text
        name: String,

        /// Feed URL
        url: String,

        /// Only notify items published after this RFC 3339 time (defaults to now)
        #[arg(long)]
        since: Option<String>,
    },
}
