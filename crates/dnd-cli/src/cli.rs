//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dnd_core::RestrictionKind;

/// dnd (do not disturb) - block applications and websites
///
/// Restrictions are added to and removed from a configuration first and only
/// take effect once `dnd commit` is run (usually with sudo).
#[derive(Parser, Debug)]
#[command(name = "dnd")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hosts file to manage instead of the system one
    #[arg(long, global = true, env = "DND_HOSTS_FILE", hide = true)]
    pub hosts_file: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add restrictions to the configuration
    ///
    /// Examples:
    ///   dnd add domain www.youtube.com,www.reddit.com
    ///   dnd add application spotify
    Add {
        /// Restriction kind (see `dnd types`)
        kind: RestrictionKind,

        /// Comma separated items
        items: String,

        /// Use application patterns as given, without searching for installed apps
        #[arg(long)]
        exact: bool,
    },

    /// Remove a restriction from the configuration
    Del {
        /// Restriction kind (see `dnd types`)
        kind: RestrictionKind,

        /// Item to remove (every occurrence)
        item: String,
    },

    /// Print the configured restrictions
    Print {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the available restriction kinds
    Types,

    /// Show what commit would change
    Diff,

    /// Apply the configured restrictions to the system
    Commit {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Search installed applications matching a pattern
    Search {
        /// Loose application name
        pattern: String,
    },
}
