//! CLI parse: clap types for siteconf. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Siteconf CLI - site and connection configuration for the portfolio backend
#[derive(Parser)]
#[command(name = "siteconf")]
#[command(about = "Resolve, inspect, and administer site and connection configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Document store directory (overrides storage.store_path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Act with the administrator role
    #[arg(long)]
    pub admin: bool,

    /// Caller id recorded on saves
    #[arg(long)]
    pub actor: Option<String>,

    /// Caller email, recorded on saves when no id is given
    #[arg(long)]
    pub email: Option<String>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Site configuration (public page settings)
    Site {
        #[command(subcommand)]
        command: SiteCommands,
    },
    /// Connection configuration (backing-store credentials)
    Connection {
        #[command(subcommand)]
        command: ConnectionCommands,
    },
}

#[derive(Subcommand)]
pub enum SiteCommands {
    /// Show the resolved site configuration
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Store a partial site configuration from a JSON or TOML file (admin)
    Set {
        /// Partial configuration file
        file: PathBuf,
    },
    /// Show the compiled-in defaults
    Defaults {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum ConnectionCommands {
    /// Show the active connection configuration with metadata (admin)
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the public view of the active connection configuration
    Public {
        /// Output format (text or json)
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Validate and save a connection configuration from a JSON or TOML file (admin)
    Save {
        /// Candidate configuration file
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// List recent history snapshots, newest first (admin)
    History {
        /// Maximum number of entries (default: connection.history_limit)
        #[arg(long)]
        limit: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run save-time checks against a file without writing anything
    Validate {
        /// Candidate configuration file
        file: PathBuf,
    },
    /// Resolve the live connection through the cached handle, bounded by a timeout
    Check {
        /// Fetch timeout in milliseconds (default: connection.fetch_timeout_ms)
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}
