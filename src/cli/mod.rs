//! CLI interface for storeintel

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "storeintel")]
#[command(version)]
#[command(about = "Store Intelligence demo dashboard: session service and client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default storeintel.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Sign in and persist the session
    Login {
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Account password (prompted when omitted)
        #[arg(short, long, env = "STOREINTEL_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Fall back to offline mode if the server cannot be reached
        #[arg(long)]
        offline: bool,
    },

    /// Sign out and clear the persisted session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the dashboard for the signed-in user
    Dashboard,

    /// Hash a password for a [[auth.users]] entry
    HashPassword {
        /// bcrypt cost
        #[arg(long, default_value_t = bcrypt::DEFAULT_COST)]
        cost: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
