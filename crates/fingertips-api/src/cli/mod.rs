//! CLI command definitions for the `fingertips` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chat with a hosted model, keeping per-user history.
#[derive(Parser)]
#[command(name = "fingertips", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log errors only. Command output is still printed.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Path to the optional settings file.
    #[arg(long, global = true, default_value = "fingertips.toml", env = "FINGERTIPS_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (overrides the settings file).
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to (overrides the settings file).
        #[arg(long)]
        host: Option<String>,
    },

    /// Send one message and print the reply.
    Chat {
        /// User whose history the message joins.
        #[arg(long, short)]
        user: String,

        /// Message text.
        message: String,
    },

    /// Run the demonstration turn (example_user: "Hello, how are you?").
    Flow,

    /// Print a user's stored history.
    History {
        /// User whose history to show.
        #[arg(long, short)]
        user: String,
    },

    /// Show the resolved configuration.
    Config,
}
