//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tabshare - Split group expenses from receipt photos
#[derive(Parser)]
#[command(name = "tabshare")]
#[command(about = "Receipt reconciliation and group scheduling", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile a saved vision model response into a billable breakdown
    Reconcile {
        /// File containing the raw model completion text
        #[arg(short, long)]
        file: PathBuf,

        /// Print the full analysis as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Find hours where every member is free
    Availability {
        /// JSON file with {"members": [...], "events": [...]}
        #[arg(short, long)]
        file: PathBuf,

        /// Print the full resolver output as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Send a receipt image to the vision backend and reconcile the result
    Analyze {
        /// Receipt image file
        #[arg(short, long)]
        file: PathBuf,

        /// Override the configured vision model
        #[arg(short, long)]
        model: Option<String>,

        /// Print the full analysis as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Inspect the prompt library
    Prompts {
        #[command(subcommand)]
        action: Option<PromptsAction>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires an API key from TABSHARE_API_KEYS.
        #[arg(long)]
        no_auth: bool,
    },
}

#[derive(Subcommand)]
pub enum PromptsAction {
    /// List all prompts and their override status
    List,

    /// Show a prompt's metadata and content
    Show {
        /// Prompt ID (e.g. extract_receipt)
        prompt_id: String,
    },

    /// Show where prompt overrides should be placed
    Path,
}
