//! Tabshare CLI - Group expense splitting from receipt photos
//!
//! Usage:
//!   tabshare reconcile --file resp.txt     Reconcile a saved model response
//!   tabshare availability --file in.json   Find common free hours
//!   tabshare analyze --file receipt.jpg    Vision extraction + reconciliation
//!   tabshare serve --port 3000             Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Reconcile { file, json } => commands::cmd_reconcile(&file, json),
        Commands::Availability { file, json } => commands::cmd_availability(&file, json),
        Commands::Analyze { file, model, json } => {
            commands::cmd_analyze(&file, model.as_deref(), json).await
        }
        Commands::Prompts { action } => match action {
            None | Some(PromptsAction::List) => commands::cmd_prompts_list(),
            Some(PromptsAction::Show { prompt_id }) => commands::cmd_prompts_show(&prompt_id),
            Some(PromptsAction::Path) => commands::cmd_prompts_path(),
        },
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(&host, port, no_auth).await,
    }
}
