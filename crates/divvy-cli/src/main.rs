//! Divvy CLI - Split shared purchases between people
//!
//! Usage:
//!   divvy validate --items items.json [--splits splits.json]
//!   divvy split --items items.json --splits splits.json
//!   divvy demo                  Run the pipeline on the built-in receipt
//!   divvy serve --port 8080     Start web server

mod cli;
mod commands;


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
        Commands::Validate { items, splits } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_validate(&items, splits.as_deref(), &config)
        }
        Commands::Split {
            items,
            splits,
            json,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_split(&items, &splits, json, &config)
        }
        Commands::Demo { json } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_demo(json, &config).await
        }
        Commands::Serve {
            port,
            host,
            mock_backend,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_serve(&host, port, mock_backend, config).await
        }
        Commands::Prompts { action } => match action {
            None | Some(PromptsAction::List) => commands::cmd_prompts_list(),
            Some(PromptsAction::Show { prompt_id }) => commands::cmd_prompts_show(&prompt_id),
            Some(PromptsAction::Path) => commands::cmd_prompts_path(),
        },
    }
}
