//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Divvy - Split shared purchases between people
#[derive(Parser)]
#[command(name = "divvy")]
#[command(about = "Validate and split itemized bills between people", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Split config file (TOML)
    ///
    /// Defaults to ~/.local/share/divvy/config/split.toml when present,
    /// otherwise the built-in tolerances.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check line items (and item splits, if given) without allocating
    Validate {
        /// JSON file with the extracted line items
        #[arg(short, long)]
        items: PathBuf,

        /// JSON file with the per-item splits
        #[arg(short, long)]
        splits: Option<PathBuf>,
    },

    /// Validate a bill and print what each person owes
    Split {
        /// JSON file with the extracted line items
        #[arg(short, long)]
        items: PathBuf,

        /// JSON file with the per-item splits
        #[arg(short, long)]
        splits: PathBuf,

        /// Print allocations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the receipt pipeline against the built-in demo receipt
    Demo {
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Answer /api/process with the scripted demo backend
        #[arg(long)]
        mock_backend: bool,
    },

    /// Inspect prompt templates
    Prompts {
        #[command(subcommand)]
        action: Option<PromptsAction>,
    },
}

#[derive(Subcommand)]
pub enum PromptsAction {
    /// List prompts and their override status
    List,

    /// Show the active content of a prompt
    Show {
        /// Prompt ID (e.g. interpret_split_rules)
        prompt_id: String,
    },

    /// Print the prompt override directory
    Path,
}
