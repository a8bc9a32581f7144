//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `bills` - Bill commands (validate, split) and shared file loading
//! - `demo` - Receipt pipeline against the scripted demo backend
//! - `prompts` - Prompt template inspection
//! - `serve` - Web server command

pub mod bills;
pub mod demo;
pub mod prompts;
pub mod serve;

// Re-export command functions for main.rs
pub use bills::*;
pub use demo::*;
pub use prompts::*;
pub use serve::*;

use std::path::Path;

use anyhow::{Context, Result};
use divvy_core::{PersonAllocation, SplitConfig};

/// Load split config from `--config`, the data dir override, or defaults
pub fn load_config(path: Option<&Path>) -> Result<SplitConfig> {
    let config = SplitConfig::load(path).context("Failed to load split config")?;
    tracing::debug!(
        share_tolerance = config.share_tolerance,
        total_tolerance = config.total_tolerance,
        display_threshold = config.display_threshold,
        "Split config loaded"
    );
    Ok(config)
}

/// Render allocations as text, hiding item amounts below `threshold`
///
/// ```text
/// (Akash, Amt: 79.803)
/// - item: Office Chair, amount: 64.800
/// - item: Bookshelf, amount: 15.003
/// ```
pub fn format_allocations(allocations: &[PersonAllocation], threshold: f64) -> String {
    let mut out = String::new();
    for allocation in allocations {
        out.push_str(&format!(
            "({}, Amt: {:.3})\n",
            allocation.person_name, allocation.total_amount
        ));
        for item in allocation.significant_items(threshold) {
            out.push_str(&format!(
                "- item: {}, amount: {:.3}\n",
                item.item_name, item.amount
            ));
        }
    }
    out
}
