//! Bill commands: validate and split JSON files

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use divvy_core::{check_item_splits, check_line_items, ItemSplit, LineItem, SplitConfig};

use super::format_allocations;

/// Read line items from a JSON array file
pub fn read_line_items(path: &Path) -> Result<Vec<LineItem>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read line items from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid line items JSON in {}", path.display()))
}

/// Read item splits from a JSON array file
pub fn read_item_splits(path: &Path) -> Result<Vec<ItemSplit>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read item splits from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid item splits JSON in {}", path.display()))
}

/// Check line items, and item splits when given
pub fn cmd_validate(items: &Path, splits: Option<&Path>, config: &SplitConfig) -> Result<()> {
    let line_items = read_line_items(items)?;
    check_line_items(&line_items, config).context("Line items rejected")?;

    match splits {
        Some(splits) => {
            let item_splits = read_item_splits(splits)?;
            check_item_splits(&line_items, &item_splits, config)
                .context("Item splits rejected")?;
            println!(
                "✓ Bill is valid ({} items, {} splits)",
                line_items.len(),
                item_splits.len()
            );
        }
        None => println!("✓ Line items are valid ({} items)", line_items.len()),
    }

    Ok(())
}

/// Validate a bill and print each person's share
pub fn cmd_split(items: &Path, splits: &Path, json: bool, config: &SplitConfig) -> Result<()> {
    let line_items = read_line_items(items)?;
    let item_splits = read_item_splits(splits)?;

    let allocations = divvy_core::split_bill(&line_items, &item_splits, config)
        .context("Failed to split bill")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&allocations)?);
    } else {
        print!(
            "{}",
            format_allocations(&allocations, config.display_threshold)
        );
    }

    Ok(())
}
