//! Receipt-to-allocation pipeline
//!
//! Runs the whole flow against a [`SplitBackend`]:
//! extract line items → validate → interpret rules → validate → allocate.
//! Each stage short-circuits; nothing is retried.

use serde::Serialize;
use tracing::{debug, info};

use crate::backend::SplitBackend;
use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::models::{ItemSplit, LineItem, PersonAllocation};
use crate::parsing::{parse_item_splits, parse_line_items};
use crate::prompts::{build_rules_prompt, load_prompt, PromptId};
use crate::split::allocate;
use crate::validate::{check_item_splits, check_line_items};

/// Everything produced while splitting one bill
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSplit {
    pub items: Vec<LineItem>,
    pub splits: Vec<ItemSplit>,
    pub allocations: Vec<PersonAllocation>,
}

/// Extract line items from a receipt image and validate them
pub async fn extract_line_items(
    backend: &dyn SplitBackend,
    image: &[u8],
    mime_type: &str,
    config: &SplitConfig,
) -> Result<Vec<LineItem>> {
    if image.is_empty() {
        return Err(Error::InvalidData("receipt image is empty".into()));
    }

    let prompt = load_prompt(PromptId::ExtractLineItems);
    let raw = backend.extract_line_items(image, mime_type, &prompt).await?;
    let items = parse_line_items(&raw)?;

    info!(
        backend = backend.name(),
        items = items.len(),
        "Received line items"
    );
    check_line_items(&items, config)?;
    Ok(items)
}

/// Interpret free-text rules into item splits and validate them against `items`
pub async fn interpret_split_rules(
    backend: &dyn SplitBackend,
    items: &[LineItem],
    rules: &str,
    config: &SplitConfig,
) -> Result<Vec<ItemSplit>> {
    if rules.trim().is_empty() {
        return Err(Error::InvalidData("split rules cannot be empty".into()));
    }

    let template = load_prompt(PromptId::InterpretSplitRules);
    let prompt = build_rules_prompt(&template, items, rules);
    debug!(prompt_len = prompt.len(), "Built split rules prompt");

    let raw = backend.interpret_split_rules(&prompt).await?;
    let splits = parse_item_splits(&raw)?;

    info!(
        backend = backend.name(),
        assignments = splits.len(),
        "Received item splits"
    );
    check_item_splits(items, &splits, config)?;
    Ok(splits)
}

/// Process a receipt image and split rules into per-person allocations
pub async fn process_bill(
    backend: &dyn SplitBackend,
    image: &[u8],
    mime_type: &str,
    rules: &str,
    config: &SplitConfig,
) -> Result<BillSplit> {
    if rules.trim().is_empty() {
        return Err(Error::InvalidData("split rules cannot be empty".into()));
    }
    info!(image_bytes = image.len(), mime_type, "Processing bill");

    let items = extract_line_items(backend, image, mime_type, config).await?;
    let splits = interpret_split_rules(backend, &items, rules, config).await?;
    let allocations = allocate(&items, &splits)?;

    info!(people = allocations.len(), "Bill split calculated");
    Ok(BillSplit {
        items,
        splits,
        allocations,
    })
}
