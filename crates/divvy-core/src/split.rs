//! Bill splitting: per-item shares to per-person totals
//!
//! [`allocate`] trusts that the validator already ran; it only refuses empty
//! input. People are returned in the order they are first seen while walking
//! the split assignments, and each person's items keep that walk's order, so
//! the same input always produces the same output.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::models::{ItemAmount, ItemSplit, LineItem, PersonAllocation};
use crate::validate::{check_item_splits, check_line_items};

/// Convert per-item shares into per-person allocations
pub fn allocate(items: &[LineItem], splits: &[ItemSplit]) -> Result<Vec<PersonAllocation>> {
    if items.is_empty() {
        return Err(Error::EmptyInput("no line items"));
    }
    if splits.is_empty() {
        return Err(Error::EmptyInput("no item splits"));
    }

    let prices: HashMap<&str, f64> = items
        .iter()
        .map(|item| (item.name.as_str(), item.total_price.unwrap_or(0.0)))
        .collect();

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<(&str, Vec<ItemAmount>)> = Vec::new();

    for split in splits {
        let price = match prices.get(split.item_name.as_str()) {
            Some(price) => *price,
            None => {
                warn!(item = %split.item_name, "Split references unknown item, counting as zero");
                0.0
            }
        };

        for share in &split.shares {
            let person = share.person_name.as_str();
            let slot = *index.entry(person).or_insert_with(|| {
                buckets.push((person, Vec::new()));
                buckets.len() - 1
            });
            buckets[slot].1.push(ItemAmount {
                item_name: split.item_name.clone(),
                amount: share.fraction * price,
            });
        }
    }

    let allocations: Vec<PersonAllocation> = buckets
        .into_iter()
        .map(|(person, item_amounts)| PersonAllocation {
            person_name: person.to_string(),
            total_amount: item_amounts.iter().map(|i| i.amount).sum(),
            item_amounts,
        })
        .collect();

    debug!(people = allocations.len(), "Bill allocated");
    Ok(allocations)
}

/// Validate line items and splits, then allocate
pub fn split_bill(
    items: &[LineItem],
    splits: &[ItemSplit],
    config: &SplitConfig,
) -> Result<Vec<PersonAllocation>> {
    check_line_items(items, config)?;
    check_item_splits(items, splits, config)?;
    allocate(items, splits)
}

/// Sum of all stated item totals
pub fn bill_total(items: &[LineItem]) -> f64 {
    items.iter().filter_map(|i| i.total_price).sum()
}

/// Sum of all per-person totals
pub fn allocated_total(allocations: &[PersonAllocation]) -> f64 {
    allocations.iter().map(|a| a.total_amount).sum()
}
