//! Consistency checks for extracted bill data
//!
//! Both checks are pure and return the first failure found:
//! - [`check_line_items`]: every item has a total, and the total agrees with
//!   `pricePerUnit * quantity + tax` when that breakdown is readable
//! - [`check_item_splits`]: the split assignments cover exactly the bill's
//!   items and each item is fully allocated

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::models::{ItemSplit, LineItem};

/// Check that extracted line items are internally consistent
pub fn check_line_items(items: &[LineItem], config: &SplitConfig) -> Result<()> {
    for item in items {
        let stated = item.total_price.ok_or_else(|| Error::MissingTotal {
            item: item.name.clone(),
        })?;

        // Breakdown unreadable: the total is still trusted
        let Some(computed) = item.computed_total() else {
            continue;
        };

        if (stated - computed).abs() > config.total_tolerance {
            return Err(Error::TotalMismatch {
                item: item.name.clone(),
                stated,
                computed,
            });
        }
    }

    debug!(items = items.len(), "Line items valid");
    Ok(())
}

/// Check that split assignments fully and correctly cover the line items
pub fn check_item_splits(
    items: &[LineItem],
    splits: &[ItemSplit],
    config: &SplitConfig,
) -> Result<()> {
    let item_names: HashSet<&str> = items.iter().map(|i| i.name.as_str()).collect();
    let split_names: HashSet<&str> = splits.iter().map(|s| s.item_name.as_str()).collect();

    // A repeated line item name would make two prices share one join key
    if item_names.len() != items.len() {
        return Err(Error::ItemCountMismatch {
            items: items.len(),
            splits: split_names.len(),
        });
    }

    if item_names.len() != split_names.len() {
        return Err(Error::ItemCountMismatch {
            items: item_names.len(),
            splits: split_names.len(),
        });
    }

    // Sizes match, so one direction is enough to prove set equality
    if let Some(missing) = items
        .iter()
        .find(|i| !split_names.contains(i.name.as_str()))
    {
        return Err(Error::UnknownItem {
            item: missing.name.clone(),
        });
    }

    let (min, max) = (config.min_share_sum(), config.max_share_sum());
    for (item, sum) in share_sums(splits) {
        if sum < min || sum > max {
            return Err(Error::ShareSumOutOfRange {
                item: item.to_string(),
                sum,
                min,
                max,
            });
        }
    }

    debug!(
        items = item_names.len(),
        assignments = splits.len(),
        "Item splits valid"
    );
    Ok(())
}

/// Per-item share sums in first-seen order
///
/// Assignments repeating an item name are summed together, so an item split
/// across several records must still total 1.0.
fn share_sums(splits: &[ItemSplit]) -> Vec<(&str, f64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, f64)> = Vec::new();

    for split in splits {
        let name = split.item_name.as_str();
        let slot = *index.entry(name).or_insert_with(|| {
            sums.push((name, 0.0));
            sums.len() - 1
        });
        sums[slot].1 += split.share_sum();
    }

    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Share;

    fn config() -> SplitConfig {
        SplitConfig::default()
    }

    fn even_split(item: &str, people: &[&str]) -> ItemSplit {
        let fraction = 1.0 / people.len() as f64;
        ItemSplit::new(
            item,
            people.iter().map(|p| Share::new(*p, fraction)).collect(),
        )
    }

    // ========== Line Item Tests ==========

    #[test]
    fn test_line_items_valid() {
        let items = vec![
            LineItem::new("Chair", 100.0),
            LineItem::new("Recliner", 330.0)
                .with_breakdown(150.0, 2)
                .with_tax(30.0),
        ];
        assert!(check_line_items(&items, &config()).is_ok());
    }

    #[test]
    fn test_missing_total() {
        let mut item = LineItem::new("Bed", 90.0);
        item.total_price = None;

        let err = check_line_items(&[item], &config()).unwrap_err();
        assert!(matches!(err, Error::MissingTotal { ref item } if item == "Bed"));
    }

    #[test]
    fn test_total_mismatch() {
        let items = vec![LineItem::new("Chair", 100.0).with_breakdown(45.0, 2)];
        let err = check_line_items(&items, &config()).unwrap_err();
        match err {
            Error::TotalMismatch {
                item,
                stated,
                computed,
            } => {
                assert_eq!(item, "Chair");
                assert_eq!(stated, 100.0);
                assert_eq!(computed, 90.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tax_counts_toward_total() {
        let items = vec![LineItem::new("Chair", 100.0)
            .with_breakdown(45.0, 2)
            .with_tax(10.0)];
        assert!(check_line_items(&items, &config()).is_ok());
    }

    #[test]
    fn test_partial_breakdown_skips_cross_check() {
        let mut no_quantity = LineItem::new("Lamp", 999.0);
        no_quantity.unit_price = Some(10.0);
        let mut no_price = LineItem::new("Rug", 999.0);
        no_price.quantity = Some(3);

        assert!(check_line_items(&[no_quantity, no_price], &config()).is_ok());
    }

    #[test]
    fn test_float_noise_is_not_a_mismatch() {
        // 3 * 3.33 is 9.989999999999998 in binary floating point
        let items = vec![LineItem::new("Pens", 9.99).with_breakdown(3.33, 3)];
        assert!(check_line_items(&items, &config()).is_ok());
    }

    #[test]
    fn test_first_failure_wins() {
        let mut missing = LineItem::new("Bed", 0.0);
        missing.total_price = None;
        let items = vec![
            LineItem::new("Chair", 100.0).with_breakdown(1.0, 1),
            missing,
        ];
        let err = check_line_items(&items, &config()).unwrap_err();
        assert_eq!(err.kind(), "total_mismatch");
    }

    // ========== Item Split Tests ==========

    #[test]
    fn test_splits_valid() {
        let items = vec![LineItem::new("Chair", 100.0), LineItem::new("Bed", 90.0)];
        let splits = vec![
            even_split("Chair", &["Akash", "Amey"]),
            even_split("Bed", &["Dipti"]),
        ];
        assert!(check_item_splits(&items, &splits, &config()).is_ok());
    }

    #[test]
    fn test_three_way_rounding_within_tolerance() {
        let items = vec![LineItem::new("Recliner", 30.0)];
        let splits = vec![ItemSplit::new(
            "Recliner",
            vec![
                Share::new("Aditya", 0.34),
                Share::new("Suyog", 0.33),
                Share::new("Viraj", 0.33),
            ],
        )];
        assert!(check_item_splits(&items, &splits, &config()).is_ok());
    }

    #[test]
    fn test_share_sum_too_low() {
        let items = vec![LineItem::new("Chair", 100.0)];
        let splits = vec![ItemSplit::new(
            "Chair",
            vec![Share::new("Akash", 0.5), Share::new("Amey", 0.45)],
        )];
        let err = check_item_splits(&items, &splits, &config()).unwrap_err();
        assert!(matches!(err, Error::ShareSumOutOfRange { ref item, .. } if item == "Chair"));
    }

    #[test]
    fn test_share_sum_too_high() {
        let items = vec![LineItem::new("Chair", 100.0)];
        let splits = vec![ItemSplit::new(
            "Chair",
            vec![Share::new("Akash", 0.6), Share::new("Amey", 0.5)],
        )];
        let err = check_item_splits(&items, &splits, &config()).unwrap_err();
        assert_eq!(err.kind(), "share_sum_out_of_range");
    }

    #[test]
    fn test_wider_tolerance_accepts_sum() {
        let items = vec![LineItem::new("Chair", 100.0)];
        let splits = vec![ItemSplit::new(
            "Chair",
            vec![Share::new("Akash", 0.5), Share::new("Amey", 0.45)],
        )];
        let loose = SplitConfig {
            share_tolerance: 0.1,
            ..SplitConfig::default()
        };
        assert!(check_item_splits(&items, &splits, &loose).is_ok());
    }

    #[test]
    fn test_extra_split_item_is_count_mismatch() {
        let items = vec![LineItem::new("Chair", 100.0)];
        let splits = vec![
            even_split("Chair", &["Akash"]),
            even_split("Sofa", &["Amey"]),
        ];
        let err = check_item_splits(&items, &splits, &config()).unwrap_err();
        assert!(matches!(
            err,
            Error::ItemCountMismatch {
                items: 1,
                splits: 2
            }
        ));
    }

    #[test]
    fn test_dropped_split_item_is_count_mismatch() {
        let items = vec![LineItem::new("Chair", 100.0), LineItem::new("Bed", 90.0)];
        let splits = vec![even_split("Chair", &["Akash"])];
        let err = check_item_splits(&items, &splits, &config()).unwrap_err();
        assert_eq!(err.kind(), "item_count_mismatch");
    }

    #[test]
    fn test_renamed_item_is_unknown() {
        let items = vec![LineItem::new("Chair", 100.0), LineItem::new("Bed", 90.0)];
        let splits = vec![
            even_split("Chair", &["Akash"]),
            even_split("Queen Bed", &["Dipti"]),
        ];
        let err = check_item_splits(&items, &splits, &config()).unwrap_err();
        assert!(matches!(err, Error::UnknownItem { ref item } if item == "Bed"));
    }

    #[test]
    fn test_names_match_exactly() {
        let items = vec![LineItem::new("Chair", 100.0)];
        let splits = vec![even_split("chair", &["Akash"])];
        let err = check_item_splits(&items, &splits, &config()).unwrap_err();
        assert_eq!(err.kind(), "unknown_item");
    }

    #[test]
    fn test_repeated_item_records_sum_together() {
        let items = vec![LineItem::new("Bookshelf", 80.0)];
        let splits = vec![
            ItemSplit::new("Bookshelf", vec![Share::new("Akash", 0.5)]),
            ItemSplit::new("Bookshelf", vec![Share::new("Dipti", 0.5)]),
        ];
        assert!(check_item_splits(&items, &splits, &config()).is_ok());
    }

    #[test]
    fn test_repeated_line_item_name_rejected() {
        let items = vec![LineItem::new("Chair", 100.0), LineItem::new("Chair", 50.0)];
        let splits = vec![even_split("Chair", &["Akash"])];
        let err = check_item_splits(&items, &splits, &config()).unwrap_err();
        assert!(matches!(
            err,
            Error::ItemCountMismatch {
                items: 2,
                splits: 1
            }
        ));
    }

    #[test]
    fn test_coverage_checked_before_share_sums() {
        let items = vec![LineItem::new("Chair", 100.0)];
        let splits = vec![
            ItemSplit::new("Chair", vec![Share::new("Akash", 0.2)]),
            even_split("Sofa", &["Amey"]),
        ];
        let err = check_item_splits(&items, &splits, &config()).unwrap_err();
        assert_eq!(err.kind(), "item_count_mismatch");
    }
}
