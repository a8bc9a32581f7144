//! Data models for bills, item splits and per-person allocations
//!
//! Field names on the wire follow the collaborator JSON contract
//! (`itemName`, `pricePerUnit`, `totalPrice`, `personShare`, ...).
//! Numbers the extraction step could not read arrive as `-1`; they are
//! decoded into `None` at the boundary and never seen as sentinels again.

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel the extraction collaborator uses for "could not read this value"
pub const ABSENT_SENTINEL: f64 = -1.0;

/// One purchased item as extracted from a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Identifying name (the join key for item splits)
    #[serde(rename = "itemName")]
    pub name: String,
    #[serde(rename = "pricePerUnit", default, deserialize_with = "absent_f64")]
    pub unit_price: Option<f64>,
    #[serde(default, deserialize_with = "absent_i64")]
    pub quantity: Option<i64>,
    /// Additive surcharge on the item
    #[serde(default, deserialize_with = "zero_if_absent")]
    pub tax: f64,
    /// Authoritative amount apportioned to people
    #[serde(default, deserialize_with = "absent_f64")]
    pub total_price: Option<f64>,
    /// Free-text annotations from extraction (diagnostic only)
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl LineItem {
    /// Create an item with only a total price
    pub fn new(name: impl Into<String>, total_price: f64) -> Self {
        Self {
            name: name.into(),
            unit_price: None,
            quantity: None,
            tax: 0.0,
            total_price: Some(total_price),
            warnings: Vec::new(),
        }
    }

    /// Set the unit price and quantity breakdown
    pub fn with_breakdown(mut self, unit_price: f64, quantity: i64) -> Self {
        self.unit_price = Some(unit_price);
        self.quantity = Some(quantity);
        self
    }

    pub fn with_tax(mut self, tax: f64) -> Self {
        self.tax = tax;
        self
    }

    /// `unit_price * quantity + tax`, if both breakdown fields are present
    pub fn computed_total(&self) -> Option<f64> {
        match (self.unit_price, self.quantity) {
            (Some(unit_price), Some(quantity)) => Some(unit_price * quantity as f64 + self.tax),
            _ => None,
        }
    }
}

/// A single person's fractional ownership of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    pub person_name: String,
    /// Portion of the item in (0, 1]
    #[serde(rename = "personShare")]
    pub fraction: f64,
}

impl Share {
    pub fn new(person_name: impl Into<String>, fraction: f64) -> Self {
        Self {
            person_name: person_name.into(),
            fraction,
        }
    }
}

/// Ownership assignment for one line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSplit {
    pub item_name: String,
    #[serde(rename = "splits", default)]
    pub shares: Vec<Share>,
}

impl ItemSplit {
    pub fn new(item_name: impl Into<String>, shares: Vec<Share>) -> Self {
        Self {
            item_name: item_name.into(),
            shares,
        }
    }

    /// Sum of all fractions in this assignment
    pub fn share_sum(&self) -> f64 {
        self.shares.iter().map(|s| s.fraction).sum()
    }
}

/// Amount owed by one person for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAmount {
    pub item_name: String,
    pub amount: f64,
}

/// Aggregated result for one person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonAllocation {
    pub person_name: String,
    #[serde(rename = "splitByItem")]
    pub item_amounts: Vec<ItemAmount>,
    pub total_amount: f64,
}

impl PersonAllocation {
    /// Item amounts at or above `threshold` (smaller amounts are rounding noise)
    pub fn significant_items(&self, threshold: f64) -> impl Iterator<Item = &ItemAmount> {
        self.item_amounts
            .iter()
            .filter(move |item| item.amount >= threshold)
    }
}

fn is_sentinel(value: f64) -> bool {
    value == ABSENT_SENTINEL
}

fn absent_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| !is_sentinel(*v)))
}

fn absent_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.filter(|v| *v != ABSENT_SENTINEL as i64))
}

fn zero_if_absent<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(absent_f64(deserializer)?.unwrap_or(0.0))
}
