//! Divvy Core Library
//!
//! Bill splitting for shared purchases:
//! - Data contracts for extracted line items and per-item shares
//! - Validation of extracted bills and split assignments
//! - Allocation of item totals to people
//! - Parsing of collaborator (model) responses
//! - Prompt templates and the receipt-to-allocation pipeline

pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod pipeline;
pub mod prompts;
pub mod split;
pub mod validate;

pub use backend::{MockBackend, SplitBackend};
pub use config::SplitConfig;
pub use error::{Error, Result};
pub use models::{ItemAmount, ItemSplit, LineItem, PersonAllocation, Share};
pub use pipeline::{process_bill, BillSplit};
pub use split::{allocate, split_bill};
pub use validate::{check_item_splits, check_line_items};
