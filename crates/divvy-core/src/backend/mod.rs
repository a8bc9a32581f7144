//! Collaborator backend abstraction
//!
//! Reading the receipt image and interpreting the free-text rules are done by
//! an external model. This module only defines the seam: a backend takes a
//! prompt (plus the image for extraction) and returns the model's raw text.
//! Cleaning and parsing that text is done by [`crate::parsing`].
//!
//! # Architecture
//!
//! - `SplitBackend` trait: the two collaborator calls
//! - `MockBackend`: scripted responses for tests and the `divvy demo` command

mod mock;

pub use mock::{MockBackend, DEMO_RULES};

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for extraction/interpretation backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait SplitBackend: Send + Sync {
    /// Read line items from a receipt image, returning the raw model response
    async fn extract_line_items(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String>;

    /// Turn the rules prompt into item splits, returning the raw model response
    async fn interpret_split_rules(&self, prompt: &str) -> Result<String>;

    /// Backend name (for logging)
    fn name(&self) -> &str;
}
