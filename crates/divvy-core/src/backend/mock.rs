//! Mock backend for testing
//!
//! Returns scripted responses instead of calling a model.
//! Useful for unit tests and for trying the pipeline without a model server.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::SplitBackend;

/// Free-text rules matching [`MockBackend::demo`]
pub const DEMO_RULES: &str = "Akash and Amey buy Office Chair
Dipti buys Queen Size Bed
Aditya, Suyog and Viraj buy Recliner
Bookshelf is shared among everyone";

const DEMO_LINE_ITEMS: &str = r#"```json
[
  {"itemName": "Office Chair", "pricePerUnit": 120, "quantity": 1, "tax": 9.6, "totalPrice": 129.6, "warnings": []},
  {"itemName": "Queen Size Bed", "pricePerUnit": -1, "quantity": 1, "tax": 0, "totalPrice": 450, "warnings": ["unit price unreadable"]},
  {"itemName": "Recliner", "pricePerUnit": 300, "quantity": 1, "tax": 24, "totalPrice": 324, "warnings": []},
  {"itemName": "Bookshelf", "pricePerUnit": 45, "quantity": 2, "tax": 0, "totalPrice": 90, "warnings": []}
]
```"#;

const DEMO_ITEM_SPLITS: &str = r#"```json
[
  {"itemName": "Office Chair", "splits": [{"personName": "Akash", "personShare": 0.5}, {"personName": "Amey", "personShare": 0.5}]},
  {"itemName": "Queen Size Bed", "splits": [{"personName": "Dipti", "personShare": 1.0}]},
  {"itemName": "Recliner", "splits": [{"personName": "Aditya", "personShare": 0.34}, {"personName": "Suyog", "personShare": 0.33}, {"personName": "Viraj", "personShare": 0.33}]},
  {"itemName": "Bookshelf", "splits": [
    {"personName": "Akash", "personShare": 0.1667}, {"personName": "Amey", "personShare": 0.1667},
    {"personName": "Dipti", "personShare": 0.1667}, {"personName": "Aditya", "personShare": 0.1667},
    {"personName": "Suyog", "personShare": 0.1666}, {"personName": "Viraj", "personShare": 0.1666}
  ]}
]
```"#;

/// Mock backend with scripted responses
///
/// Records the last rules prompt it was given so tests can check what the
/// pipeline sent to the interpreter.
#[derive(Clone)]
pub struct MockBackend {
    line_items_response: std::result::Result<String, String>,
    item_splits_response: std::result::Result<String, String>,
    last_rules_prompt: Arc<Mutex<Option<String>>>,
}

impl MockBackend {
    /// Create a mock that answers with the given raw responses
    pub fn new(
        line_items_response: impl Into<String>,
        item_splits_response: impl Into<String>,
    ) -> Self {
        Self {
            line_items_response: Ok(line_items_response.into()),
            item_splits_response: Ok(item_splits_response.into()),
            last_rules_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Four-item furniture receipt shared between six friends (see [`DEMO_RULES`])
    pub fn demo() -> Self {
        Self::new(DEMO_LINE_ITEMS, DEMO_ITEM_SPLITS)
    }

    /// Create a mock whose extraction call fails
    pub fn failing_extraction(message: impl Into<String>) -> Self {
        Self {
            line_items_response: Err(message.into()),
            ..Self::new("", "")
        }
    }

    /// Create a mock whose interpretation call fails
    pub fn failing_interpretation(
        line_items_response: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            item_splits_response: Err(message.into()),
            ..Self::new(line_items_response, "")
        }
    }

    /// The last prompt passed to `interpret_split_rules`
    pub fn last_rules_prompt(&self) -> Option<String> {
        self.last_rules_prompt
            .lock()
            .ok()
            .and_then(|prompt| prompt.clone())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::demo()
    }
}

#[async_trait]
impl SplitBackend for MockBackend {
    async fn extract_line_items(
        &self,
        _image: &[u8],
        _mime_type: &str,
        _prompt: &str,
    ) -> Result<String> {
        self.line_items_response.clone().map_err(Error::Backend)
    }

    async fn interpret_split_rules(&self, prompt: &str) -> Result<String> {
        if let Ok(mut last) = self.last_rules_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        self.item_splits_response.clone().map_err(Error::Backend)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{parse_item_splits, parse_line_items};

    #[test]
    fn test_demo_responses_parse() {
        let items = parse_line_items(DEMO_LINE_ITEMS).unwrap();
        let splits = parse_item_splits(DEMO_ITEM_SPLITS).unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(splits.len(), 4);
    }

    #[tokio::test]
    async fn test_records_rules_prompt() {
        let backend = MockBackend::demo();
        assert!(backend.last_rules_prompt().is_none());

        backend.interpret_split_rules("split it").await.unwrap();
        assert_eq!(backend.last_rules_prompt().as_deref(), Some("split it"));
    }

    #[tokio::test]
    async fn test_failing_extraction() {
        let backend = MockBackend::failing_extraction("model offline");
        let err = backend
            .extract_line_items(b"img", "image/png", "prompt")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "backend");
        assert!(err.to_string().contains("model offline"));
    }
}
