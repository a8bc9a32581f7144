//! JSON parsing helpers for collaborator responses
//!
//! The extraction and interpretation models answer with a JSON array, but the
//! payload is often wrapped in a Markdown code fence, prefixed with a BOM, or
//! surrounded by chatter. These helpers strip that and deserialize the array.

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::models::{ItemSplit, LineItem};

/// Raw payloads longer than this are truncated in error messages
const MAX_RAW_IN_ERROR: usize = 200;

/// Strip whitespace, a ```json fence and a leading BOM from a model response
pub fn clean_raw_json(raw: &str) -> &str {
    let mut cleaned = raw.trim().trim_start_matches('\u{feff}').trim();

    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest.strip_prefix("json").unwrap_or(rest);
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }

    cleaned.trim().trim_start_matches('\u{feff}')
}

/// Parse line items from an extraction response
pub fn parse_line_items(response: &str) -> Result<Vec<LineItem>> {
    parse_array(response, "line items")
}

/// Parse item splits from an interpretation response
pub fn parse_item_splits(response: &str) -> Result<Vec<ItemSplit>> {
    parse_array(response, "item splits")
}

fn parse_array<T: DeserializeOwned>(response: &str, what: &str) -> Result<Vec<T>> {
    let response = clean_raw_json(response);

    // Look for the outermost JSON array
    let start = response.find('[');
    let end = response.rfind(']');

    match (start, end) {
        (Some(s), Some(e)) if s < e => {
            let json_str = &response[s..=e];
            serde_json::from_str(json_str).map_err(|e| {
                Error::InvalidData(format!(
                    "Invalid {} JSON: {} | Raw: {}",
                    what,
                    e,
                    truncate(json_str)
                ))
            })
        }
        _ => Err(Error::InvalidData(format!(
            "No JSON array found in {} response | Raw: {}",
            what,
            truncate(response)
        ))),
    }
}

fn truncate(s: &str) -> String {
    if s.len() <= MAX_RAW_IN_ERROR {
        return s.to_string();
    }
    let mut cut = MAX_RAW_IN_ERROR;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_fenced_json() {
        let raw = "```json\n[{\"itemName\": \"Chair\"}]\n```";
        assert_eq!(clean_raw_json(raw), "[{\"itemName\": \"Chair\"}]");
    }

    #[test]
    fn test_clean_bare_fence_and_bom() {
        let raw = "\u{feff}  ```\n[]\n```  ";
        assert_eq!(clean_raw_json(raw), "[]");
    }

    #[test]
    fn test_clean_plain_json_untouched() {
        assert_eq!(clean_raw_json("[1, 2]"), "[1, 2]");
    }

    #[test]
    fn test_parse_line_items() {
        let response = r#"```json
[
  {"itemName": "Office Chair", "pricePerUnit": 50, "quantity": 2, "tax": 0, "totalPrice": 100, "warnings": []},
  {"itemName": "Queen Bed", "pricePerUnit": -1, "quantity": -1, "tax": 0, "totalPrice": 90, "warnings": ["quantity unreadable"]}
]
```"#;
        let items = parse_line_items(response).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Office Chair");
        assert_eq!(items[0].quantity, Some(2));
        assert_eq!(items[1].unit_price, None);
        assert_eq!(items[1].warnings.len(), 1);
    }

    #[test]
    fn test_parse_item_splits_with_text() {
        let response = r#"Here is the split:
[{"itemName": "Queen Bed", "splits": [{"personName": "Dipti", "personShare": 1.0}]}]
Let me know if you need anything else!"#;
        let splits = parse_item_splits(response).unwrap();
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].shares[0].person_name, "Dipti");
    }

    #[test]
    fn test_no_array_found() {
        let err = parse_line_items("Sorry, I could not read the receipt.").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("No JSON array"));
    }

    #[test]
    fn test_invalid_json_is_truncated() {
        let response = format!("[{{\"itemName\": {}}}]", "x".repeat(500));
        let err = parse_item_splits(&response).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid item splits JSON"));
        assert!(message.ends_with("..."));
    }
}
