//! Prompt templates for the extraction and interpretation collaborators
//!
//! Prompts are loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/divvy/prompts/<id>.md)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::PathBuf;

use crate::models::LineItem;

/// Embedded default prompts (compiled into binary)
mod defaults {
    pub const EXTRACT_LINE_ITEMS: &str = include_str!("../../../prompts/extract_line_items.md");
    pub const INTERPRET_SPLIT_RULES: &str =
        include_str!("../../../prompts/interpret_split_rules.md");
}

/// Known prompt IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptId {
    /// Receipt image to line items
    ExtractLineItems,
    /// Item list + free-text rules to item splits
    InterpretSplitRules,
}

impl PromptId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtractLineItems => "extract_line_items",
            Self::InterpretSplitRules => "interpret_split_rules",
        }
    }

    pub fn all() -> &'static [PromptId] {
        &[Self::ExtractLineItems, Self::InterpretSplitRules]
    }

    /// Look up a prompt by its string ID
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.as_str() == id)
    }

    /// Embedded template, ignoring any override
    pub fn default_content(&self) -> &'static str {
        match self {
            Self::ExtractLineItems => defaults::EXTRACT_LINE_ITEMS,
            Self::InterpretSplitRules => defaults::INTERPRET_SPLIT_RULES,
        }
    }
}

/// Override directory for prompts
pub fn override_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("divvy").join("prompts"))
}

/// Override file path for a prompt (may not exist)
pub fn override_path(id: PromptId) -> Option<PathBuf> {
    override_dir().map(|d| d.join(format!("{}.md", id.as_str())))
}

/// Load a prompt, preferring a readable override file
pub fn load_prompt(id: PromptId) -> String {
    if let Some(path) = override_path(id) {
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => return content,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read prompt override, using default");
                }
            }
        }
    }
    id.default_content().to_string()
}

/// Numbered item list appended to the rules prompt
pub fn render_item_list(items: &[LineItem]) -> String {
    let mut list = String::from("item list:\n");
    for (i, item) in items.iter().enumerate() {
        list.push_str(&format!("{}. {}\n", i + 1, item.name));
    }
    list
}

/// Build the interpretation prompt: template, item list, then the user's rules
pub fn build_rules_prompt(template: &str, items: &[LineItem], rules: &str) -> String {
    let mut prompt = String::with_capacity(template.len() + rules.len() + items.len() * 16);
    prompt.push_str(template);
    if !template.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str(&render_item_list(items));
    prompt.push_str(rules.trim());
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_embedded() {
        assert!(PromptId::ExtractLineItems
            .default_content()
            .contains("totalPrice"));
        assert!(PromptId::InterpretSplitRules
            .default_content()
            .contains("personShare"));
    }

    #[test]
    fn test_prompt_id_lookup() {
        assert_eq!(
            PromptId::from_id("interpret_split_rules"),
            Some(PromptId::InterpretSplitRules)
        );
        assert_eq!(PromptId::from_id("classify_merchant"), None);
        for id in PromptId::all() {
            assert_eq!(PromptId::from_id(id.as_str()), Some(*id));
        }
    }

    #[test]
    fn test_render_item_list() {
        let items = vec![LineItem::new("Office Chair", 100.0), LineItem::new("Bed", 90.0)];
        assert_eq!(
            render_item_list(&items),
            "item list:\n1. Office Chair\n2. Bed\n"
        );
    }

    #[test]
    fn test_build_rules_prompt_order() {
        let items = vec![LineItem::new("Recliner", 300.0)];
        let prompt = build_rules_prompt(
            "Split the bill.",
            &items,
            "  Aditya, Suyog and Viraj buy the recliner\n",
        );
        assert_eq!(
            prompt,
            "Split the bill.\nitem list:\n1. Recliner\nAditya, Suyog and Viraj buy the recliner"
        );
    }
}
