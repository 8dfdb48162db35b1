//! Structured requirement records produced by the markdown normalizer.
//!
//! Serde field names (`item_title`, `item_requirements`, `page`, `content`)
//! are part of the output contract and must stay stable.

use serde::{Deserialize, Serialize};

/// Sentinel stored when a line carries no `(Trang n)` citation.
pub const UNDETERMINED_PAGE: &str = "Không xác định";

/// One top-level requirement group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_title: String,
    pub item_requirements: Vec<ItemRequirement>,
}

impl Item {
    /// Creates an item with an empty requirement list.
    pub fn new(title: &str) -> Self {
        Self {
            item_title: title.to_string(),
            item_requirements: Vec::new(),
        }
    }
}

/// One page-cited requirement line attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequirement {
    /// Textual page number, or [`UNDETERMINED_PAGE`] when the citation is absent.
    pub page: String,
    pub content: String,
}

impl ItemRequirement {
    pub fn new(page: &str, content: &str) -> Self {
        Self {
            page: page.to_string(),
            content: content.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_field_names() {
        let item = Item {
            item_title: "Máy chủ".to_string(),
            item_requirements: vec![ItemRequirement::new("2", "CPU 8 lõi")],
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"item_title\""));
        assert!(json.contains("\"item_requirements\""));
        assert!(json.contains("\"page\":\"2\""));
        assert!(json.contains("\"content\""));
    }

    #[test]
    fn test_roundtrip() {
        let item = Item {
            item_title: "Phần mềm".to_string(),
            item_requirements: vec![ItemRequirement::new(UNDETERMINED_PAGE, "Hỗ trợ tiếng Việt")],
        };

        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
