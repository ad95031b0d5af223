//! Keyed dialogue lines.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shown in place of any line that cannot be found.
pub const MISSING_LINE: &str = "...";

/// Lines grouped by key (e.g. `"greeting"`, `"cough.describe"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogueTable {
    lines: HashMap<String, Vec<String>>,
}

impl DialogueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, lines: Vec<String>) {
        self.lines.insert(key.to_string(), lines);
    }

    /// Line `index` under `key`, or [`MISSING_LINE`].
    pub fn line(&self, key: &str, index: usize) -> &str {
        self.lines
            .get(key)
            .and_then(|lines| lines.get(index))
            .map(String::as_str)
            .unwrap_or(MISSING_LINE)
    }

    /// Number of lines under `key`; 0 when missing.
    pub fn line_count(&self, key: &str) -> usize {
        self.lines.get(key).map_or(0, Vec::len)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lines.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_fallback() {
        let mut table = DialogueTable::new();
        table.insert(
            "greeting",
            vec!["Hello there.".to_string(), "Back again?".to_string()],
        );
        assert_eq!(table.line("greeting", 1), "Back again?");
        assert_eq!(table.line("greeting", 2), MISSING_LINE);
        assert_eq!(table.line("farewell", 0), "...");
        assert_eq!(table.line_count("greeting"), 2);
        assert_eq!(table.line_count("farewell"), 0);
    }

    #[test]
    fn deserializes_from_plain_map() {
        let table: DialogueTable =
            serde_json::from_str(r#"{"cough": ["My throat is sore."]}"#).unwrap();
        assert!(table.contains("cough"));
        assert_eq!(table.line("cough", 0), "My throat is sore.");
    }
}
