//! Read-only quantity lookups against the player's inventory.
//!
//! Recipe and item names do not always agree with inventory keys, so a
//! lookup key is resolved through a fixed chain, first hit wins:
//!
//! 1. exact match
//! 2. case-insensitive match
//! 3. explicit remap table
//! 4. singular/plural toggle (trailing `s`)
//! 5. strip everything from the first underscore, then exact or
//!    case-insensitive
//!
//! An unresolved key is returned unchanged and reports a quantity of 0.

use std::collections::{BTreeMap, HashMap};

/// Quantities keyed by inventory item key, plus the remap table.
#[derive(Debug, Clone, Default)]
pub struct InventoryIndex {
    quantities: BTreeMap<String, u32>,
    remaps: HashMap<String, String>,
}

impl InventoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current quantity for `key`, as reported by the inventory
    /// owner.
    pub fn set_quantity(&mut self, key: &str, quantity: u32) {
        self.quantities.insert(key.to_string(), quantity);
    }

    /// Route lookups of `from` to the inventory key `to`.
    pub fn add_remap(&mut self, from: &str, to: &str) {
        self.remaps.insert(from.to_string(), to.to_string());
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Resolve `key` to an inventory key, or return it unchanged.
    pub fn resolve_key(&self, key: &str) -> String {
        match self.try_resolve(key) {
            Some(found) => found.to_string(),
            None => {
                tracing::debug!(key, "inventory key unresolved");
                key.to_string()
            }
        }
    }

    /// Quantity held under the resolved key; 0 when unresolved.
    pub fn quantity(&self, key: &str) -> u32 {
        self.try_resolve(key)
            .and_then(|k| self.quantities.get(k))
            .copied()
            .unwrap_or(0)
    }

    fn try_resolve(&self, key: &str) -> Option<&str> {
        self.exact(key)
            .or_else(|| self.case_insensitive(key))
            .or_else(|| self.remapped(key))
            .or_else(|| self.plural_toggled(key))
            .or_else(|| self.prefix_stripped(key))
    }

    fn exact(&self, key: &str) -> Option<&str> {
        self.quantities.get_key_value(key).map(|(k, _)| k.as_str())
    }

    fn case_insensitive(&self, key: &str) -> Option<&str> {
        self.quantities
            .keys()
            .find(|k| k.eq_ignore_ascii_case(key))
            .map(String::as_str)
    }

    fn exact_or_case_insensitive(&self, key: &str) -> Option<&str> {
        self.exact(key).or_else(|| self.case_insensitive(key))
    }

    fn remapped(&self, key: &str) -> Option<&str> {
        let target = self.remaps.get(key).or_else(|| {
            self.remaps
                .iter()
                .find(|(from, _)| from.eq_ignore_ascii_case(key))
                .map(|(_, to)| to)
        })?;
        self.exact_or_case_insensitive(target)
    }

    fn plural_toggled(&self, key: &str) -> Option<&str> {
        let toggled = match key.strip_suffix('s').or_else(|| key.strip_suffix('S')) {
            Some(singular) if !singular.is_empty() => singular.to_string(),
            _ => format!("{key}s"),
        };
        self.exact_or_case_insensitive(&toggled)
    }

    fn prefix_stripped(&self, key: &str) -> Option<&str> {
        let (prefix, _) = key.split_once('_')?;
        if prefix.is_empty() {
            return None;
        }
        self.exact_or_case_insensitive(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> InventoryIndex {
        let mut inv = InventoryIndex::new();
        inv.set_quantity("ginger", 3);
        inv.set_quantity("Chamomile", 5);
        inv.set_quantity("leaves", 7);
        inv.set_quantity("honey", 1);
        inv
    }

    #[test]
    fn exact_match_wins() {
        let inv = inventory();
        assert_eq!(inv.resolve_key("ginger"), "ginger");
        assert_eq!(inv.quantity("ginger"), 3);
    }

    #[test]
    fn case_insensitive_match() {
        let inv = inventory();
        assert_eq!(inv.resolve_key("chamomile"), "Chamomile");
        assert_eq!(inv.quantity("CHAMOMILE"), 5);
    }

    #[test]
    fn remap_table() {
        let mut inv = inventory();
        inv.add_remap("Bee Nectar", "Honey");
        assert_eq!(inv.resolve_key("Bee Nectar"), "honey");
        assert_eq!(inv.quantity("bee nectar"), 1);
    }

    #[test]
    fn plural_toggle_both_ways() {
        let mut inv = inventory();
        inv.set_quantity("Petals", 2);
        assert_eq!(inv.resolve_key("leave"), "leaves");
        assert_eq!(inv.resolve_key("gingers"), "ginger");
        assert_eq!(inv.quantity("petal"), 2);
    }

    #[test]
    fn underscore_strip_then_case_insensitive() {
        let inv = inventory();
        assert_eq!(inv.resolve_key("Ginger_Raw"), "ginger");
        assert_eq!(inv.quantity("Ginger_Raw"), 3);
    }

    #[test]
    fn earlier_rule_takes_priority() {
        let mut inv = inventory();
        inv.set_quantity("Ginger_Raw", 9);
        assert_eq!(inv.resolve_key("ginger_raw"), "Ginger_Raw");
        inv.add_remap("ginger", "honey");
        assert_eq!(inv.resolve_key("ginger"), "ginger");
    }

    #[test]
    fn unresolved_key_returned_unchanged_with_zero_quantity() {
        let inv = inventory();
        assert_eq!(inv.resolve_key("Mandrake_Root"), "Mandrake_Root");
        assert_eq!(inv.quantity("Mandrake_Root"), 0);
        assert_eq!(inv.quantity("_"), 0);
    }
}
