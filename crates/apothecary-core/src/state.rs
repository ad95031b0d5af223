//! Per-item processing progress.
//!
//! A [`ProcessingState`] is eight independent counters, one per treatment.
//! Zero means "untreated". The same type doubles as a requirement vector
//! (zero = don't care) and as a delta vector (zero = leave untouched).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named treatment counter, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StateFlag {
    Peeled,
    Cut,
    Crushed,
    Boiled,
    Strained,
    Washed,
    Mixed,
    Complete,
}

impl StateFlag {
    pub const ALL: [StateFlag; 8] = [
        StateFlag::Peeled,
        StateFlag::Cut,
        StateFlag::Crushed,
        StateFlag::Boiled,
        StateFlag::Strained,
        StateFlag::Washed,
        StateFlag::Mixed,
        StateFlag::Complete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StateFlag::Peeled => "Peeled",
            StateFlag::Cut => "Cut",
            StateFlag::Crushed => "Crushed",
            StateFlag::Boiled => "Boiled",
            StateFlag::Strained => "Strained",
            StateFlag::Washed => "Washed",
            StateFlag::Mixed => "Mixed",
            StateFlag::Complete => "Complete",
        }
    }
}

/// Processing progress of one item instance.
///
/// Missing fields deserialize as zero, so data files only list the counters
/// they care about: `(cut: 1, washed: 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingState {
    pub peeled: u32,
    pub cut: u32,
    pub crushed: u32,
    pub boiled: u32,
    pub strained: u32,
    pub washed: u32,
    pub mixed: u32,
    pub complete: u32,
}

impl ProcessingState {
    /// All counters zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy for recipe tables and tests.
    pub fn with(mut self, flag: StateFlag, level: u32) -> Self {
        self.set(flag, level);
        self
    }

    pub fn get(&self, flag: StateFlag) -> u32 {
        match flag {
            StateFlag::Peeled => self.peeled,
            StateFlag::Cut => self.cut,
            StateFlag::Crushed => self.crushed,
            StateFlag::Boiled => self.boiled,
            StateFlag::Strained => self.strained,
            StateFlag::Washed => self.washed,
            StateFlag::Mixed => self.mixed,
            StateFlag::Complete => self.complete,
        }
    }

    pub fn set(&mut self, flag: StateFlag, level: u32) {
        let slot = match flag {
            StateFlag::Peeled => &mut self.peeled,
            StateFlag::Cut => &mut self.cut,
            StateFlag::Crushed => &mut self.crushed,
            StateFlag::Boiled => &mut self.boiled,
            StateFlag::Strained => &mut self.strained,
            StateFlag::Washed => &mut self.washed,
            StateFlag::Mixed => &mut self.mixed,
            StateFlag::Complete => &mut self.complete,
        };
        *slot = level;
    }

    /// Iterate `(flag, level)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StateFlag, u32)> + '_ {
        StateFlag::ALL.into_iter().map(|flag| (flag, self.get(flag)))
    }

    /// Threshold containment: every nonzero counter in `required` must be
    /// met or exceeded by this state. Zero counters are ignored.
    pub fn has_required_states(&self, required: &ProcessingState) -> bool {
        required
            .iter()
            .all(|(flag, level)| level == 0 || self.get(flag) >= level)
    }

    /// Overwrite-if-present merge: every nonzero counter in `delta` replaces
    /// the matching counter here. Counters are set, never incremented.
    pub fn apply_state_changes(&mut self, delta: &ProcessingState) {
        for (flag, level) in delta.iter() {
            if level != 0 {
                self.set(flag, level);
            }
        }
    }

    /// All eight counters equal. Used to decide whether two items stack.
    pub fn matches_exactly(&self, other: &ProcessingState) -> bool {
        self == other
    }

    /// Back to untreated.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_raw(&self) -> bool {
        self.iter().all(|(_, level)| level == 0)
    }

    /// Flags with a nonzero counter, in canonical order.
    pub fn active_flags(&self) -> impl Iterator<Item = StateFlag> + '_ {
        self.iter()
            .filter(|&(_, level)| level != 0)
            .map(|(flag, _)| flag)
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_raw() {
            return f.write_str("Raw");
        }
        for (i, flag) in self.active_flags().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(flag.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_raw() {
        let s = ProcessingState::new();
        assert!(s.is_raw());
        assert_eq!(s.to_string(), "Raw");
    }

    #[test]
    fn threshold_is_greater_or_equal() {
        let actual = ProcessingState::new().with(StateFlag::Cut, 3);
        let required = ProcessingState::new().with(StateFlag::Cut, 2);
        assert!(actual.has_required_states(&required));

        let too_much = ProcessingState::new().with(StateFlag::Cut, 4);
        assert!(!actual.has_required_states(&too_much));
    }

    #[test]
    fn zero_requirements_are_dont_care() {
        let actual = ProcessingState::new().with(StateFlag::Boiled, 1);
        assert!(actual.has_required_states(&ProcessingState::new()));
        assert!(ProcessingState::new().has_required_states(&ProcessingState::new()));
    }

    #[test]
    fn every_nonzero_requirement_must_hold() {
        let actual = ProcessingState::new()
            .with(StateFlag::Washed, 1)
            .with(StateFlag::Peeled, 1);
        let required = ProcessingState::new()
            .with(StateFlag::Washed, 1)
            .with(StateFlag::Cut, 1);
        assert!(!actual.has_required_states(&required));
    }

    #[test]
    fn state_changes_overwrite_rather_than_add() {
        let mut s = ProcessingState::new().with(StateFlag::Cut, 3);
        s.apply_state_changes(&ProcessingState::new().with(StateFlag::Cut, 1));
        assert_eq!(s.cut, 1);
    }

    #[test]
    fn zero_delta_leaves_counter_untouched() {
        let mut s = ProcessingState::new()
            .with(StateFlag::Peeled, 1)
            .with(StateFlag::Washed, 2);
        s.apply_state_changes(&ProcessingState::new().with(StateFlag::Cut, 1));
        assert_eq!(s.peeled, 1);
        assert_eq!(s.washed, 2);
        assert_eq!(s.cut, 1);
    }

    #[test]
    fn applying_same_delta_twice_is_idempotent() {
        let delta = ProcessingState::new()
            .with(StateFlag::Boiled, 1)
            .with(StateFlag::Mixed, 2);
        let mut once = ProcessingState::new().with(StateFlag::Cut, 1);
        once.apply_state_changes(&delta);
        let mut twice = once;
        twice.apply_state_changes(&delta);
        assert_eq!(once, twice);
    }

    #[test]
    fn copies_are_independent() {
        let original = ProcessingState::new().with(StateFlag::Cut, 1);
        let mut copy = original;
        copy.set(StateFlag::Cut, 5);
        copy.set(StateFlag::Boiled, 1);
        assert_eq!(original.cut, 1);
        assert_eq!(original.boiled, 0);
    }

    #[test]
    fn matches_exactly_compares_all_counters() {
        let a = ProcessingState::new().with(StateFlag::Cut, 1);
        let b = ProcessingState::new().with(StateFlag::Cut, 1);
        let c = ProcessingState::new()
            .with(StateFlag::Cut, 1)
            .with(StateFlag::Complete, 1);
        assert!(a.matches_exactly(&b));
        assert!(!a.matches_exactly(&c));
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = ProcessingState::new()
            .with(StateFlag::Strained, 1)
            .with(StateFlag::Complete, 1);
        s.reset();
        assert!(s.is_raw());
    }

    #[test]
    fn display_joins_active_flags_in_canonical_order() {
        let s = ProcessingState::new()
            .with(StateFlag::Washed, 1)
            .with(StateFlag::Peeled, 1)
            .with(StateFlag::Cut, 2);
        assert_eq!(s.to_string(), "Peeled, Cut, Washed");
    }

    #[test]
    fn deserialize_partial_state() {
        let s: ProcessingState = serde_json::from_str(r#"{"cut": 1, "washed": 1}"#).unwrap();
        assert_eq!(s.cut, 1);
        assert_eq!(s.washed, 1);
        assert_eq!(s.boiled, 0);
    }
}
