//! Pure predicates over a [`ToolState`] snapshot.

use crate::id::ToolType;
use crate::tool::ToolState;
use serde::{Deserialize, Serialize};

/// A condition on the tool that gates recipe matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prerequisite {
    MustHaveWater,
    MustBeHeated,
    MustBeOnTool(ToolType),
    MustBeEmpty,
    /// Always satisfied. Written as `None` in data files.
    #[serde(rename = "None")]
    Always,
}

impl Prerequisite {
    pub fn is_satisfied(&self, tool: &ToolState) -> bool {
        match *self {
            Prerequisite::MustHaveWater => has_water(tool),
            Prerequisite::MustBeHeated => is_heated(tool),
            Prerequisite::MustBeOnTool(target) => is_attached_to(tool, target),
            Prerequisite::MustBeEmpty => is_empty(tool),
            Prerequisite::Always => true,
        }
    }
}

pub fn has_water(tool: &ToolState) -> bool {
    tool.has_water
}

pub fn is_heated(tool: &ToolState) -> bool {
    tool.is_heated
}

pub fn is_attached_to(tool: &ToolState, target: ToolType) -> bool {
    tool.is_attached_to(target)
}

pub fn is_empty(tool: &ToolState) -> bool {
    tool.is_empty()
}

/// Conjunction over `prerequisites`; an empty list holds vacuously.
pub fn all_satisfied(prerequisites: &[Prerequisite], tool: &ToolState) -> bool {
    prerequisites.iter().all(|p| p.is_satisfied(tool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ItemTypeId;
    use crate::state::ProcessingState;

    #[test]
    fn water_and_heat() {
        let mut pot = ToolState::new(ToolType::Pot);
        assert!(!Prerequisite::MustHaveWater.is_satisfied(&pot));
        assert!(!Prerequisite::MustBeHeated.is_satisfied(&pot));
        pot.add_water();
        pot.attach_to_tool(ToolType::Stove);
        assert!(Prerequisite::MustHaveWater.is_satisfied(&pot));
        assert!(Prerequisite::MustBeHeated.is_satisfied(&pot));
    }

    #[test]
    fn must_be_on_tool_checks_attachment() {
        let mut pot = ToolState::new(ToolType::Pot);
        let on_stove = Prerequisite::MustBeOnTool(ToolType::Stove);
        assert!(!on_stove.is_satisfied(&pot));
        pot.attach_to_tool(ToolType::Stove);
        assert!(on_stove.is_satisfied(&pot));
        assert!(!Prerequisite::MustBeOnTool(ToolType::Sink).is_satisfied(&pot));
    }

    #[test]
    fn must_be_empty() {
        let mut pot = ToolState::new(ToolType::Pot);
        assert!(Prerequisite::MustBeEmpty.is_satisfied(&pot));
        pot.add_item(ItemTypeId(0), &ProcessingState::new()).unwrap();
        assert!(!Prerequisite::MustBeEmpty.is_satisfied(&pot));
    }

    #[test]
    fn empty_list_is_vacuously_true() {
        let board = ToolState::new(ToolType::ChoppingBoard);
        assert!(all_satisfied(&[], &board));
        assert!(all_satisfied(&[Prerequisite::Always], &board));
        assert!(!all_satisfied(
            &[Prerequisite::Always, Prerequisite::MustHaveWater],
            &board
        ));
    }

    #[test]
    fn data_spelling() {
        let p: Prerequisite = serde_json::from_str("\"None\"").unwrap();
        assert_eq!(p, Prerequisite::Always);
        let p: Prerequisite = serde_json::from_str(r#"{"MustBeOnTool":"Stove"}"#).unwrap();
        assert_eq!(p, Prerequisite::MustBeOnTool(ToolType::Stove));
    }
}
