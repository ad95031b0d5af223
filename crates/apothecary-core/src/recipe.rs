//! Declarative recipe rules.
//!
//! A [`RecipeDef`] never mutates anything on its own. Matching lives in
//! [`resolver`](crate::resolver), application in [`engine`](crate::engine).

use crate::fixed::Ticks;
use crate::id::{ItemTypeId, ToolType};
use crate::prerequisite::Prerequisite;
use crate::state::ProcessingState;
use crate::tool::ToolState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The verb a recipe performs. Drives the menu label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Peel,
    Cut,
    Crush,
    Boil,
    Strain,
    Wash,
    Mix,
    AddWater,
    PourOut,
    Discard,
}

impl ActionType {
    pub fn label(self) -> &'static str {
        match self {
            ActionType::Peel => "Peel",
            ActionType::Cut => "Cut",
            ActionType::Crush => "Crush",
            ActionType::Boil => "Boil",
            ActionType::Strain => "Strain",
            ActionType::Wash => "Wash",
            ActionType::Mix => "Mix",
            ActionType::AddWater => "Add Water",
            ActionType::PourOut => "Pour Out",
            ActionType::Discard => "Discard",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a tool-only recipe does to the tool itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolEffect {
    AddWater,
    RemoveWater,
    EmptyContents,
}

impl ToolEffect {
    pub fn apply(self, tool: &mut ToolState) {
        match self {
            ToolEffect::AddWater => tool.add_water(),
            ToolEffect::RemoveWater => tool.remove_water(),
            ToolEffect::EmptyContents => {
                tool.clear_contents();
            }
        }
    }
}

/// A recipe definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDef {
    pub name: String,
    /// `None` marks a tool-only action (e.g. filling a pot).
    pub input_item: Option<ItemTypeId>,
    pub required_states: ProcessingState,
    pub required_tool: ToolType,
    pub action: ActionType,
    pub prerequisites: Vec<Prerequisite>,
    /// `None` or the input item itself means an in-place state update.
    pub output_item: Option<ItemTypeId>,
    pub output_state_changes: ProcessingState,
    pub duration: Ticks,
    pub tool_effect: Option<ToolEffect>,
}

impl RecipeDef {
    /// A recipe acting on `input` at `tool`, with no requirements yet.
    pub fn new(name: &str, input: Option<ItemTypeId>, tool: ToolType, action: ActionType) -> Self {
        Self {
            name: name.to_string(),
            input_item: input,
            required_states: ProcessingState::default(),
            required_tool: tool,
            action,
            prerequisites: Vec::new(),
            output_item: None,
            output_state_changes: ProcessingState::default(),
            duration: 0,
            tool_effect: None,
        }
    }

    pub fn is_tool_only(&self) -> bool {
        self.input_item.is_none()
    }

    /// Whether applying this recipe to `input` replaces the item identity.
    pub fn transforms(&self, input: ItemTypeId) -> bool {
        matches!(self.output_item, Some(out) if out != input)
    }

    /// Menu label shown to the player.
    pub fn label(&self) -> &'static str {
        self.action.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_only_recipes_have_no_input() {
        let fill = RecipeDef::new("fill_pot", None, ToolType::Pot, ActionType::AddWater);
        assert!(fill.is_tool_only());
        let cut = RecipeDef::new("cut_ginger", Some(ItemTypeId(0)), ToolType::ChoppingBoard, ActionType::Cut);
        assert!(!cut.is_tool_only());
    }

    #[test]
    fn transforms_only_when_output_differs() {
        let ginger = ItemTypeId(0);
        let tea = ItemTypeId(1);
        let mut recipe = RecipeDef::new("boil", Some(ginger), ToolType::Pot, ActionType::Boil);
        assert!(!recipe.transforms(ginger));
        recipe.output_item = Some(ginger);
        assert!(!recipe.transforms(ginger));
        recipe.output_item = Some(tea);
        assert!(recipe.transforms(ginger));
    }

    #[test]
    fn tool_effects() {
        let mut pot = ToolState::new(ToolType::Pot);
        ToolEffect::AddWater.apply(&mut pot);
        assert!(pot.has_water);
        pot.add_item(ItemTypeId(3), &ProcessingState::new()).unwrap();
        ToolEffect::EmptyContents.apply(&mut pot);
        assert!(pot.is_empty());
        ToolEffect::RemoveWater.apply(&mut pot);
        assert!(!pot.has_water);
    }

    #[test]
    fn labels() {
        assert_eq!(ActionType::AddWater.label(), "Add Water");
        assert_eq!(ActionType::Crush.to_string(), "Crush");
    }
}
