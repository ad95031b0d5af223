//! Recipe matching.
//!
//! Given an item, its state and a tool, report every recipe whose
//! preconditions hold, in registration order. Overlapping recipes are all
//! returned; picking one is the caller's (the player's) decision.
//!
//! A recipe matches an item query iff:
//!
//! 1. its input item is exactly the queried item (tool-only recipes never
//!    match an item query),
//! 2. the item state meets every nonzero required threshold,
//! 3. its required tool type equals the tool's type,
//! 4. every prerequisite holds for the tool.

use crate::id::{ItemTypeId, RecipeId};
use crate::prerequisite::all_satisfied;
use crate::recipe::RecipeDef;
use crate::registry::Registry;
use crate::state::ProcessingState;
use crate::tool::ToolState;

/// Scan `recipes` for those legal on `item` in `tool`.
pub fn find_legal_recipes<'a>(
    recipes: &'a [RecipeDef],
    item: ItemTypeId,
    state: &ProcessingState,
    tool: &ToolState,
) -> Vec<&'a RecipeDef> {
    recipes
        .iter()
        .filter(|recipe| matches_item(recipe, item, state, tool))
        .collect()
}

/// Scan `recipes` for tool-only actions legal on `tool`.
pub fn find_tool_only_recipes<'a>(recipes: &'a [RecipeDef], tool: &ToolState) -> Vec<&'a RecipeDef> {
    recipes
        .iter()
        .filter(|recipe| matches_tool_only(recipe, tool))
        .collect()
}

fn matches_item(recipe: &RecipeDef, item: ItemTypeId, state: &ProcessingState, tool: &ToolState) -> bool {
    recipe.input_item == Some(item)
        && state.has_required_states(&recipe.required_states)
        && recipe.required_tool == tool.tool_type
        && all_satisfied(&recipe.prerequisites, tool)
}

fn matches_tool_only(recipe: &RecipeDef, tool: &ToolState) -> bool {
    recipe.input_item.is_none()
        && recipe.required_tool == tool.tool_type
        && all_satisfied(&recipe.prerequisites, tool)
}

/// One entry of the action menu handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionChoice {
    pub label: String,
    pub recipe: RecipeId,
}

/// Registry-backed resolver. Only recipes indexed under the tool's type are
/// examined; results equal the full scan.
#[derive(Debug, Clone, Copy)]
pub struct RecipeResolver<'r> {
    registry: &'r Registry,
}

impl<'r> RecipeResolver<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn legal_recipes(
        &self,
        item: ItemTypeId,
        state: &ProcessingState,
        tool: &ToolState,
    ) -> Vec<RecipeId> {
        let found = self.candidates(tool, |recipe| matches_item(recipe, item, state, tool));
        tracing::debug!(?item, tool = %tool.tool_type, %state, matches = found.len(), "resolved item recipes");
        found
    }

    pub fn tool_only_recipes(&self, tool: &ToolState) -> Vec<RecipeId> {
        let found = self.candidates(tool, |recipe| matches_tool_only(recipe, tool));
        tracing::debug!(tool = %tool.tool_type, matches = found.len(), "resolved tool recipes");
        found
    }

    /// Menu entries for an item dropped on `tool`.
    pub fn item_actions(
        &self,
        item: ItemTypeId,
        state: &ProcessingState,
        tool: &ToolState,
    ) -> Vec<ActionChoice> {
        self.choices_for(self.legal_recipes(item, state, tool))
    }

    /// Menu entries for actions on `tool` itself.
    pub fn tool_actions(&self, tool: &ToolState) -> Vec<ActionChoice> {
        self.choices_for(self.tool_only_recipes(tool))
    }

    fn candidates<F>(&self, tool: &ToolState, mut keep: F) -> Vec<RecipeId>
    where
        F: FnMut(&RecipeDef) -> bool,
    {
        self.registry
            .recipe_ids_for_tool(tool.tool_type)
            .iter()
            .copied()
            .filter(|id| self.registry.get_recipe(*id).is_some_and(&mut keep))
            .collect()
    }

    fn choices_for(&self, ids: Vec<RecipeId>) -> Vec<ActionChoice> {
        ids.into_iter()
            .filter_map(|id| {
                self.registry.get_recipe(id).map(|recipe| ActionChoice {
                    label: recipe.label().to_string(),
                    recipe: id,
                })
            })
            .collect()
    }
}
