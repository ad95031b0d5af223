//! Recipe application.
//!
//! The engine trusts its caller: preconditions are the resolver's job and
//! are not re-checked here.

use crate::fixed::Ticks;
use crate::item::ItemInstance;
use crate::recipe::RecipeDef;
use crate::registry::Registry;
use crate::tool::ToolState;

/// Result of applying one recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// The item after processing (identity may have changed).
    pub item: ItemInstance,
    /// True when the item identity was replaced.
    pub transformed: bool,
    /// Nominal processing time, for the presentation layer to animate.
    pub duration: Ticks,
}

/// Applies recipes to items and tools.
#[derive(Debug, Clone, Copy)]
pub struct ProcessingEngine<'r> {
    registry: &'r Registry,
}

impl<'r> ProcessingEngine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Apply `recipe` to `item` held by `tool`.
    ///
    /// Transformation (output differs from input): the item becomes the
    /// output type starting from that type's default state plus the recipe
    /// delta, and the tool's first slot is removed and the new pair appended.
    ///
    /// In place (no output, or output equals input): the delta is merged
    /// into the item's state and into the tool's first slot, if any.
    pub fn apply(&self, recipe: &RecipeDef, item: &mut ItemInstance, tool: &mut ToolState) -> ApplyOutcome {
        let transformed = match recipe.output_item {
            Some(output) if output != item.item_type => {
                self.transform(recipe, output, item, tool);
                true
            }
            _ => {
                item.state.apply_state_changes(&recipe.output_state_changes);
                if let Some(slot) = tool.slot_mut(0) {
                    slot.state.apply_state_changes(&recipe.output_state_changes);
                }
                false
            }
        };

        tracing::debug!(
            recipe = %recipe.name,
            item = ?item.item_type,
            state = %item.state,
            transformed,
            "applied recipe"
        );

        ApplyOutcome {
            item: *item,
            transformed,
            duration: recipe.duration,
        }
    }

    /// Like [`apply`](Self::apply), but a missing recipe or item is a no-op.
    pub fn try_apply(
        &self,
        recipe: Option<&RecipeDef>,
        item: Option<&mut ItemInstance>,
        tool: &mut ToolState,
    ) -> Option<ApplyOutcome> {
        match (recipe, item) {
            (Some(recipe), Some(item)) => Some(self.apply(recipe, item, tool)),
            _ => None,
        }
    }

    /// Run a tool-only recipe's effect on `tool`.
    pub fn apply_tool_action(&self, recipe: &RecipeDef, tool: &mut ToolState) {
        if let Some(effect) = recipe.tool_effect {
            effect.apply(tool);
        }
        tracing::debug!(recipe = %recipe.name, tool = %tool.tool_type, "applied tool action");
    }

    fn transform(
        &self,
        recipe: &RecipeDef,
        output: crate::id::ItemTypeId,
        item: &mut ItemInstance,
        tool: &mut ToolState,
    ) {
        let mut state = match self.registry.default_state(output) {
            Some(state) => state,
            None => {
                tracing::warn!(?output, recipe = %recipe.name, "output item not registered, starting raw");
                Default::default()
            }
        };
        state.apply_state_changes(&recipe.output_state_changes);

        *item = ItemInstance {
            item_type: output,
            state,
        };

        tool.remove_item(0);
        if let Err(err) = tool.add_item(output, &state) {
            tracing::warn!(?output, tool = %tool.tool_type, %err, "transformed item not stored in tool");
        }
    }
}
