//! The in-process boundary the input layer talks to.
//!
//! A [`Kitchen`] owns every tool instance of a session and routes drop and
//! selection events to the resolver and the engine. What is being dragged
//! is decided when the drag starts ([`DragPayload`]), so a drop never has
//! to probe what it received.

use crate::engine::{ApplyOutcome, ProcessingEngine};
use crate::id::{ItemTypeId, RecipeId, ToolId, ToolType};
use crate::item::ItemInstance;
use crate::query::ToolSnapshot;
use crate::registry::{InteractionEffect, Registry};
use crate::resolver::{ActionChoice, RecipeResolver};
use crate::tool::{ToolError, ToolState};
use slotmap::SlotMap;

/// What the player is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    Item(ItemInstance),
    Tool(ToolId),
}

/// Result of a drop onto a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// An item landed in the tool; these actions are now legal.
    Actions(Vec<ActionChoice>),
    /// A tool landed on the tool; the table effect that ran, if any.
    Interaction(Option<InteractionEffect>),
}

#[derive(Debug, thiserror::Error)]
pub enum KitchenError {
    #[error("unknown tool: {0:?}")]
    UnknownTool(ToolId),
    #[error("unknown recipe: {0:?}")]
    UnknownRecipe(RecipeId),
    #[error("unknown item type: {0:?}")]
    UnknownItem(ItemTypeId),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// One cooking session: tool instances plus the shared registry.
#[derive(Debug)]
pub struct Kitchen<'r> {
    registry: &'r Registry,
    tools: SlotMap<ToolId, ToolState>,
}

impl<'r> Kitchen<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            tools: SlotMap::with_key(),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn resolver(&self) -> RecipeResolver<'r> {
        RecipeResolver::new(self.registry)
    }

    pub fn engine(&self) -> ProcessingEngine<'r> {
        ProcessingEngine::new(self.registry)
    }

    /// Place a new tool. Its capacity comes from the registry.
    pub fn spawn_tool(&mut self, tool_type: ToolType) -> ToolId {
        let capacity = self.registry.tool_capacity(tool_type);
        self.tools
            .insert(ToolState::with_capacity(tool_type, capacity))
    }

    pub fn remove_tool(&mut self, id: ToolId) -> Option<ToolState> {
        self.tools.remove(id)
    }

    pub fn tool(&self, id: ToolId) -> Option<&ToolState> {
        self.tools.get(id)
    }

    pub fn tool_mut(&mut self, id: ToolId) -> Option<&mut ToolState> {
        self.tools.get_mut(id)
    }

    pub fn tools(&self) -> impl Iterator<Item = (ToolId, &ToolState)> {
        self.tools.iter()
    }

    pub fn snapshot(&self, id: ToolId) -> Result<ToolSnapshot, KitchenError> {
        let tool = self.tools.get(id).ok_or(KitchenError::UnknownTool(id))?;
        Ok(ToolSnapshot::of(self.registry, id, tool))
    }

    /// Dispatch a finished drag onto `target`.
    pub fn on_drop(&mut self, payload: DragPayload, target: ToolId) -> Result<DropOutcome, KitchenError> {
        match payload {
            DragPayload::Item(item) => self.on_item_dropped(&item, target).map(DropOutcome::Actions),
            DragPayload::Tool(dragged) => self
                .on_tool_dropped(dragged, target)
                .map(DropOutcome::Interaction),
        }
    }

    /// The tool takes a copy of `item` and the legal actions are returned.
    pub fn on_item_dropped(&mut self, item: &ItemInstance, target: ToolId) -> Result<Vec<ActionChoice>, KitchenError> {
        let registry = self.registry;
        let tool = self
            .tools
            .get_mut(target)
            .ok_or(KitchenError::UnknownTool(target))?;
        if registry.get_item(item.item_type).is_none() {
            return Err(KitchenError::UnknownItem(item.item_type));
        }
        tool.add_item(item.item_type, &item.state)?;
        Ok(RecipeResolver::new(registry).item_actions(item.item_type, &item.state, tool))
    }

    /// Run the tool-on-tool rule for (`target` type, `dragged` type).
    pub fn on_tool_dropped(
        &mut self,
        dragged: ToolId,
        target: ToolId,
    ) -> Result<Option<InteractionEffect>, KitchenError> {
        let target_type = self
            .tools
            .get(target)
            .ok_or(KitchenError::UnknownTool(target))?
            .tool_type;
        let dragged_type = self
            .tools
            .get(dragged)
            .ok_or(KitchenError::UnknownTool(dragged))?
            .tool_type;
        if dragged == target {
            return Ok(None);
        }

        let Some(effect) = self.registry.interaction(target_type, dragged_type) else {
            tracing::debug!(%dragged_type, %target_type, "no tool interaction");
            return Ok(None);
        };

        match effect {
            InteractionEffect::Attach => self.tools[dragged].attach_to_tool(target_type),
            InteractionEffect::Detach => self.tools[dragged].detach_from_tool(target_type),
            InteractionEffect::PourInto => self.pour(dragged, target),
        }
        tracing::debug!(%dragged_type, %target_type, ?effect, "tool interaction");
        Ok(Some(effect))
    }

    /// The player picked `tool` up off whatever it sat on. Every attachment
    /// is released, along with the flags it provided. Pouring alone leaves
    /// attachments in place. Returns the tool types it was lifted from.
    pub fn on_tool_lifted(&mut self, tool: ToolId) -> Result<Vec<ToolType>, KitchenError> {
        let state = self
            .tools
            .get_mut(tool)
            .ok_or(KitchenError::UnknownTool(tool))?;
        let released = state.detach_all();
        if !released.is_empty() {
            tracing::debug!(tool = %state.tool_type, ?released, "tool lifted");
        }
        Ok(released)
    }

    /// Apply a chosen item recipe to `item` held in `tool`.
    pub fn on_action_selected(
        &mut self,
        recipe: RecipeId,
        item: &mut ItemInstance,
        tool: ToolId,
    ) -> Result<ApplyOutcome, KitchenError> {
        let registry = self.registry;
        let def = registry
            .get_recipe(recipe)
            .ok_or(KitchenError::UnknownRecipe(recipe))?;
        let state = self
            .tools
            .get_mut(tool)
            .ok_or(KitchenError::UnknownTool(tool))?;
        Ok(ProcessingEngine::new(registry).apply(def, item, state))
    }

    /// Actions on the tool itself (e.g. filling a pot).
    pub fn tool_actions(&self, tool: ToolId) -> Result<Vec<ActionChoice>, KitchenError> {
        let state = self.tools.get(tool).ok_or(KitchenError::UnknownTool(tool))?;
        Ok(self.resolver().tool_actions(state))
    }

    /// Apply a chosen tool-only recipe.
    pub fn on_tool_action_selected(&mut self, recipe: RecipeId, tool: ToolId) -> Result<(), KitchenError> {
        let registry = self.registry;
        let def = registry
            .get_recipe(recipe)
            .ok_or(KitchenError::UnknownRecipe(recipe))?;
        let state = self
            .tools
            .get_mut(tool)
            .ok_or(KitchenError::UnknownTool(tool))?;
        ProcessingEngine::new(registry).apply_tool_action(def, state);
        Ok(())
    }

    /// Lift the item at `index` back out of `tool`. Out-of-range indices are
    /// ignored.
    pub fn pick_up(&mut self, tool: ToolId, index: usize) -> Result<Option<ItemInstance>, KitchenError> {
        let state = self
            .tools
            .get_mut(tool)
            .ok_or(KitchenError::UnknownTool(tool))?;
        Ok(state.remove_item(index).map(|c| ItemInstance {
            item_type: c.item,
            state: c.state,
        }))
    }

    /// Move contents front-first from `from` into `to` until `to` is full.
    /// Whatever does not fit stays behind in order.
    fn pour(&mut self, from: ToolId, to: ToolId) {
        let poured = self.tools[from].clear_contents();
        let mut leftovers = Vec::new();
        for entry in poured {
            if !leftovers.is_empty() || self.tools[to].add_item(entry.item, &entry.state).is_err() {
                leftovers.push(entry);
            }
        }
        if !leftovers.is_empty() {
            tracing::warn!(kept = leftovers.len(), "pour target full");
        }
        for entry in leftovers {
            // Room is guaranteed: these slots were just vacated.
            let _ = self.tools[from].add_item(entry.item, &entry.state);
        }
    }
}
