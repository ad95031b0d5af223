use crate::id::*;
use crate::recipe::RecipeDef;
use crate::state::ProcessingState;
use crate::tool::DEFAULT_TOOL_CAPACITY;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// An item type definition in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTypeDef {
    pub name: String,
    pub display_name: String,
    pub sprite_key: String,
    /// Canonical state a fresh instance of this item starts from.
    pub default_state: ProcessingState,
}

/// Per-tool-type settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDef {
    pub tool_type: ToolType,
    pub capacity: usize,
}

/// What happens when one tool is dropped onto another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionEffect {
    /// The dragged tool attaches to the target (a pot placed on the stove).
    Attach,
    /// The dragged tool detaches from the target.
    Detach,
    /// The dragged tool's contents move into the target, front first.
    PourInto,
}

/// One row of the tool-on-tool table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolInteraction {
    pub target: ToolType,
    pub dragged: ToolType,
    pub effect: InteractionEffect,
}

/// Builder for constructing an immutable Registry.
/// Three-phase lifecycle: registration -> mutation -> finalization.
#[derive(Debug)]
pub struct RegistryBuilder {
    items: Vec<ItemTypeDef>,
    item_name_to_id: HashMap<String, ItemTypeId>,
    recipes: Vec<RecipeDef>,
    recipe_name_to_id: HashMap<String, RecipeId>,
    tools: BTreeMap<ToolType, ToolDef>,
    interactions: Vec<ToolInteraction>,
    default_tool_capacity: usize,
    duplicates: Vec<String>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            item_name_to_id: HashMap::new(),
            recipes: Vec::new(),
            recipe_name_to_id: HashMap::new(),
            tools: BTreeMap::new(),
            interactions: Vec::new(),
            default_tool_capacity: DEFAULT_TOOL_CAPACITY,
            duplicates: Vec::new(),
        }
    }

    /// Phase 1: Register an item type. Returns its ID.
    pub fn register_item(&mut self, name: &str, default_state: ProcessingState) -> ItemTypeId {
        let id = ItemTypeId(self.items.len() as u32);
        self.items.push(ItemTypeDef {
            name: name.to_string(),
            display_name: name.to_string(),
            sprite_key: name.to_string(),
            default_state,
        });
        if self.item_name_to_id.insert(name.to_string(), id).is_some() {
            self.duplicates.push(name.to_string());
        }
        id
    }

    /// Phase 1: Register a recipe. Returns its ID. Registration order is the
    /// order the resolver reports matches in.
    pub fn register_recipe(&mut self, recipe: RecipeDef) -> RecipeId {
        let id = RecipeId(self.recipes.len() as u32);
        if self
            .recipe_name_to_id
            .insert(recipe.name.clone(), id)
            .is_some()
        {
            self.duplicates.push(recipe.name.clone());
        }
        self.recipes.push(recipe);
        id
    }

    /// Phase 1: Set the contents capacity for a tool type.
    pub fn register_tool(&mut self, tool_type: ToolType, capacity: usize) {
        self.tools.insert(tool_type, ToolDef { tool_type, capacity });
    }

    /// Phase 1: Add a tool-on-tool rule. A later rule for the same pair
    /// replaces the earlier one.
    pub fn register_interaction(
        &mut self,
        target: ToolType,
        dragged: ToolType,
        effect: InteractionEffect,
    ) {
        self.interactions
            .retain(|i| !(i.target == target && i.dragged == dragged));
        self.interactions.push(ToolInteraction {
            target,
            dragged,
            effect,
        });
    }

    /// Capacity used for tool types without a [`register_tool`](Self::register_tool) entry.
    pub fn set_default_tool_capacity(&mut self, capacity: usize) {
        self.default_tool_capacity = capacity;
    }

    /// Phase 2: Mutate an existing item type by name.
    pub fn mutate_item<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut ItemTypeDef),
    {
        let id = self
            .item_name_to_id
            .get(name)
            .ok_or(RegistryError::NotFound(name.to_string()))?;
        f(&mut self.items[id.0 as usize]);
        Ok(())
    }

    /// Phase 2: Mutate an existing recipe by name.
    pub fn mutate_recipe<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut RecipeDef),
    {
        let id = self
            .recipe_name_to_id
            .get(name)
            .ok_or(RegistryError::NotFound(name.to_string()))?;
        f(&mut self.recipes[id.0 as usize]);
        Ok(())
    }

    /// Lookup item type ID by name.
    pub fn item_id(&self, name: &str) -> Option<ItemTypeId> {
        self.item_name_to_id.get(name).copied()
    }

    /// Lookup recipe ID by name.
    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    /// Returns a reference to a recipe definition by its ID.
    pub fn get_recipe(&self, id: RecipeId) -> Option<&RecipeDef> {
        self.recipes.get(id.0 as usize)
    }

    /// Phase 3: Finalize and build the immutable registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        if let Some(name) = self.duplicates.into_iter().next() {
            return Err(RegistryError::DuplicateName(name));
        }

        // Validate: all recipe item references must exist
        for recipe in &self.recipes {
            for item in recipe.input_item.iter().chain(recipe.output_item.iter()) {
                if item.0 as usize >= self.items.len() {
                    return Err(RegistryError::InvalidItemRef(*item));
                }
            }
        }

        if self.default_tool_capacity == 0 {
            return Err(RegistryError::ZeroCapacity(ToolType::Unassigned));
        }
        if let Some(def) = self.tools.values().find(|d| d.capacity == 0) {
            return Err(RegistryError::ZeroCapacity(def.tool_type));
        }

        let mut recipes_by_tool: HashMap<ToolType, Vec<RecipeId>> = HashMap::new();
        for (i, recipe) in self.recipes.iter().enumerate() {
            recipes_by_tool
                .entry(recipe.required_tool)
                .or_default()
                .push(RecipeId(i as u32));
        }

        Ok(Registry {
            items: self.items,
            item_name_to_id: self.item_name_to_id,
            recipes: self.recipes,
            recipe_name_to_id: self.recipe_name_to_id,
            recipes_by_tool,
            tools: self.tools,
            interactions: self.interactions,
            default_tool_capacity: self.default_tool_capacity,
        })
    }
}

/// Immutable registry. Frozen after build(). Shared by reference with the
/// resolver, the engine and every kitchen session.
#[derive(Debug)]
pub struct Registry {
    items: Vec<ItemTypeDef>,
    item_name_to_id: HashMap<String, ItemTypeId>,
    recipes: Vec<RecipeDef>,
    recipe_name_to_id: HashMap<String, RecipeId>,
    recipes_by_tool: HashMap<ToolType, Vec<RecipeId>>,
    tools: BTreeMap<ToolType, ToolDef>,
    interactions: Vec<ToolInteraction>,
    default_tool_capacity: usize,
}

impl Registry {
    pub fn get_item(&self, id: ItemTypeId) -> Option<&ItemTypeDef> {
        self.items.get(id.0 as usize)
    }

    pub fn get_recipe(&self, id: RecipeId) -> Option<&RecipeDef> {
        self.recipes.get(id.0 as usize)
    }

    pub fn item_id(&self, name: &str) -> Option<ItemTypeId> {
        self.item_name_to_id.get(name).copied()
    }

    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    /// All recipes in registration order.
    pub fn recipes(&self) -> &[RecipeDef] {
        &self.recipes
    }

    /// Recipes requiring `tool`, in registration order.
    pub fn recipe_ids_for_tool(&self, tool: ToolType) -> &[RecipeId] {
        self.recipes_by_tool
            .get(&tool)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The canonical starting state of an item type.
    pub fn default_state(&self, id: ItemTypeId) -> Option<ProcessingState> {
        self.get_item(id).map(|item| item.default_state)
    }

    pub fn tool_capacity(&self, tool: ToolType) -> usize {
        self.tools
            .get(&tool)
            .map(|def| def.capacity)
            .unwrap_or(self.default_tool_capacity)
    }

    /// Effect of dropping a `dragged` tool onto a `target` tool.
    pub fn interaction(&self, target: ToolType, dragged: ToolType) -> Option<InteractionEffect> {
        self.interactions
            .iter()
            .find(|i| i.target == target && i.dragged == dragged)
            .map(|i| i.effect)
    }

    pub fn interactions(&self) -> &[ToolInteraction] {
        &self.interactions
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid item reference: {0:?}")]
    InvalidItemRef(ItemTypeId),
    #[error("duplicate name: {0}")]
    DuplicateName(String),
    #[error("zero contents capacity for tool {0}")]
    ZeroCapacity(ToolType),
}
