//! Serde data file structs for kitchen content definitions.
//!
//! These structs define the on-disk format for items, recipes, tools,
//! illnesses and settings. They are deserialized from RON, JSON, or TOML
//! data files and then resolved into engine types by the loader. Items are
//! referenced by name; the loader turns names into IDs.

use apothecary_core::id::ToolType;
use apothecary_core::prerequisite::Prerequisite;
use apothecary_core::recipe::{ActionType, ToolEffect};
use apothecary_core::registry::InteractionEffect;
use apothecary_core::reveal::RevealConfig;
use apothecary_core::state::ProcessingState;
use apothecary_core::tool::DEFAULT_TOOL_CAPACITY;
use apothecary_core::weighted::Rarity;
use serde::Deserialize;

// ===========================================================================
// Items
// ===========================================================================

/// An item type definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemData {
    pub name: String,
    /// Defaults to `name`.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Defaults to `name`.
    #[serde(default)]
    pub sprite_key: Option<String>,
    #[serde(default)]
    pub default_state: ProcessingState,
}

// ===========================================================================
// Recipes
// ===========================================================================

/// A recipe definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeData {
    pub name: String,
    /// Absent for tool-only actions.
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub required_states: ProcessingState,
    pub tool: ToolType,
    pub action: ActionType,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub state_changes: ProcessingState,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub tool_effect: Option<ToolEffect>,
}

// ===========================================================================
// Tools
// ===========================================================================

/// Per-tool-type capacity override.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolData {
    pub tool_type: ToolType,
    pub capacity: usize,
}

/// One tool-on-tool rule.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionData {
    pub target: ToolType,
    pub dragged: ToolType,
    pub effect: InteractionEffect,
}

/// Contents of the `tools` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolsData {
    pub tools: Vec<ToolData>,
    pub interactions: Vec<InteractionData>,
}

// ===========================================================================
// Illnesses
// ===========================================================================

/// An illness definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct IllnessData {
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub rarity: Rarity,
    /// Item name of the remedy.
    pub cure: String,
    #[serde(default)]
    pub cure_state: ProcessingState,
    /// Defaults to `name`.
    #[serde(default)]
    pub dialogue_key: Option<String>,
}

// ===========================================================================
// Settings
// ===========================================================================

/// Session tunables. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for customer illness rolls.
    pub seed: u64,
    /// Capacity for tool types without an override.
    pub default_tool_capacity: usize,
    pub reveal: RevealConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            default_tool_capacity: DEFAULT_TOOL_CAPACITY,
            reveal: RevealConfig::default(),
        }
    }
}

// ===========================================================================
// TOML wrappers (TOML does not support top-level arrays)
// ===========================================================================

/// Wrapper for a list of items in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlItems {
    pub items: Vec<ItemData>,
}

/// Wrapper for a list of recipes in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlRecipes {
    pub recipes: Vec<RecipeData>,
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use apothecary_core::state::StateFlag;

    #[test]
    fn item_minimal_ron() {
        let item: ItemData = ron::from_str(r#"(name: "ginger")"#).unwrap();
        assert_eq!(item.name, "ginger");
        assert!(item.display_name.is_none());
        assert!(item.default_state.is_raw());
    }

    #[test]
    fn items_toml_wrapper() {
        let wrapper: TomlItems = toml::from_str(
            r#"
[[items]]
name = "ginger"

[[items]]
name = "dried_mint"
default_state = { washed = 1 }
"#,
        )
        .unwrap();
        assert_eq!(wrapper.items.len(), 2);
        assert_eq!(wrapper.items[1].default_state.get(StateFlag::Washed), 1);
    }

    #[test]
    fn item_with_default_state_json() {
        let item: ItemData = serde_json::from_str(
            r#"{"name": "dried_mint", "display_name": "Dried Mint", "default_state": {"washed": 1}}"#,
        )
        .unwrap();
        assert_eq!(item.display_name.as_deref(), Some("Dried Mint"));
        assert_eq!(item.default_state.get(StateFlag::Washed), 1);
    }

    #[test]
    fn recipe_full_ron() {
        let ron_str = r#"(
            name: "boil_ginger",
            input: Some("ginger"),
            required_states: (cut: 1),
            tool: Pot,
            action: Boil,
            prerequisites: [MustHaveWater, MustBeHeated, MustBeOnTool(Stove)],
            output: Some("ginger_tea"),
            state_changes: (boiled: 1),
            duration: 120,
        )"#;
        let recipe: RecipeData = ron::from_str(ron_str).unwrap();
        assert_eq!(recipe.tool, ToolType::Pot);
        assert_eq!(recipe.action, ActionType::Boil);
        assert_eq!(recipe.prerequisites.len(), 3);
        assert_eq!(recipe.prerequisites[2], Prerequisite::MustBeOnTool(ToolType::Stove));
        assert_eq!(recipe.required_states.get(StateFlag::Cut), 1);
        assert_eq!(recipe.output.as_deref(), Some("ginger_tea"));
        assert!(recipe.tool_effect.is_none());
    }

    #[test]
    fn tool_only_recipe_toml() {
        let toml_str = r#"
[[recipes]]
name = "fill_pot"
tool = "Pot"
action = "AddWater"
prerequisites = ["MustBeEmpty"]
tool_effect = "AddWater"
"#;
        let wrapper: TomlRecipes = toml::from_str(toml_str).unwrap();
        let fill = &wrapper.recipes[0];
        assert!(fill.input.is_none());
        assert_eq!(fill.tool_effect, Some(ToolEffect::AddWater));
        assert_eq!(fill.duration, 0);
    }

    #[test]
    fn none_spellings_parse() {
        let recipe: RecipeData = serde_json::from_str(
            r#"{"name": "idle", "tool": "None", "action": "Mix", "prerequisites": ["None"]}"#,
        )
        .unwrap();
        assert_eq!(recipe.tool, ToolType::Unassigned);
        assert_eq!(recipe.prerequisites, vec![Prerequisite::Always]);
    }

    #[test]
    fn tools_file_json() {
        let tools: ToolsData = serde_json::from_str(
            r#"{
                "tools": [{"tool_type": "ChoppingBoard", "capacity": 1}],
                "interactions": [{"target": "Stove", "dragged": "Pot", "effect": "Attach"}]
            }"#,
        )
        .unwrap();
        assert_eq!(tools.tools[0].capacity, 1);
        assert_eq!(tools.interactions[0].effect, InteractionEffect::Attach);
    }

    #[test]
    fn illness_defaults() {
        let illness: IllnessData =
            serde_json::from_str(r#"{"name": "cold", "weight": 2.5, "cure": "ginger_tea"}"#).unwrap();
        assert_eq!(illness.rarity, Rarity::Common);
        assert!(illness.cure_state.is_raw());
        assert!(illness.dialogue_key.is_none());
    }

    #[test]
    fn settings_partial_toml() {
        let settings: Settings = toml::from_str(
            r#"
seed = 7

[reveal]
ticks_per_char = 3
"#,
        )
        .unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.default_tool_capacity, DEFAULT_TOOL_CAPACITY);
        assert_eq!(settings.reveal.ticks_per_char, 3);
        assert_eq!(settings.reveal.pop_ticks, RevealConfig::default().pop_ticks);
    }
}
