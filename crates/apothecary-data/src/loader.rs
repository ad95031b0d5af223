//! Resolution pipeline: reads data files, resolves name references, builds registry.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and deserialization
//! helpers, plus [`load_game_data`] which ties them together for a content
//! directory.

use crate::schema::{IllnessData, ItemData, RecipeData, Settings, ToolsData};
use apothecary_core::customer::{IllnessDef, IllnessTable};
use apothecary_core::dialogue::DialogueTable;
use apothecary_core::fixed::f64_to_fixed64;
use apothecary_core::id::ItemTypeId;
use apothecary_core::recipe::RecipeDef;
use apothecary_core::registry::{Registry, RegistryBuilder, RegistryError};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A name reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// The assembled registry failed validation.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(path, e)),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(path: &Path, toml_key: &str) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => {
            let table: toml::Value = toml::from_str(&content).map_err(|e| parse_error(path, e))?;
            let array = table
                .get(toml_key)
                .ok_or_else(|| parse_error(path, format!("missing key '{toml_key}' in TOML file")))?
                .clone();
            array
                .try_into()
                .map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

// ===========================================================================
// Name resolution helpers
// ===========================================================================

/// Look up a name in a map, returning an `UnresolvedRef` error if not found.
pub fn resolve_name<'a, V>(
    map: &'a HashMap<String, V>,
    name: &str,
    file: &Path,
    expected_kind: &'static str,
) -> Result<&'a V, DataLoadError> {
    map.get(name).ok_or_else(|| DataLoadError::UnresolvedRef {
        file: file.to_path_buf(),
        name: name.to_string(),
        expected_kind,
    })
}

/// Check whether a name already exists in a map, returning a `DuplicateName`
/// error if so.
pub fn check_duplicate<V>(map: &HashMap<String, V>, name: &str, file: &Path) -> Result<(), DataLoadError> {
    if map.contains_key(name) {
        Err(DataLoadError::DuplicateName {
            file: file.to_path_buf(),
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

// ===========================================================================
// Pipeline
// ===========================================================================

/// Everything a session needs, loaded from one content directory.
#[derive(Debug)]
pub struct GameData {
    pub registry: Registry,
    pub illnesses: IllnessTable,
    pub dialogue: DialogueTable,
    pub settings: Settings,
}

/// Load a content directory.
///
/// `items` and `recipes` are required; `tools`, `illnesses`, `dialogue` and
/// `settings` fall back to empty/default when absent.
pub fn load_game_data(dir: &Path) -> Result<GameData, DataLoadError> {
    let settings = match find_data_file(dir, "settings")? {
        Some(path) => deserialize_file::<Settings>(&path)?,
        None => Settings::default(),
    };

    let mut builder = RegistryBuilder::new();
    builder.set_default_tool_capacity(settings.default_tool_capacity);

    let items_path = require_data_file(dir, "items")?;
    let items = load_items(&mut builder, &items_path)?;

    let recipes_path = require_data_file(dir, "recipes")?;
    let recipe_count = load_recipes(&mut builder, &recipes_path, &items)?;

    if let Some(path) = find_data_file(dir, "tools")? {
        let tools: ToolsData = deserialize_file(&path)?;
        for tool in &tools.tools {
            builder.register_tool(tool.tool_type, tool.capacity);
        }
        for rule in &tools.interactions {
            builder.register_interaction(rule.target, rule.dragged, rule.effect);
        }
    }

    let registry = builder.build()?;

    let illnesses = match find_data_file(dir, "illnesses")? {
        Some(path) => load_illnesses(&path, &items)?,
        None => IllnessTable::new(),
    };

    let dialogue = match find_data_file(dir, "dialogue")? {
        Some(path) => deserialize_file::<DialogueTable>(&path)?,
        None => DialogueTable::new(),
    };

    tracing::info!(
        dir = %dir.display(),
        items = items.len(),
        recipes = recipe_count,
        illnesses = illnesses.len(),
        dialogue_keys = dialogue.len(),
        "loaded game data"
    );

    Ok(GameData {
        registry,
        illnesses,
        dialogue,
        settings,
    })
}

fn load_items(builder: &mut RegistryBuilder, path: &Path) -> Result<HashMap<String, ItemTypeId>, DataLoadError> {
    let items: Vec<ItemData> = deserialize_list(path, "items")?;
    let mut ids = HashMap::with_capacity(items.len());

    for item in items {
        check_duplicate(&ids, &item.name, path)?;
        let id = builder.register_item(&item.name, item.default_state);
        builder.mutate_item(&item.name, |def| {
            if let Some(display_name) = item.display_name {
                def.display_name = display_name;
            }
            if let Some(sprite_key) = item.sprite_key {
                def.sprite_key = sprite_key;
            }
        })?;
        ids.insert(item.name, id);
    }

    Ok(ids)
}

fn load_recipes(
    builder: &mut RegistryBuilder,
    path: &Path,
    items: &HashMap<String, ItemTypeId>,
) -> Result<usize, DataLoadError> {
    let recipes: Vec<RecipeData> = deserialize_list(path, "recipes")?;
    let mut seen: HashMap<String, ()> = HashMap::with_capacity(recipes.len());

    for data in &recipes {
        check_duplicate(&seen, &data.name, path)?;
        let input = data
            .input
            .as_deref()
            .map(|name| resolve_name(items, name, path, "item").copied())
            .transpose()?;
        let output = data
            .output
            .as_deref()
            .map(|name| resolve_name(items, name, path, "item").copied())
            .transpose()?;

        let mut recipe = RecipeDef::new(&data.name, input, data.tool, data.action);
        recipe.required_states = data.required_states;
        recipe.prerequisites = data.prerequisites.clone();
        recipe.output_item = output;
        recipe.output_state_changes = data.state_changes;
        recipe.duration = data.duration;
        recipe.tool_effect = data.tool_effect;
        builder.register_recipe(recipe);
        seen.insert(data.name.clone(), ());
    }

    Ok(recipes.len())
}

fn load_illnesses(path: &Path, items: &HashMap<String, ItemTypeId>) -> Result<IllnessTable, DataLoadError> {
    let data: Vec<IllnessData> = deserialize_list(path, "illnesses")?;
    let mut table = IllnessTable::new();
    let mut seen: HashMap<String, ()> = HashMap::with_capacity(data.len());

    for illness in data {
        check_duplicate(&seen, &illness.name, path)?;
        let cure_item = *resolve_name(items, &illness.cure, path, "item")?;
        let weight = f64_to_fixed64(illness.weight).ok_or_else(|| {
            parse_error(
                path,
                format!("illness '{}' has unrepresentable weight {}", illness.name, illness.weight),
            )
        })?;
        if illness.weight <= 0.0 {
            tracing::warn!(illness = %illness.name, weight = illness.weight, "illness can never be rolled");
        }
        let dialogue_key = illness.dialogue_key.unwrap_or_else(|| illness.name.clone());
        seen.insert(illness.name.clone(), ());
        table.register(IllnessDef {
            name: illness.name,
            weight,
            rarity: illness.rarity,
            cure_item,
            cure_state: illness.cure_state,
            dialogue_key,
        });
    }

    Ok(table)
}

// ===========================================================================
// Tests
// ===========================================================================
