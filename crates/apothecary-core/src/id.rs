use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    /// Identifies a tool instance spawned into a kitchen.
    pub struct ToolId;
}

/// Identifies an item type in the registry. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemTypeId(pub u32);

/// Identifies a recipe in the registry. Ids follow registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub u32);

/// Identifies an illness in an [`IllnessTable`](crate::customer::IllnessTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IllnessId(pub u32);

/// The closed set of tool kinds found in the kitchen.
///
/// `Unassigned` is the "no tool" marker. It is written as `"None"` in data
/// files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum ToolType {
    ChoppingBoard,
    Pot,
    Stove,
    Sink,
    Strainer,
    MortarAndPestle,
    TrashCan,
    #[default]
    #[serde(rename = "None")]
    Unassigned,
}

impl ToolType {
    pub const ALL: [ToolType; 8] = [
        ToolType::ChoppingBoard,
        ToolType::Pot,
        ToolType::Stove,
        ToolType::Sink,
        ToolType::Strainer,
        ToolType::MortarAndPestle,
        ToolType::TrashCan,
        ToolType::Unassigned,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolType::ChoppingBoard => "Chopping Board",
            ToolType::Pot => "Pot",
            ToolType::Stove => "Stove",
            ToolType::Sink => "Sink",
            ToolType::Strainer => "Strainer",
            ToolType::MortarAndPestle => "Mortar and Pestle",
            ToolType::TrashCan => "Trash Can",
            ToolType::Unassigned => "None",
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
