//! Read-only views for the presentation layer.
//!
//! All types are owned copies -- no references into kitchen storage.

use crate::id::{ItemTypeId, ToolId, ToolType};
use crate::item::ItemInstance;
use crate::registry::Registry;
use crate::tool::ToolState;

/// How to draw one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub item_type: ItemTypeId,
    pub display_name: String,
    pub sprite_key: String,
    /// Comma-joined active treatments, or `Raw`.
    pub state_summary: String,
}

impl ItemSnapshot {
    pub fn of(registry: &Registry, item: &ItemInstance) -> Self {
        let (display_name, sprite_key) = match registry.get_item(item.item_type) {
            Some(def) => (def.display_name.clone(), def.sprite_key.clone()),
            None => {
                tracing::warn!(item = ?item.item_type, "snapshot of unregistered item");
                (String::new(), String::new())
            }
        };
        Self {
            item_type: item.item_type,
            display_name,
            sprite_key,
            state_summary: item.state.to_string(),
        }
    }
}

/// How to draw one tool and what it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSnapshot {
    pub id: ToolId,
    pub tool_type: ToolType,
    pub has_water: bool,
    pub is_heated: bool,
    pub attachments: Vec<ToolType>,
    /// Contents in slot order.
    pub contents: Vec<ItemSnapshot>,
}

impl ToolSnapshot {
    pub fn of(registry: &Registry, id: ToolId, tool: &ToolState) -> Self {
        Self {
            id,
            tool_type: tool.tool_type,
            has_water: tool.has_water,
            is_heated: tool.is_heated,
            attachments: tool.attachments().collect(),
            contents: tool
                .contents()
                .iter()
                .map(|c| {
                    ItemSnapshot::of(
                        registry,
                        &ItemInstance {
                            item_type: c.item,
                            state: c.state,
                        },
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryBuilder;
    use crate::state::{ProcessingState, StateFlag};

    #[test]
    fn item_snapshot_uses_display_data() {
        let mut b = RegistryBuilder::new();
        let ginger = b.register_item("ginger", ProcessingState::new());
        b.mutate_item("ginger", |d| d.display_name = "Ginger Root".to_string())
            .unwrap();
        let reg = b.build().unwrap();

        let mut item = ItemInstance::new(ginger);
        let snap = ItemSnapshot::of(&reg, &item);
        assert_eq!(snap.display_name, "Ginger Root");
        assert_eq!(snap.sprite_key, "ginger");
        assert_eq!(snap.state_summary, "Raw");

        item.state.set(StateFlag::Peeled, 1);
        item.state.set(StateFlag::Cut, 1);
        assert_eq!(ItemSnapshot::of(&reg, &item).state_summary, "Peeled, Cut");
    }

    #[test]
    fn tool_snapshot_lists_contents_in_order() {
        let mut b = RegistryBuilder::new();
        let ginger = b.register_item("ginger", ProcessingState::new());
        let mint = b.register_item("mint", ProcessingState::new());
        let reg = b.build().unwrap();

        let mut pot = ToolState::new(ToolType::Pot);
        pot.add_water();
        pot.attach_to_tool(ToolType::Stove);
        pot.add_item(ginger, &ProcessingState::new()).unwrap();
        pot.add_item(mint, &ProcessingState::new().with(StateFlag::Crushed, 1))
            .unwrap();

        let snap = ToolSnapshot::of(&reg, ToolId::default(), &pot);
        assert!(snap.has_water && snap.is_heated);
        assert_eq!(snap.attachments, vec![ToolType::Stove]);
        let names: Vec<_> = snap.contents.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["ginger", "mint"]);
        assert_eq!(snap.contents[1].state_summary, "Crushed");
    }
}
