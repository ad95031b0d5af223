//! Cross-crate tests: load the bundled herbal content pack from `data/herbal`
//! and play it through the core kitchen.

use std::path::PathBuf;

use apothecary_core::customer::Customer;
use apothecary_core::id::*;
use apothecary_core::inventory::InventoryIndex;
use apothecary_core::item::ItemInstance;
use apothecary_core::kitchen::Kitchen;
use apothecary_core::reveal::{Reveal, RevealPhase};
use apothecary_core::rng::SimRng;
use apothecary_core::state::StateFlag;
use apothecary_data::{GameData, load_game_data};

fn content_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/herbal")
}

fn load() -> GameData {
    load_game_data(&content_dir()).unwrap()
}

#[test]
fn bundled_pack_loads() {
    let data = load();
    assert_eq!(data.registry.item_count(), 6);
    assert_eq!(data.registry.recipe_count(), 11);
    assert_eq!(data.illnesses.len(), 3);
    assert_eq!(data.settings.seed, 1234);
    assert_eq!(data.settings.reveal.auto_hide, Some(180));

    assert_eq!(data.registry.tool_capacity(ToolType::ChoppingBoard), 1);
    assert_eq!(data.registry.tool_capacity(ToolType::Pot), 4);

    // every illness has something to say
    for i in 0..data.illnesses.len() {
        let illness = data.illnesses.get(IllnessId(i as u32)).unwrap();
        assert_ne!(data.dialogue.line(&illness.dialogue_key, 0), "...");
    }
}

#[test]
fn mint_paste_for_insect_bite() {
    let data = load();
    let reg = &data.registry;
    let mut kitchen = Kitchen::new(reg);
    let mortar = kitchen.spawn_tool(ToolType::MortarAndPestle);

    let mut mint = ItemInstance::spawn(reg, reg.item_id("mint").unwrap());
    let menu = kitchen.on_item_dropped(&mint, mortar).unwrap();
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].label, "Crush");
    kitchen.on_action_selected(menu[0].recipe, &mut mint, mortar).unwrap();

    let menu = kitchen
        .resolver()
        .item_actions(mint.item_type, &mint.state, kitchen.tool(mortar).unwrap());
    let mix = menu.iter().find(|c| c.label == "Mix").unwrap();
    let outcome = kitchen.on_action_selected(mix.recipe, &mut mint, mortar).unwrap();
    assert!(outcome.transformed);
    assert_eq!(Some(mint.item_type), reg.item_id("mint_paste"));
    assert_eq!(mint.state.get(StateFlag::Complete), 1);

    let snap = kitchen.snapshot(mortar).unwrap();
    assert_eq!(snap.contents[0].display_name, "Mint Paste");

    let bite = data.illnesses.id_of("insect_bite").unwrap();
    let mut customer = Customer {
        illness: bite,
        served: false,
    };
    assert!(customer.serve(&data.illnesses, &mint));
}

#[test]
fn seeded_customers_repeat() {
    let data = load();
    let roll = |seed| {
        let mut rng = SimRng::new(seed);
        (0..20)
            .map(|_| Customer::arrive(&data.illnesses, &mut rng).unwrap().illness)
            .collect::<Vec<_>>()
    };
    assert_eq!(roll(data.settings.seed), roll(data.settings.seed));
}

#[test]
fn greeting_bubble_hides_itself() {
    let data = load();
    let line = data.dialogue.line("greeting", 0);
    let mut bubble = Reveal::new(data.settings.reveal);
    bubble.start(line.chars().count());

    let typed = 8 + 2 * line.chars().count() as u64;
    assert_eq!(bubble.tick(typed).phase, RevealPhase::Shown);
    assert_eq!(bubble.tick(179).phase, RevealPhase::Shown);
    let frame = bubble.tick(1);
    assert_eq!(frame.phase, RevealPhase::Idle);
    assert!(!frame.visible);
}

#[test]
fn inventory_keys_follow_item_names() {
    let data = load();
    let mut inventory = InventoryIndex::new();
    inventory.set_quantity("Ginger", 3);
    inventory.set_quantity("mint_leaves", 5);
    inventory.add_remap("mint", "mint_leaves");

    let ginger = data.registry.get_item(data.registry.item_id("ginger").unwrap()).unwrap();
    assert_eq!(inventory.quantity(&ginger.name), 3);
    let mint = data.registry.get_item(data.registry.item_id("mint").unwrap()).unwrap();
    assert_eq!(inventory.quantity(&mint.name), 5);
    assert_eq!(inventory.quantity("chamomile"), 0);
}
