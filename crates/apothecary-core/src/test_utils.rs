//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::fixed::Fixed64;
use crate::id::*;
use crate::prerequisite::Prerequisite;
use crate::recipe::{ActionType, RecipeDef, ToolEffect};
use crate::registry::{InteractionEffect, Registry, RegistryBuilder};
use crate::state::{ProcessingState, StateFlag};
use crate::tool::ToolState;

// ===========================================================================
// Fixed-point helper
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

// ===========================================================================
// Herbal kitchen item types (registration order of `herbal_registry`)
// ===========================================================================

pub fn ginger() -> ItemTypeId {
    ItemTypeId(0)
}
pub fn ginger_tea() -> ItemTypeId {
    ItemTypeId(1)
}
pub fn chamomile() -> ItemTypeId {
    ItemTypeId(2)
}
pub fn chamomile_tea() -> ItemTypeId {
    ItemTypeId(3)
}
pub fn mint() -> ItemTypeId {
    ItemTypeId(4)
}

// ===========================================================================
// State helpers
// ===========================================================================

pub fn state(flags: &[(StateFlag, u32)]) -> ProcessingState {
    flags
        .iter()
        .fold(ProcessingState::new(), |s, &(flag, level)| s.with(flag, level))
}

pub fn cut() -> ProcessingState {
    state(&[(StateFlag::Cut, 1)])
}

// ===========================================================================
// Tool constructors
// ===========================================================================

/// A pot with water sitting on a stove.
pub fn hot_pot() -> ToolState {
    let mut pot = ToolState::new(ToolType::Pot);
    pot.add_water();
    pot.attach_to_tool(ToolType::Stove);
    pot
}

pub fn cold_pot() -> ToolState {
    let mut pot = ToolState::new(ToolType::Pot);
    pot.add_water();
    pot
}

// ===========================================================================
// Registry
// ===========================================================================

/// Ginger tea, chamomile tea and crushed mint, plus pot/strainer actions.
///
/// - ginger: peel (board) -> cut (board, peeled) -> boil (hot pot, cut) -> ginger_tea
/// - chamomile: wash (sink) -> boil (hot pot, washed) -> chamomile_tea
/// - mint: crush (mortar)
/// - ginger_tea: strain (strainer)
/// - pot: fill when empty, pour out when holding water
pub fn herbal_registry() -> Registry {
    let mut b = RegistryBuilder::new();
    let ginger = b.register_item("ginger", ProcessingState::new());
    let ginger_tea = b.register_item("ginger_tea", ProcessingState::new());
    let chamomile = b.register_item("chamomile", ProcessingState::new());
    let chamomile_tea = b.register_item("chamomile_tea", ProcessingState::new());
    b.register_item("mint", ProcessingState::new());

    let mut peel = RecipeDef::new("peel_ginger", Some(ginger), ToolType::ChoppingBoard, ActionType::Peel);
    peel.output_state_changes = state(&[(StateFlag::Peeled, 1)]);
    peel.duration = 30;
    b.register_recipe(peel);

    let mut cut_ginger = RecipeDef::new("cut_ginger", Some(ginger), ToolType::ChoppingBoard, ActionType::Cut);
    cut_ginger.required_states = state(&[(StateFlag::Peeled, 1)]);
    cut_ginger.output_state_changes = cut();
    cut_ginger.duration = 30;
    b.register_recipe(cut_ginger);

    let mut boil_ginger = RecipeDef::new("boil_ginger", Some(ginger), ToolType::Pot, ActionType::Boil);
    boil_ginger.required_states = cut();
    boil_ginger.prerequisites = vec![Prerequisite::MustHaveWater, Prerequisite::MustBeHeated];
    boil_ginger.output_item = Some(ginger_tea);
    boil_ginger.output_state_changes = state(&[(StateFlag::Boiled, 1)]);
    boil_ginger.duration = 120;
    b.register_recipe(boil_ginger);

    let mut strain = RecipeDef::new("strain_ginger_tea", Some(ginger_tea), ToolType::Strainer, ActionType::Strain);
    strain.required_states = state(&[(StateFlag::Boiled, 1)]);
    strain.output_state_changes = state(&[(StateFlag::Strained, 1), (StateFlag::Complete, 1)]);
    b.register_recipe(strain);

    let mut wash = RecipeDef::new("wash_chamomile", Some(chamomile), ToolType::Sink, ActionType::Wash);
    wash.output_state_changes = state(&[(StateFlag::Washed, 1)]);
    b.register_recipe(wash);

    let mut boil_chamomile = RecipeDef::new("boil_chamomile", Some(chamomile), ToolType::Pot, ActionType::Boil);
    boil_chamomile.required_states = state(&[(StateFlag::Washed, 1)]);
    boil_chamomile.prerequisites = vec![Prerequisite::MustHaveWater, Prerequisite::MustBeHeated];
    boil_chamomile.output_item = Some(chamomile_tea);
    boil_chamomile.output_state_changes = state(&[(StateFlag::Boiled, 1), (StateFlag::Complete, 1)]);
    b.register_recipe(boil_chamomile);

    let mut crush = RecipeDef::new("crush_mint", Some(ItemTypeId(4)), ToolType::MortarAndPestle, ActionType::Crush);
    crush.output_state_changes = state(&[(StateFlag::Crushed, 1)]);
    b.register_recipe(crush);

    let mut fill = RecipeDef::new("fill_pot", None, ToolType::Pot, ActionType::AddWater);
    fill.prerequisites = vec![Prerequisite::MustBeEmpty];
    fill.tool_effect = Some(ToolEffect::AddWater);
    b.register_recipe(fill);

    let mut pour = RecipeDef::new("pour_out_pot", None, ToolType::Pot, ActionType::PourOut);
    pour.prerequisites = vec![Prerequisite::MustHaveWater];
    pour.tool_effect = Some(ToolEffect::RemoveWater);
    b.register_recipe(pour);

    let mut discard = RecipeDef::new("empty_trash", None, ToolType::TrashCan, ActionType::Discard);
    discard.tool_effect = Some(ToolEffect::EmptyContents);
    b.register_recipe(discard);

    b.register_tool(ToolType::ChoppingBoard, 1);
    b.register_tool(ToolType::Strainer, 2);
    b.register_interaction(ToolType::Stove, ToolType::Pot, InteractionEffect::Attach);
    b.register_interaction(ToolType::Strainer, ToolType::Pot, InteractionEffect::PourInto);

    match b.build() {
        Ok(registry) => registry,
        Err(e) => panic!("herbal registry failed to build: {e}"),
    }
}
