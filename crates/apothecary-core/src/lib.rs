//! Apothecary Core -- the rules engine for a drag-and-drop herbal kitchen.
//!
//! This crate decides which preparation steps are legal for an item sitting
//! in a tool, applies the chosen step, and tracks the tools themselves
//! (water, heat, attachments, contents). Customers, weighted illness rolls,
//! dialogue lookup and the speech-bubble reveal live here too. Nothing in
//! this crate draws or animates; presentation reads snapshots.
//!
//! # Interaction Flow
//!
//! 1. **Drop** -- An item is dropped on a tool; the tool stores a copy.
//! 2. **Resolve** -- Legal recipes are those matching item, tool type,
//!    prerequisites, and minimum processing state.
//! 3. **Select** -- The player picks an action from the menu.
//! 4. **Apply** -- The engine merges the state delta, or swaps the item for
//!    the recipe output.
//! 5. **Lift** -- Picking a tool up releases its attachments; a pot taken
//!    off the stove stops being heated.
//!
//! ```rust,ignore
//! let mut kitchen = Kitchen::new(&registry);
//! let board = kitchen.spawn_tool(ToolType::ChoppingBoard);
//! let menu = kitchen.on_item_dropped(&ginger, board)?;
//! let outcome = kitchen.on_action_selected(menu[0].recipe, &mut ginger, board)?;
//! ```
//!
//! # Key Types
//!
//! - [`registry::Registry`] -- Immutable items, recipes, tool capacities and
//!   tool-on-tool rules (frozen at startup).
//! - [`state::ProcessingState`] -- Per-item counters (peeled, cut, ...).
//! - [`tool::ToolState`] -- Mutable record of one tool instance.
//! - [`resolver::RecipeResolver`] -- Finds legal recipes.
//! - [`engine::ProcessingEngine`] -- Applies a recipe.
//! - [`kitchen::Kitchen`] -- Owns tool instances and routes drop events.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic weights.

pub mod customer;
pub mod dialogue;
pub mod engine;
pub mod fixed;
pub mod id;
pub mod inventory;
pub mod item;
pub mod kitchen;
pub mod prerequisite;
pub mod query;
pub mod recipe;
pub mod registry;
pub mod resolver;
pub mod reveal;
pub mod rng;
pub mod state;
pub mod tool;
pub mod weighted;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
