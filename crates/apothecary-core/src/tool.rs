//! Mutable per-instance tool state: flags, attachments and contents.

use crate::id::{ItemTypeId, ToolType};
use crate::state::ProcessingState;
use std::collections::BTreeSet;

/// Contents capacity used when a tool type has no explicit capacity.
pub const DEFAULT_TOOL_CAPACITY: usize = 4;

// ---------------------------------------------------------------------------
// Attachment side effects
// ---------------------------------------------------------------------------

/// A tool flag that is derived from what the tool is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedFlag {
    Heated,
}

/// Attachment target -> flag raised while attached.
///
/// Only the stove has an effect today; new rows extend the attach path
/// without touching it.
const ATTACHMENT_EFFECTS: &[(ToolType, DerivedFlag)] = &[(ToolType::Stove, DerivedFlag::Heated)];

/// The derived flag raised by attaching to `target`, if any.
pub fn attachment_effect(target: ToolType) -> Option<DerivedFlag> {
    ATTACHMENT_EFFECTS
        .iter()
        .find(|(tool, _)| *tool == target)
        .map(|(_, flag)| *flag)
}

// ---------------------------------------------------------------------------
// Contents
// ---------------------------------------------------------------------------

/// One item held by a tool, with the tool's own copy of its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainedItem {
    pub item: ItemTypeId,
    pub state: ProcessingState,
}

/// Bounded, ordered list of contained items.
///
/// Item and state live in the same slot, so the two can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolContents {
    slots: Vec<ContainedItem>,
    capacity: usize,
}

impl ToolContents {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&ContainedItem> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ContainedItem> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContainedItem> {
        self.slots.iter()
    }

    fn push(&mut self, entry: ContainedItem) -> Result<usize, ToolError> {
        if self.is_full() {
            return Err(ToolError::ContentsFull {
                capacity: self.capacity,
            });
        }
        self.slots.push(entry);
        Ok(self.slots.len() - 1)
    }

    fn remove(&mut self, index: usize) -> Option<ContainedItem> {
        (index < self.slots.len()).then(|| self.slots.remove(index))
    }

    fn clear(&mut self) -> Vec<ContainedItem> {
        std::mem::take(&mut self.slots)
    }
}

// ---------------------------------------------------------------------------
// Tool state
// ---------------------------------------------------------------------------

/// Mutable record of one tool instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolState {
    pub tool_type: ToolType,
    pub has_water: bool,
    pub is_heated: bool,
    attachments: BTreeSet<ToolType>,
    contents: ToolContents,
}

impl ToolState {
    pub fn new(tool_type: ToolType) -> Self {
        Self::with_capacity(tool_type, DEFAULT_TOOL_CAPACITY)
    }

    pub fn with_capacity(tool_type: ToolType, capacity: usize) -> Self {
        Self {
            tool_type,
            has_water: false,
            is_heated: false,
            attachments: BTreeSet::new(),
            contents: ToolContents::new(capacity),
        }
    }

    pub fn contents(&self) -> &ToolContents {
        &self.contents
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn attachments(&self) -> impl Iterator<Item = ToolType> + '_ {
        self.attachments.iter().copied()
    }

    pub fn is_attached_to(&self, target: ToolType) -> bool {
        self.attachments.contains(&target)
    }

    /// Store `item` with a copy of `state`. The caller's vector stays
    /// independent of the tool's copy. Returns the slot index.
    pub fn add_item(&mut self, item: ItemTypeId, state: &ProcessingState) -> Result<usize, ToolError> {
        self.contents.push(ContainedItem {
            item,
            state: *state,
        })
    }

    /// Remove the entry at `index`. Out-of-range indices are ignored.
    pub fn remove_item(&mut self, index: usize) -> Option<ContainedItem> {
        self.contents.remove(index)
    }

    /// Drop every contained item, returning what was held.
    pub fn clear_contents(&mut self) -> Vec<ContainedItem> {
        self.contents.clear()
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut ContainedItem> {
        self.contents.get_mut(index)
    }

    /// Attach to a tool of type `target`. Already attached is a no-op.
    pub fn attach_to_tool(&mut self, target: ToolType) {
        if !self.attachments.insert(target) {
            return;
        }
        if let Some(flag) = attachment_effect(target) {
            self.set_derived(flag, true);
        }
        tracing::trace!(tool = %self.tool_type, %target, "attached");
    }

    /// Detach from `target`. Not attached is a no-op. A derived flag is only
    /// cleared when no remaining attachment still provides it.
    pub fn detach_from_tool(&mut self, target: ToolType) {
        if !self.attachments.remove(&target) {
            return;
        }
        if let Some(flag) = attachment_effect(target) {
            let still_provided = self
                .attachments
                .iter()
                .any(|t| attachment_effect(*t) == Some(flag));
            if !still_provided {
                self.set_derived(flag, false);
            }
        }
        tracing::trace!(tool = %self.tool_type, %target, "detached");
    }

    /// Detach from every attachment, returning the tool types left behind.
    pub fn detach_all(&mut self) -> Vec<ToolType> {
        let targets: Vec<ToolType> = self.attachments().collect();
        for target in &targets {
            self.detach_from_tool(*target);
        }
        targets
    }

    pub fn add_water(&mut self) {
        self.has_water = true;
    }

    pub fn remove_water(&mut self) {
        self.has_water = false;
    }

    fn set_derived(&mut self, flag: DerivedFlag, value: bool) {
        match flag {
            DerivedFlag::Heated => self.is_heated = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("tool contents are full (capacity {capacity})")]
    ContentsFull { capacity: usize },
}
