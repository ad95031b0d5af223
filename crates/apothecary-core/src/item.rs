use crate::id::ItemTypeId;
use crate::registry::Registry;
use crate::state::ProcessingState;

/// A single item the player is handling, with its own processing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemInstance {
    pub item_type: ItemTypeId,
    pub state: ProcessingState,
}

impl ItemInstance {
    /// A fresh, untreated instance.
    pub fn new(item_type: ItemTypeId) -> Self {
        Self {
            item_type,
            state: ProcessingState::new(),
        }
    }

    /// A fresh instance starting from the item type's registered default
    /// state. Unknown types start untreated.
    pub fn spawn(registry: &Registry, item_type: ItemTypeId) -> Self {
        Self {
            item_type,
            state: registry.default_state(item_type).unwrap_or_default(),
        }
    }

    /// Two instances stack when both identity and every counter agree.
    pub fn stacks_with(&self, other: &ItemInstance) -> bool {
        self.item_type == other.item_type && self.state.matches_exactly(&other.state)
    }
}

/// A pile of identical instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub instance: ItemInstance,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(instance: ItemInstance, quantity: u32) -> Self {
        Self { instance, quantity }
    }

    /// Merge `incoming` into this stack if it is identical. Returns whether
    /// it was absorbed.
    #[must_use = "a rejected instance must be placed elsewhere"]
    pub fn try_push(&mut self, incoming: &ItemInstance) -> bool {
        if self.instance.stacks_with(incoming) {
            self.quantity = self.quantity.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Take one instance off the stack.
    pub fn take_one(&mut self) -> Option<ItemInstance> {
        if self.quantity == 0 {
            return None;
        }
        self.quantity -= 1;
        Some(self.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryBuilder;
    use crate::state::StateFlag;

    #[test]
    fn new_instance_is_raw() {
        let item = ItemInstance::new(ItemTypeId(3));
        assert!(item.state.is_raw());
    }

    #[test]
    fn spawn_uses_registered_default() {
        let mut b = RegistryBuilder::new();
        let dried = b.register_item("dried_chamomile", ProcessingState::new().with(StateFlag::Washed, 1));
        let reg = b.build().unwrap();
        assert_eq!(ItemInstance::spawn(&reg, dried).state.washed, 1);
        assert!(ItemInstance::spawn(&reg, ItemTypeId(42)).state.is_raw());
    }

    #[test]
    fn stacking_requires_exact_state() {
        let a = ItemInstance::new(ItemTypeId(0));
        let mut b = a;
        assert!(a.stacks_with(&b));
        b.state.set(StateFlag::Cut, 1);
        assert!(!a.stacks_with(&b));
        assert!(!a.stacks_with(&ItemInstance::new(ItemTypeId(1))));
    }

    #[test]
    fn stack_push_and_take() {
        let ginger = ItemInstance::new(ItemTypeId(0));
        let mut stack = ItemStack::new(ginger, 1);
        assert!(stack.try_push(&ginger));
        let mut cut = ginger;
        cut.state.set(StateFlag::Cut, 1);
        assert!(!stack.try_push(&cut));
        assert_eq!(stack.quantity, 2);

        assert_eq!(stack.take_one(), Some(ginger));
        assert_eq!(stack.take_one(), Some(ginger));
        assert_eq!(stack.take_one(), None);
    }
}
