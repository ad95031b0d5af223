//! Customers arrive with an illness and leave once served its cure.

use crate::fixed::Fixed64;
use crate::id::{IllnessId, ItemTypeId};
use crate::item::ItemInstance;
use crate::rng::SimRng;
use crate::state::ProcessingState;
use crate::weighted::{self, Rarity, Weighted};

/// An illness a customer can arrive with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllnessDef {
    pub name: String,
    pub weight: Fixed64,
    pub rarity: Rarity,
    /// The remedy that cures it.
    pub cure_item: ItemTypeId,
    /// Minimum processing the remedy must have received.
    pub cure_state: ProcessingState,
    /// Dialogue key the customer uses to describe the symptoms.
    pub dialogue_key: String,
}

impl IllnessDef {
    /// Whether serving `item` cures this illness.
    pub fn is_cured_by(&self, item: &ItemInstance) -> bool {
        item.item_type == self.cure_item && item.state.has_required_states(&self.cure_state)
    }
}

impl Weighted for IllnessDef {
    fn weight(&self) -> Fixed64 {
        self.weight
    }

    fn rarity(&self) -> Rarity {
        self.rarity
    }
}

/// All illnesses, in registration order.
#[derive(Debug, Clone, Default)]
pub struct IllnessTable {
    illnesses: Vec<IllnessDef>,
}

impl IllnessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, illness: IllnessDef) -> IllnessId {
        let id = IllnessId(self.illnesses.len() as u32);
        self.illnesses.push(illness);
        id
    }

    pub fn get(&self, id: IllnessId) -> Option<&IllnessDef> {
        self.illnesses.get(id.0 as usize)
    }

    pub fn id_of(&self, name: &str) -> Option<IllnessId> {
        self.illnesses
            .iter()
            .position(|i| i.name == name)
            .map(|i| IllnessId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.illnesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.illnesses.is_empty()
    }

    /// Roll an illness for a new customer. `None` when no illness carries
    /// positive weight.
    pub fn assign(&self, rng: &mut SimRng) -> Option<IllnessId> {
        let id = weighted::select_index(&self.illnesses, rng).map(|i| IllnessId(i as u32));
        tracing::debug!(illness = ?id, "assigned illness");
        id
    }
}

/// A customer waiting at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer {
    pub illness: IllnessId,
    pub served: bool,
}

impl Customer {
    /// A new customer with a rolled illness.
    pub fn arrive(table: &IllnessTable, rng: &mut SimRng) -> Option<Self> {
        table.assign(rng).map(|illness| Self {
            illness,
            served: false,
        })
    }

    /// Hand over `item`. Returns whether it cured the customer; a customer
    /// already cured stays cured.
    pub fn serve(&mut self, table: &IllnessTable, item: &ItemInstance) -> bool {
        let cured = table
            .get(self.illness)
            .is_some_and(|illness| illness.is_cured_by(item));
        self.served |= cured;
        cured
    }
}
