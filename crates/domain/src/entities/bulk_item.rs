//! Bulk item - the calculation-ready projection of a physical item
//!
//! A `BulkItem` is rebuilt on every preparation pass and dropped afterwards.
//! Containers carry their resolved contents in `holds_items`; children are
//! shared through `Arc` so a container and a keyed lookup can hand out the
//! same node.

use std::sync::Arc;

use crate::{Bulk, ItemId, PhysicalItem, Size, StackGroup};

#[derive(Debug, Clone, PartialEq)]
pub struct BulkItem {
    pub id: ItemId,
    /// Bulk of the whole quantity, before size conversion
    pub bulk: Bulk,
    pub quantity: u32,
    pub stack_group: Option<StackGroup>,
    pub is_equipped: bool,
    pub is_in_container: bool,
    pub negate_bulk: Bulk,
    pub size: Size,
    pub extra_dimensional_container: bool,
    pub holds_items: Vec<Arc<BulkItem>>,
    /// Sum over direct children of their bulk plus their own held bulk
    pub held_item_bulk: Bulk,
}

impl BulkItem {
    /// Project an item's source data, optionally with its resolved contents.
    ///
    /// Only containers are ever given held items; for anything else the
    /// collection stays empty.
    pub fn from_physical_item(item: &PhysicalItem, held_items: Vec<Arc<BulkItem>>) -> Self {
        let quantity = item.system.quantity;
        let bulk = match item.system.stack_group {
            Some(group) => match group.definition() {
                Some(stack) => stack.bulk_for_quantity(quantity).0,
                None => {
                    tracing::warn!(
                        item_id = %item.id,
                        stack_group = %group,
                        "Unknown stack group, counting bulk per unit"
                    );
                    item.unit_bulk().multiply(quantity)
                }
            },
            None => item.unit_bulk().multiply(quantity),
        };

        let held_item_bulk = held_items
            .iter()
            .map(|held| held.bulk + held.held_item_bulk)
            .sum();

        Self {
            id: item.id.clone(),
            bulk,
            quantity,
            stack_group: item.system.stack_group,
            is_equipped: item.system.equipped,
            is_in_container: item.system.container_id.is_some(),
            negate_bulk: item.negate_bulk(),
            size: item.system.size,
            extra_dimensional_container: item.is_extra_dimensional(),
            holds_items: held_items,
            held_item_bulk,
        }
    }

    /// Override containment once the container reference has been checked.
    pub fn with_in_container(mut self, is_in_container: bool) -> Self {
        self.is_in_container = is_in_container;
        self
    }

    /// True when this item's bulk is counted per full stack.
    pub fn is_stacked(&self) -> bool {
        self.stack_group.and_then(|group| group.definition()).is_some()
    }

    pub fn is_coins(&self) -> bool {
        self.stack_group.is_some_and(|group| group.is_coins())
    }
}
