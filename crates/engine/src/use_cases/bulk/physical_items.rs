//! Physical items preparation pass.
//!
//! Runs once whenever an actor's derived data is rebuilt. The pass resolves
//! container nesting a single time, then computes and writes the display bulk
//! of every item. It never fails: bad data degrades to zero bulk and a
//! warning so the rest of the actor can still be prepared.

use std::sync::Arc;

use haversack_domain::{
    Bulk, BulkConfig, BulkItem, ContainerCapacity, DerivedBulk, PhysicalItem, Size,
};

use super::calculator::{BulkCalculator, StackOverflow};
use super::containment::ContainmentIndex;
use super::nesting::to_bulk_item_collection;

/// Bulk preparation for one actor's physical items.
///
/// Configuration and actor size are injected; nothing is read from global
/// state.
#[derive(Debug, Clone, Copy)]
pub struct PhysicalItems {
    config: BulkConfig,
    actor_size: Size,
}

impl PhysicalItems {
    pub fn new(config: BulkConfig, actor_size: Size) -> Self {
        Self { config, actor_size }
    }

    pub fn config(&self) -> &BulkConfig {
        &self.config
    }

    pub fn actor_size(&self) -> Size {
        self.actor_size
    }

    /// Compute and write display bulk for every item.
    ///
    /// Returns the items carried directly (not inside a container), in
    /// collection order, for the encumbrance check.
    pub fn prepare_items(&self, items: &mut [PhysicalItem]) -> Vec<BulkItem> {
        let (derived, top_level) = self.compute(items);
        for (item, derived) in items.iter_mut().zip(derived) {
            item.derived = derived;
        }
        tracing::debug!(
            items = items.len(),
            top_level = top_level.len(),
            actor_size = %self.actor_size,
            "Prepared physical item bulk"
        );
        top_level
    }

    fn compute(&self, items: &[PhysicalItem]) -> (Vec<DerivedBulk>, Vec<BulkItem>) {
        let index = ContainmentIndex::new(items);
        let collection = to_bulk_item_collection(&index, items);
        let calculator = BulkCalculator::new(&self.config, self.actor_size);

        let mut derived = Vec::with_capacity(items.len());
        let mut top_level = Vec::new();
        for item in items {
            let bulk_item = match collection.get(&item.id) {
                Some(resolved) => Arc::clone(resolved),
                None => {
                    tracing::debug!(item_id = %item.id, "Item missing from resolved collection, projecting directly");
                    Arc::new(BulkItem::from_physical_item(item, Vec::new()))
                }
            };
            let nested = index.in_extra_dimensional_container(item);
            let (approximated, _) = calculator.calculate(&bulk_item, nested);

            let mut item_derived = DerivedBulk {
                formatted_bulk: approximated.format(),
                ..DerivedBulk::default()
            };
            if item.is_container() {
                item_derived.contained_item_bulk = Some(bulk_item.held_item_bulk);
                if let Some(max) = item.bulk_capacity() {
                    let value = if item.is_extra_dimensional() && nested {
                        Bulk::zero()
                    } else {
                        bulk_item.held_item_bulk
                    };
                    let capacity = ContainerCapacity::new(value, max);
                    if capacity.is_over_capacity() {
                        tracing::debug!(item_id = %item.id, value = %value, max = %max, "Container over capacity");
                    }
                    item_derived.capacity = Some(capacity);
                }
            }
            tracing::trace!(item_id = %item.id, bulk = %approximated, "Prepared item bulk");

            if !bulk_item.is_in_container {
                top_level.push(BulkItem::clone(&bulk_item));
            }
            derived.push(item_derived);
        }

        (derived, top_level)
    }

    /// Total carried bulk of the items returned by [`Self::prepare_items`].
    ///
    /// Partial stacks carried separately are pooled before counting.
    pub fn carried_bulk(&self, top_level: &[BulkItem]) -> (Bulk, StackOverflow) {
        BulkCalculator::new(&self.config, self.actor_size).calculate_all(top_level, false)
    }
}

impl Default for PhysicalItems {
    fn default() -> Self {
        Self::new(BulkConfig::default(), Size::default())
    }
}
