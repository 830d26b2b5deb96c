//! Bulk calculation for resolved items.
//!
//! The approximated bulk of an item is its own bulk plus whatever its contents
//! expose to the outside:
//!
//! - coins weigh nothing when the world ignores coin bulk
//! - siblings in the same stack group are pooled before the stack table is
//!   applied, so two half stacks count as one full stack
//! - an extradimensional container inside another extradimensional container
//!   exposes none of its contents
//! - a container's negate bulk is taken off its contents, never below zero
//! - partial stacks left over at any depth are reported together
//! - each item's bulk is converted from the item's size to the actor's size

use std::collections::BTreeMap;

use haversack_domain::{Bulk, BulkConfig, BulkItem, Size, StackGroup};

/// Units left over in partial stacks, per stack group, summed over every
/// container level.
pub type StackOverflow = BTreeMap<StackGroup, u32>;

pub struct BulkCalculator<'c> {
    config: &'c BulkConfig,
    actor_size: Size,
}

impl<'c> BulkCalculator<'c> {
    pub fn new(config: &'c BulkConfig, actor_size: Size) -> Self {
        Self { config, actor_size }
    }

    /// Approximated bulk of one item.
    ///
    /// `nested_extra_dimensional_container` says whether the item itself sits
    /// inside an extradimensional container.
    pub fn calculate(
        &self,
        item: &BulkItem,
        nested_extra_dimensional_container: bool,
    ) -> (Bulk, StackOverflow) {
        self.combined_bulk(std::iter::once(item), nested_extra_dimensional_container)
    }

    /// Approximated bulk of a group of sibling items.
    pub fn calculate_all<'b>(
        &self,
        items: impl IntoIterator<Item = &'b BulkItem>,
        nested_extra_dimensional_container: bool,
    ) -> (Bulk, StackOverflow) {
        self.combined_bulk(items, nested_extra_dimensional_container)
    }

    fn combined_bulk<'b>(
        &self,
        items: impl IntoIterator<Item = &'b BulkItem>,
        nested: bool,
    ) -> (Bulk, StackOverflow) {
        let mut bulk = Bulk::zero();
        let mut stacks: BTreeMap<(StackGroup, Size), u32> = BTreeMap::new();
        let mut overflow = StackOverflow::new();

        for item in items {
            if self.config.ignore_coin_bulk && item.is_coins() {
                continue;
            }
            match item.stack_group.filter(|_| item.is_stacked()) {
                Some(group) => {
                    let pooled = stacks.entry((group, item.size)).or_default();
                    *pooled = pooled.saturating_add(item.quantity);
                }
                None => bulk = bulk + item.bulk.convert_for_size(item.size, self.actor_size),
            }
            let (held, held_overflow) = self.exposed_held_bulk(item, nested);
            bulk = bulk + held;
            merge_overflow(&mut overflow, held_overflow);
        }

        for ((group, size), quantity) in stacks {
            let Some(stack) = group.definition() else {
                continue;
            };
            let (stack_bulk, leftover) = stack.bulk_for_quantity(quantity);
            bulk = bulk + stack_bulk.convert_for_size(size, self.actor_size);
            if leftover > 0 {
                let entry = overflow.entry(group).or_default();
                *entry = entry.saturating_add(leftover);
            }
        }

        (bulk, overflow)
    }

    /// Bulk of an item's contents as seen from outside the item, with the
    /// partial stacks found inside.
    ///
    /// Negate bulk is converted to the actor's size like the contents are.
    fn exposed_held_bulk(&self, item: &BulkItem, nested: bool) -> (Bulk, StackOverflow) {
        if item.holds_items.is_empty() {
            return (Bulk::zero(), StackOverflow::new());
        }
        if item.extra_dimensional_container && nested {
            tracing::debug!(
                item_id = %item.id,
                "Extradimensional container nested in another, contents not counted"
            );
            return (Bulk::zero(), StackOverflow::new());
        }
        let (held, overflow) = self.combined_bulk(
            item.holds_items.iter().map(|held| &**held),
            nested || item.extra_dimensional_container,
        );
        let negate = item.negate_bulk.convert_for_size(item.size, self.actor_size);
        (held.subtract(negate), overflow)
    }
}

fn merge_overflow(into: &mut StackOverflow, from: StackOverflow) {
    for (group, leftover) in from {
        let entry = into.entry(group).or_default();
        *entry = entry.saturating_add(leftover);
    }
}

/// Approximated bulk of `item` for an actor of `actor_size`.
pub fn calculate_bulk(
    item: &BulkItem,
    config: &BulkConfig,
    nested_extra_dimensional_container: bool,
    actor_size: Size,
) -> (Bulk, StackOverflow) {
    BulkCalculator::new(config, actor_size).calculate(item, nested_extra_dimensional_container)
}
