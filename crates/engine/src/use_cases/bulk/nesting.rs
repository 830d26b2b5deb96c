//! Container nesting resolution.
//!
//! Turns the flat item collection into `BulkItem`s whose containers hold their
//! resolved contents. Resolution is memoized per pass: a container reached
//! both as a top-level entry and as a nested child is projected once, and
//! both paths share the same `Arc`.
//!
//! Cyclic containment is broken with an explicit in-progress set. A node
//! revisited while it is still being resolved contributes nothing to the
//! container that reached it, and is itself treated as carried so the rest
//! of the cycle stays reachable from the top level.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use haversack_domain::{BulkItem, ItemId, PhysicalItem};

use super::containment::ContainmentIndex;

/// Fully resolved bulk items of one pass, keyed by item id.
#[derive(Debug, Default)]
pub struct BulkItemCollection {
    items: HashMap<ItemId, Arc<BulkItem>>,
}

impl BulkItemCollection {
    pub fn get(&self, id: &ItemId) -> Option<&Arc<BulkItem>> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &Arc<BulkItem>)> {
        self.items.iter()
    }
}

pub struct NestingResolver<'i, 'a> {
    index: &'i ContainmentIndex<'a>,
    resolved: HashMap<ItemId, Arc<BulkItem>>,
    in_progress: HashSet<ItemId>,
    /// Nodes whose containment closes a cycle
    cycle_breaks: HashSet<ItemId>,
}

impl<'i, 'a> NestingResolver<'i, 'a> {
    pub fn new(index: &'i ContainmentIndex<'a>) -> Self {
        Self {
            index,
            resolved: HashMap::new(),
            in_progress: HashSet::new(),
            cycle_breaks: HashSet::new(),
        }
    }

    /// Resolve one item, contents first.
    ///
    /// Returns `None` only when `item` is already being resolved further up
    /// the stack, i.e. the containment data is cyclic. That item is then
    /// resolved as not contained.
    pub fn handle_nesting(&mut self, item: &PhysicalItem) -> Option<Arc<BulkItem>> {
        if let Some(done) = self.resolved.get(&item.id) {
            return Some(Arc::clone(done));
        }
        if !self.in_progress.insert(item.id.clone()) {
            tracing::warn!(
                item_id = %item.id,
                "Cyclic containment, treating revisited item as carried"
            );
            self.cycle_breaks.insert(item.id.clone());
            return None;
        }

        let held_items = if item.is_container() {
            let index = self.index;
            index
                .contents_of(item)
                .iter()
                .filter_map(|child| self.handle_nesting(child))
                .collect()
        } else {
            Vec::new()
        };

        let is_in_container =
            self.index.container_of(item).is_some() && !self.cycle_breaks.contains(&item.id);
        let bulk_item = Arc::new(
            BulkItem::from_physical_item(item, held_items).with_in_container(is_in_container),
        );
        tracing::trace!(
            item_id = %item.id,
            bulk = %bulk_item.bulk,
            held_item_bulk = %bulk_item.held_item_bulk,
            "Resolved bulk item"
        );

        self.in_progress.remove(&item.id);
        self.resolved.insert(item.id.clone(), Arc::clone(&bulk_item));
        Some(bulk_item)
    }

    pub fn into_collection(self) -> BulkItemCollection {
        BulkItemCollection {
            items: self.resolved,
        }
    }
}

/// Resolve every item of a collection into one keyed collection.
///
/// Nested items are reachable both directly by id and through their
/// container's `holds_items`.
pub fn to_bulk_item_collection(
    index: &ContainmentIndex<'_>,
    items: &[PhysicalItem],
) -> BulkItemCollection {
    let mut resolver = NestingResolver::new(index);
    for item in items {
        resolver.handle_nesting(item);
    }
    resolver.into_collection()
}

#[cfg(test)]
mod tests {
    use super::*;
    use haversack_domain::{Bulk, PhysicalItemType};

    fn id(raw: &str) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    fn bag(raw_id: &str, weight: &str) -> PhysicalItem {
        PhysicalItem::new(id(raw_id), raw_id, PhysicalItemType::Backpack).with_weight(weight)
    }

    fn gear(raw_id: &str, weight: &str) -> PhysicalItem {
        PhysicalItem::new(id(raw_id), raw_id, PhysicalItemType::Equipment).with_weight(weight)
    }

    fn resolve(items: &[PhysicalItem]) -> BulkItemCollection {
        let index = ContainmentIndex::new(items);
        to_bulk_item_collection(&index, items)
    }

    fn check_aggregation(item: &BulkItem) {
        let expected: Bulk = item
            .holds_items
            .iter()
            .map(|child| child.bulk + child.held_item_bulk)
            .sum();
        assert_eq!(item.held_item_bulk, expected, "{}", item.id);
        for child in &item.holds_items {
            check_aggregation(child);
        }
    }

    #[test]
    fn test_backpack_scenario() {
        let items = vec![
            bag("backpack", "1").with_bulk_capacity("4"),
            gear("bedroll", "1").in_container(id("backpack")),
            gear("chalk", "-").with_quantity(10).in_container(id("backpack")),
        ];
        let collection = resolve(&items);
        let backpack = collection.get(&id("backpack")).unwrap();
        assert_eq!(backpack.held_item_bulk, Bulk::from_value(1));
        assert_eq!(backpack.holds_items.len(), 2);
        assert!(!backpack.is_in_container);
        assert!(collection.get(&id("chalk")).unwrap().is_in_container);
    }

    #[test]
    fn test_nested_container_resolved_once() {
        let items = vec![
            bag("outer", "1"),
            bag("inner", "L").in_container(id("outer")),
            gear("lamp", "L").in_container(id("inner")),
        ];
        let index = ContainmentIndex::new(&items);
        let mut resolver = NestingResolver::new(&index);
        let outer = resolver.handle_nesting(&items[0]).unwrap();
        let inner_direct = resolver.handle_nesting(&items[1]).unwrap();
        assert!(Arc::ptr_eq(&outer.holds_items[0], &inner_direct));

        let collection = resolver.into_collection();
        assert_eq!(collection.len(), 3);
        assert!(Arc::ptr_eq(collection.get(&id("inner")).unwrap(), &inner_direct));
    }

    #[test]
    fn test_aggregation_law_at_depth() {
        let items = vec![
            bag("a", "1"),
            bag("b", "L").in_container(id("a")),
            bag("c", "L").in_container(id("b")),
            bag("d", "2").in_container(id("c")),
            gear("x", "3L").with_quantity(4).in_container(id("d")),
            gear("y", "1").in_container(id("b")),
        ];
        let collection = resolve(&items);
        let a = collection.get(&id("a")).unwrap();
        check_aggregation(a);
        // b(L) + c(L) + d(2) + x(1; 2L) + y(1)
        assert_eq!(a.held_item_bulk, Bulk::new(4, 4));
    }

    #[test]
    fn test_children_resolve_in_collection_order() {
        let items = vec![
            gear("first", "1").in_container(id("pack")),
            bag("pack", "1"),
            gear("second", "L").in_container(id("pack")),
        ];
        let collection = resolve(&items);
        let pack = collection.get(&id("pack")).unwrap();
        let order: Vec<&str> = pack.holds_items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["first", "second"]);
    }

    #[test]
    fn test_cycle_does_not_recurse_forever() {
        let items = vec![
            bag("a", "1").in_container(id("b")),
            bag("b", "2").in_container(id("a")),
        ];
        let collection = resolve(&items);
        let a = collection.get(&id("a")).unwrap();
        let b = collection.get(&id("b")).unwrap();
        // a was entered first, so b sees a as in progress and holds nothing
        assert!(b.holds_items.is_empty());
        assert_eq!(b.held_item_bulk, Bulk::zero());
        assert_eq!(a.held_item_bulk, Bulk::from_value(2));
        // the cycle is cut above a
        assert!(!a.is_in_container);
        assert!(b.is_in_container);
    }

    #[test]
    fn test_self_containment_is_a_cycle() {
        let items = vec![bag("loop", "1").in_container(id("loop"))];
        let collection = resolve(&items);
        let looped = collection.get(&id("loop")).unwrap();
        assert!(looped.holds_items.is_empty());
        assert!(!looped.is_in_container);
    }

    #[test]
    fn test_dangling_reference_is_top_level() {
        let items = vec![gear("rope", "L").in_container(id("ghost"))];
        let collection = resolve(&items);
        assert!(!collection.get(&id("rope")).unwrap().is_in_container);
    }

    #[test]
    fn test_non_containers_hold_nothing() {
        let items = vec![
            gear("sword", "1"),
            gear("oil", "L").in_container(id("sword")),
        ];
        let collection = resolve(&items);
        let sword = collection.get(&id("sword")).unwrap();
        assert!(sword.holds_items.is_empty());
        assert!(!collection.get(&id("oil")).unwrap().is_in_container);
    }
}
