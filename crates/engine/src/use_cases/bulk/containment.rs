//! Containment index over one actor's item collection.
//!
//! Built once per pass. Container references that point at unknown items, or
//! at items that cannot hold anything, are treated as "not contained".

use std::collections::{HashMap, HashSet};

use haversack_domain::{ItemId, PhysicalItem};

pub struct ContainmentIndex<'a> {
    by_id: HashMap<&'a ItemId, &'a PhysicalItem>,
    contents: HashMap<&'a ItemId, Vec<&'a PhysicalItem>>,
}

impl<'a> ContainmentIndex<'a> {
    pub fn new(items: &'a [PhysicalItem]) -> Self {
        let mut by_id = HashMap::with_capacity(items.len());
        for item in items {
            if by_id.contains_key(&item.id) {
                tracing::warn!(item_id = %item.id, "Duplicate item id, keeping the first");
                continue;
            }
            by_id.insert(&item.id, item);
        }

        let mut contents: HashMap<&'a ItemId, Vec<&'a PhysicalItem>> = HashMap::new();
        for item in items {
            let Some(container_id) = item.system.container_id.as_ref() else {
                continue;
            };
            match by_id.get(container_id).copied() {
                Some(container) if container.is_container() => {
                    contents.entry(&container.id).or_default().push(item);
                }
                Some(_) => tracing::warn!(
                    item_id = %item.id,
                    container_id = %container_id,
                    "Container reference points at a non-container, treating item as carried"
                ),
                None => tracing::warn!(
                    item_id = %item.id,
                    container_id = %container_id,
                    "Dangling container reference, treating item as carried"
                ),
            }
        }

        Self { by_id, contents }
    }

    pub fn get(&self, id: &ItemId) -> Option<&'a PhysicalItem> {
        self.by_id.get(id).copied()
    }

    /// The container actually holding `item`, if its reference is valid.
    pub fn container_of(&self, item: &PhysicalItem) -> Option<&'a PhysicalItem> {
        item.system
            .container_id
            .as_ref()
            .and_then(|id| self.get(id))
            .filter(|container| container.is_container())
    }

    /// Direct contents of a container, in collection order.
    pub fn contents_of(&self, container: &PhysicalItem) -> &[&'a PhysicalItem] {
        self.contents
            .get(&container.id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether any container above `item` is extradimensional.
    ///
    /// Walking stops at the first repeated container, so cyclic data ends the
    /// search instead of looping.
    pub fn in_extra_dimensional_container(&self, item: &PhysicalItem) -> bool {
        let mut visited: HashSet<&ItemId> = HashSet::new();
        visited.insert(&item.id);
        let mut current = self.container_of(item);
        while let Some(container) = current {
            if !visited.insert(&container.id) {
                return false;
            }
            if container.is_extra_dimensional() {
                return true;
            }
            current = self.container_of(container);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haversack_domain::PhysicalItemType;

    fn id(raw: &str) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    fn bag(raw_id: &str) -> PhysicalItem {
        PhysicalItem::new(id(raw_id), raw_id, PhysicalItemType::Backpack).with_weight("L")
    }

    fn gear(raw_id: &str) -> PhysicalItem {
        PhysicalItem::new(id(raw_id), raw_id, PhysicalItemType::Equipment).with_weight("1")
    }

    #[test]
    fn test_contents_in_collection_order() {
        let items = vec![
            gear("rope").in_container(id("pack")),
            bag("pack"),
            gear("lamp").in_container(id("pack")),
        ];
        let index = ContainmentIndex::new(&items);
        let names: Vec<&str> = index
            .contents_of(&items[1])
            .iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(names, vec!["rope", "lamp"]);
        assert!(index.contents_of(&items[0]).is_empty());
    }

    #[test]
    fn test_invalid_references_are_not_containment() {
        let items = vec![
            gear("sword"),
            gear("rope").in_container(id("sword")),
            gear("lamp").in_container(id("ghost")),
        ];
        let index = ContainmentIndex::new(&items);
        assert!(index.container_of(&items[1]).is_none());
        assert!(index.container_of(&items[2]).is_none());
        assert!(index.contents_of(&items[0]).is_empty());
    }

    #[test]
    fn test_extra_dimensional_ancestor() {
        let items = vec![
            bag("holding").with_trait("extradimensional"),
            bag("pouch").in_container(id("holding")),
            gear("gem").in_container(id("pouch")),
            gear("rope"),
        ];
        let index = ContainmentIndex::new(&items);
        assert!(!index.in_extra_dimensional_container(&items[0]));
        assert!(index.in_extra_dimensional_container(&items[1]));
        assert!(index.in_extra_dimensional_container(&items[2]));
        assert!(!index.in_extra_dimensional_container(&items[3]));
    }

    #[test]
    fn test_cyclic_containment_terminates() {
        let items = vec![
            bag("a").in_container(id("b")),
            bag("b").in_container(id("a")),
        ];
        let index = ContainmentIndex::new(&items);
        assert!(!index.in_extra_dimensional_container(&items[0]));
        assert_eq!(index.contents_of(&items[0]).len(), 1);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let items = vec![gear("dup").with_weight("2"), gear("dup").with_weight("3")];
        let index = ContainmentIndex::new(&items);
        assert_eq!(index.get(&id("dup")).unwrap().system.weight, "2");
    }
}
