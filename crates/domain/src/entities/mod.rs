//! Domain entities

mod bulk_item;
mod physical_item;

pub use bulk_item::BulkItem;
pub use physical_item::{
    ContainerCapacity, DerivedBulk, PhysicalItem, PhysicalItemSystem, PhysicalItemType,
    EXTRADIMENSIONAL_TRAIT,
};
