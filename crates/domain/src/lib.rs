//! Haversack domain: bulk value objects, physical items, and the projection
//! from item source data into calculation-ready bulk items.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    BulkItem, ContainerCapacity, DerivedBulk, PhysicalItem, PhysicalItemSystem, PhysicalItemType,
    EXTRADIMENSIONAL_TRAIT,
};
pub use error::DomainError;
pub use ids::ItemId;
pub use value_objects::{
    Bulk, BulkConfig, BulkParseError, Size, StackDefinition, StackGroup, LIGHT_PER_BULK,
};
