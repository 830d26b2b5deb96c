//! Bulk use cases.
//!
//! One preparation pass runs containment indexing, nesting resolution, and
//! calculation in that order, so every container's held bulk is settled
//! before any display value is computed.

pub mod calculator;
pub mod containment;
pub mod nesting;
pub mod physical_items;

pub use calculator::{calculate_bulk, BulkCalculator, StackOverflow};
pub use containment::ContainmentIndex;
pub use nesting::{to_bulk_item_collection, BulkItemCollection, NestingResolver};
pub use physical_items::PhysicalItems;
