//! Haversack Engine library.
//!
//! ## Structure
//!
//! - `use_cases/bulk` - container nesting, bulk calculation, and the
//!   per-actor item preparation pass

pub mod use_cases;

pub use use_cases::bulk::{
    calculate_bulk, to_bulk_item_collection, BulkCalculator, BulkItemCollection,
    ContainmentIndex, NestingResolver, PhysicalItems, StackOverflow,
};
