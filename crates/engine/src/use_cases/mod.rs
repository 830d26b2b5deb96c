//! Use cases - orchestration over domain entities.

pub mod bulk;

pub use bulk::PhysicalItems;
