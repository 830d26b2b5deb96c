//! Value objects - Immutable objects defined by their attributes

mod bulk;
mod bulk_config;
mod size;
mod stack_group;

pub use bulk::{Bulk, BulkParseError, LIGHT_PER_BULK};
pub use bulk_config::BulkConfig;
pub use size::Size;
pub use stack_group::{StackDefinition, StackGroup};
