//! Common types shared by all accounts-payable entities

pub mod entity_id;
pub mod lookup;

// Re-exports
pub use entity_id::{EntityId, EntityRef};
pub use lookup::LookupOption;
