//! Schedule persistence adapters.

pub mod memory;
pub mod state_json;

pub use memory::MemoryPersistence;
pub use state_json::StateJson;
