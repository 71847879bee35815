//! Storage module - the durable key-value port and an in-memory implementation.

mod memory_store;
mod storage_traits;

pub use memory_store::InMemoryKeyValueStore;
pub use storage_traits::KeyValueStoreTrait;
