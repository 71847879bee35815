//! SQLite storage implementation for the key-value port.

mod model;
mod repository;

pub use model::KeyValueEntryDB;
pub use repository::SqliteKeyValueStore;

// Re-export trait from core for convenience
pub use budget_ledger_core::storage::KeyValueStoreTrait;
