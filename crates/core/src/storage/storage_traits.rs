//! Key-value storage port.
//!
//! The ledger never reaches for a global store; every component that
//! persists receives an implementation of this trait at construction.

use crate::errors::Result;

/// String-keyed durable storage holding JSON-encoded values.
///
/// A `set` replaces the whole value for the key and is atomic from the
/// caller's point of view.
pub trait KeyValueStoreTrait: Send + Sync {
    /// Reads the value stored under `key`, or `None` if the slot is empty.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
