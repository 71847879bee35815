//! SQLite storage implementation for Budget Ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the key-value port defined in `budget-ledger-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The key-value store backing the budget snapshot
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                │
//!                ▼
//!      storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod key_value;
pub mod schema;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use key_value::SqliteKeyValueStore;

// Re-export from budget-ledger-core for convenience
pub use budget_ledger_core::errors::{DatabaseError, Error, Result};
