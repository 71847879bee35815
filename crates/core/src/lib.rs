//! Budget Ledger Core - Domain entities, services, and traits.
//!
//! This crate contains the ledger's business logic: the transaction store,
//! the budget store, the static category table and the reconciliation view
//! that matches expenses against a selected budget.
//! It is storage-agnostic and defines the key-value port that is implemented
//! by the `storage-sqlite` crate.

pub mod budgets;
pub mod categories;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod outcome;
pub mod reconciliation;
pub mod storage;
pub mod transactions;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

pub use outcome::MutationOutcome;
