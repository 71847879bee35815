//! Transactions module - domain models, the transaction store, and traits.

mod transactions_constants;
mod transactions_model;
mod transactions_service;
mod transactions_traits;


pub use transactions_constants::sample_transactions;
pub use transactions_model::{
    NewTransaction, Transaction, TransactionTotals, TransactionType, TransactionUpdate,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::TransactionServiceTrait;
