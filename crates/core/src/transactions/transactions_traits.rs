//! Transaction store trait.

use super::transactions_model::{NewTransaction, Transaction, TransactionTotals, TransactionUpdate};
use crate::outcome::MutationOutcome;

/// Contract for the transaction store.
///
/// Transactions are kept most-recent-first: `add` prepends. Mutations never
/// fail with an error; bad input and unknown ids come back as outcomes.
pub trait TransactionServiceTrait: Send + Sync {
    /// Adds a transaction, assigning its id from the clock.
    fn add(&self, new_transaction: NewTransaction) -> MutationOutcome<Transaction>;

    /// Replaces every field of the transaction with `transaction_id`.
    fn edit(&self, transaction_id: i64, update: TransactionUpdate) -> MutationOutcome<Transaction>;

    /// Removes the transaction and returns it. Confirmation is the caller's job.
    fn delete(&self, transaction_id: i64) -> MutationOutcome<Transaction>;

    fn get(&self, transaction_id: i64) -> Option<Transaction>;

    /// All transactions in store order.
    fn list(&self) -> Vec<Transaction>;

    /// Income, expense and net over the current transactions.
    fn totals(&self) -> TransactionTotals;

    /// Fills `category_id` for transactions that lack one.
    ///
    /// Returns the number of transactions that gained an id.
    fn migrate_legacy_categories(&self) -> usize;
}
