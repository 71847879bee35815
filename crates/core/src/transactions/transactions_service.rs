use log::{debug, warn};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::transactions_model::{NewTransaction, Transaction, TransactionTotals, TransactionUpdate};
use super::transactions_traits::TransactionServiceTrait;
use crate::categories::resolve_category_id;
use crate::errors::ValidationError;
use crate::outcome::MutationOutcome;
use crate::utils::time_utils::{epoch_millis, Clock};

/// In-memory transaction store.
pub struct TransactionService {
    clock: Arc<dyn Clock>,
    transactions: RwLock<Vec<Transaction>>,
}

impl TransactionService {
    /// Creates an empty store.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_transactions(clock, Vec::new())
    }

    /// Creates a store holding `transactions` in the given order.
    ///
    /// Records without a category id are migrated on the way in.
    pub fn with_transactions(clock: Arc<dyn Clock>, transactions: Vec<Transaction>) -> Self {
        let service = TransactionService {
            clock,
            transactions: RwLock::new(transactions),
        };
        service.migrate_legacy_categories();
        service
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Transaction>> {
        self.transactions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Transaction>> {
        self.transactions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Next id: the clock in milliseconds, bumped past the largest existing id
    /// so two adds within the same millisecond still get distinct ids.
    ///
    /// `None` when the largest existing id is already `i64::MAX`.
    fn next_id(transactions: &[Transaction], candidate: i64) -> Option<i64> {
        match transactions.iter().map(|t| t.id).max() {
            Some(max_id) if max_id >= candidate => max_id.checked_add(1),
            _ => Some(candidate),
        }
    }
}

impl TransactionServiceTrait for TransactionService {
    fn add(&self, new_transaction: NewTransaction) -> MutationOutcome<Transaction> {
        if let Err(reason) = new_transaction.validate() {
            debug!("Rejected transaction candidate: {}", reason);
            return MutationOutcome::Rejected(reason);
        }

        let now = self.clock.now();
        let mut transactions = self.write();
        let Some(id) = Self::next_id(&transactions, epoch_millis(now)) else {
            warn!("No transaction id left above the largest stored id");
            return MutationOutcome::Rejected(ValidationError::InvalidInput(
                "transaction id space is exhausted".to_string(),
            ));
        };
        let transaction = new_transaction.into_transaction(id, now);

        debug!(
            "Adding transaction {} ({:?} {} in '{}')",
            transaction.id, transaction.transaction_type, transaction.amount, transaction.category
        );
        transactions.insert(0, transaction.clone());
        MutationOutcome::Applied(transaction)
    }

    fn edit(&self, transaction_id: i64, update: TransactionUpdate) -> MutationOutcome<Transaction> {
        if let Err(reason) = update.validate() {
            debug!("Rejected update for transaction {}: {}", transaction_id, reason);
            return MutationOutcome::Rejected(reason);
        }

        let mut transactions = self.write();
        match transactions.iter_mut().find(|t| t.id == transaction_id) {
            Some(existing) => {
                update.apply_to(existing);
                debug!("Updated transaction {}", transaction_id);
                MutationOutcome::Applied(existing.clone())
            }
            None => MutationOutcome::NotFound(transaction_id),
        }
    }

    fn delete(&self, transaction_id: i64) -> MutationOutcome<Transaction> {
        let mut transactions = self.write();
        match transactions.iter().position(|t| t.id == transaction_id) {
            Some(index) => {
                debug!("Deleting transaction {}", transaction_id);
                MutationOutcome::Applied(transactions.remove(index))
            }
            None => MutationOutcome::NotFound(transaction_id),
        }
    }

    fn get(&self, transaction_id: i64) -> Option<Transaction> {
        self.read().iter().find(|t| t.id == transaction_id).cloned()
    }

    fn list(&self) -> Vec<Transaction> {
        self.read().clone()
    }

    fn totals(&self) -> TransactionTotals {
        TransactionTotals::from_transactions(self.read().iter())
    }

    fn migrate_legacy_categories(&self) -> usize {
        let mut transactions = self.write();
        let mut migrated = 0;
        for transaction in transactions.iter_mut().filter(|t| t.category_id.is_none()) {
            if let Some(category_id) = resolve_category_id(&transaction.category) {
                transaction.category_id = Some(category_id);
                migrated += 1;
            }
        }
        if migrated > 0 {
            debug!("Resolved category ids for {} legacy transactions", migrated);
        }
        migrated
    }
}
