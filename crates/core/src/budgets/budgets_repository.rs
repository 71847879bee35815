use log::debug;
use std::sync::Arc;

use super::budgets_model::{Budget, StoredBudget};
use super::budgets_traits::BudgetRepositoryTrait;
use crate::constants::BUDGETS_STORAGE_KEY;
use crate::errors::Result;
use crate::storage::KeyValueStoreTrait;

/// Stores the budget collection as one JSON array in a key-value slot.
pub struct KeyValueBudgetRepository {
    store: Arc<dyn KeyValueStoreTrait>,
}

impl KeyValueBudgetRepository {
    pub fn new(store: Arc<dyn KeyValueStoreTrait>) -> Self {
        KeyValueBudgetRepository { store }
    }
}

impl BudgetRepositoryTrait for KeyValueBudgetRepository {
    fn load_snapshot(&self) -> Result<Option<Vec<StoredBudget>>> {
        match self.store.get(BUDGETS_STORAGE_KEY)? {
            // An empty slot counts as never written
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => {
                let budgets: Vec<StoredBudget> = serde_json::from_str(&raw)?;
                debug!("Read {} budgets from storage", budgets.len());
                Ok(Some(budgets))
            }
            None => Ok(None),
        }
    }

    fn save_snapshot(&self, budgets: &[Budget]) -> Result<()> {
        let raw = serde_json::to_string(budgets)?;
        self.store.set(BUDGETS_STORAGE_KEY, &raw)?;
        debug!("Wrote snapshot of {} budgets", budgets.len());
        Ok(())
    }
}
