use log::{debug, error, info, warn};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use super::budgets_constants::seed_budgets;
use super::budgets_model::{Budget, NewBudget, StoredBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::outcome::MutationOutcome;

/// Budget store backed by a snapshot repository.
///
/// The collection is loaded on first use. Mutations are computed on a copy
/// and only published in memory once the snapshot write succeeded, so the
/// in-memory view never runs ahead of storage.
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    budgets: RwLock<Option<Vec<Budget>>>,
}

impl BudgetService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        BudgetService {
            repository,
            budgets: RwLock::new(None),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Vec<Budget>>> {
        self.budgets.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads storage into a normalized collection, seeding or rewriting the
    /// snapshot when needed.
    fn load_from_storage(&self) -> Result<Vec<Budget>> {
        let Some(stored) = self.repository.load_snapshot()? else {
            let seeded = seed_budgets();
            info!("No stored budgets found, seeding {} examples", seeded.len());
            self.repository.save_snapshot(&seeded)?;
            return Ok(seeded);
        };

        let migrated = stored.iter().filter(|b| b.needs_migration()).count();
        let budgets: Vec<Budget> = stored.into_iter().map(StoredBudget::into_budget).collect();

        if migrated > 0 {
            info!("Backfilled category names for {} stored budgets", migrated);
            self.repository.save_snapshot(&budgets)?;
        }

        debug!("Loaded {} budgets", budgets.len());
        Ok(budgets)
    }

    /// Runs `mutation` against the current collection under the write lock.
    ///
    /// The closure edits a copy. When it reports `Applied`, the copy is
    /// persisted and then replaces the live collection.
    fn mutate<F>(&self, mutation: F) -> Result<MutationOutcome<Budget>>
    where
        F: FnOnce(&mut Vec<Budget>) -> MutationOutcome<Budget>,
    {
        let mut guard = self.write();
        let current = match guard.as_ref() {
            Some(budgets) => budgets.clone(),
            None => self.load_from_storage()?,
        };

        let mut next = current.clone();
        let outcome = mutation(&mut next);

        if outcome.is_applied() {
            if let Err(e) = self.repository.save_snapshot(&next) {
                error!("Failed to persist budgets: {}", e);
                *guard = Some(current);
                return Err(e);
            }
            *guard = Some(next);
        } else {
            *guard = Some(current);
        }

        Ok(outcome)
    }

    fn snapshot(&self) -> Result<Vec<Budget>> {
        {
            let guard = self.budgets.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(budgets) = guard.as_ref() {
                return Ok(budgets.clone());
            }
        }

        let mut guard = self.write();
        // Another caller may have loaded while we waited for the lock
        if let Some(budgets) = guard.as_ref() {
            return Ok(budgets.clone());
        }
        let budgets = self.load_from_storage()?;
        *guard = Some(budgets.clone());
        Ok(budgets)
    }
}

impl BudgetServiceTrait for BudgetService {
    fn load(&self) -> Result<Vec<Budget>> {
        let mut guard = self.write();
        let budgets = self.load_from_storage()?;
        *guard = Some(budgets.clone());
        Ok(budgets)
    }

    fn add(&self, new_budget: NewBudget) -> Result<MutationOutcome<Budget>> {
        if let Err(reason) = new_budget.validate() {
            debug!("Rejected budget candidate: {}", reason);
            return Ok(MutationOutcome::Rejected(reason));
        }

        self.mutate(|budgets| {
            let largest = budgets.iter().map(|b| b.budget_id).max().unwrap_or(0).max(0);
            let Some(budget_id) = largest.checked_add(1) else {
                warn!("No budget id left above {}", largest);
                return MutationOutcome::Rejected(ValidationError::InvalidInput(
                    "budget id space is exhausted".to_string(),
                ));
            };
            let budget = new_budget.into_budget(budget_id);
            debug!(
                "Adding budget {} for category {} ({})",
                budget.budget_id, budget.category_id, budget.category_name
            );
            budgets.push(budget.clone());
            MutationOutcome::Applied(budget)
        })
    }

    fn edit(&self, budget_id: i64, update: NewBudget) -> Result<MutationOutcome<Budget>> {
        if let Err(reason) = update.validate() {
            debug!("Rejected update for budget {}: {}", budget_id, reason);
            return Ok(MutationOutcome::Rejected(reason));
        }

        self.mutate(|budgets| match budgets.iter_mut().find(|b| b.budget_id == budget_id) {
            Some(existing) => {
                update.apply_to(existing);
                debug!("Updated budget {}", budget_id);
                MutationOutcome::Applied(existing.clone())
            }
            None => MutationOutcome::NotFound(budget_id),
        })
    }

    fn delete(&self, budget_id: i64) -> Result<MutationOutcome<Budget>> {
        self.mutate(|budgets| {
            match budgets.iter().position(|b| b.budget_id == budget_id) {
                Some(index) => {
                    debug!("Deleting budget {}", budget_id);
                    MutationOutcome::Applied(budgets.remove(index))
                }
                None => MutationOutcome::NotFound(budget_id),
            }
        })
    }

    fn get(&self, budget_id: i64) -> Result<Option<Budget>> {
        Ok(self
            .snapshot()?
            .into_iter()
            .find(|b| b.budget_id == budget_id))
    }

    fn list(&self) -> Result<Vec<Budget>> {
        self.snapshot()
    }
}
