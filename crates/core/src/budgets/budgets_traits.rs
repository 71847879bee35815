use super::budgets_model::{Budget, NewBudget, StoredBudget};
use crate::categories;
use crate::errors::Result;
use crate::outcome::MutationOutcome;

/// Trait for budget snapshot persistence.
///
/// The whole collection is read and written at once; there are no
/// per-record operations.
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Reads the persisted snapshot, or `None` when nothing has been written yet.
    fn load_snapshot(&self) -> Result<Option<Vec<StoredBudget>>>;

    /// Overwrites the persisted snapshot with `budgets`.
    fn save_snapshot(&self, budgets: &[Budget]) -> Result<()>;
}

/// Trait for budget store operations.
///
/// Every applied mutation persists the full collection before returning.
/// `Err` is reserved for storage failures.
pub trait BudgetServiceTrait: Send + Sync {
    /// Category name for `category_id`, "Unknown" when the table has no such id.
    fn resolve_category_name(&self, category_id: i32) -> String {
        categories::resolve_category_name(category_id)
    }

    /// (Re)reads the persisted snapshot, seeding example budgets on first run.
    fn load(&self) -> Result<Vec<Budget>>;

    fn add(&self, new_budget: NewBudget) -> Result<MutationOutcome<Budget>>;

    fn edit(&self, budget_id: i64, update: NewBudget) -> Result<MutationOutcome<Budget>>;

    fn delete(&self, budget_id: i64) -> Result<MutationOutcome<Budget>>;

    fn get(&self, budget_id: i64) -> Result<Option<Budget>>;

    fn list(&self) -> Result<Vec<Budget>>;
}
