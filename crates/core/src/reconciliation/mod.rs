//! Reconciliation module - matches expense transactions against a selected budget.

mod reconciliation_model;
mod reconciliation_view;

pub use reconciliation_model::{BudgetProgress, ViewState};
pub use reconciliation_view::{budget_progress, matches_budget, ReconciliationView};
