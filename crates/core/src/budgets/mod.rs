//! Budgets module - domain models, the budget store, the snapshot repository, and traits.

mod budgets_constants;
mod budgets_model;
mod budgets_repository;
mod budgets_service;
mod budgets_traits;

#[cfg(test)]
mod budgets_service_tests;

pub use budgets_constants::seed_budgets;
pub use budgets_model::{Budget, NewBudget, StoredBudget};
pub use budgets_repository::KeyValueBudgetRepository;
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
