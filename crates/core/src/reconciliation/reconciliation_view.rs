use log::debug;
use rust_decimal::Decimal;

use super::reconciliation_model::{BudgetProgress, ViewState};
use crate::budgets::Budget;
use crate::transactions::Transaction;

/// True when `transaction` is an expense in the budget's category.
///
/// Transactions whose label resolved to no category id never match.
pub fn matches_budget(transaction: &Transaction, budget: &Budget) -> bool {
    transaction.is_expense() && transaction.category_id == Some(budget.category_id)
}

fn spent_on(budget: &Budget, transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| matches_budget(t, budget))
        .fold(Decimal::ZERO, |sum, t| sum.saturating_add(t.amount))
}

/// `spent` as a percentage of `limit`, saturating when the ratio does not fit.
fn percent_of(spent: Decimal, limit: Decimal) -> Decimal {
    if limit.is_zero() {
        return Decimal::ZERO;
    }
    spent
        .checked_div(limit)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if spent.is_sign_negative() == limit.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

/// Spending against `budget` across `transactions`.
pub fn budget_progress(budget: &Budget, transactions: &[Transaction]) -> BudgetProgress {
    let spent = spent_on(budget, transactions);
    BudgetProgress {
        budget_id: budget.budget_id,
        category_id: budget.category_id,
        category_name: budget.category_name.clone(),
        limit_amount: budget.limit_amount,
        spent,
        remaining: budget.limit_amount.saturating_sub(spent),
        progress: percent_of(spent, budget.limit_amount),
        is_over_budget: spent > budget.limit_amount,
    }
}

/// Filtered view of the transaction list, optionally focused on one budget.
///
/// The view keeps its own copy of the filtered records. Call [`refresh`]
/// after the transaction store changes.
///
/// [`refresh`]: ReconciliationView::refresh
#[derive(Debug, Clone, Default)]
pub struct ReconciliationView {
    state: ViewState,
    filtered: Vec<Transaction>,
}

impl ReconciliationView {
    /// Starts unselected, showing every transaction.
    pub fn new(transactions: &[Transaction]) -> Self {
        ReconciliationView {
            state: ViewState::Unselected,
            filtered: transactions.to_vec(),
        }
    }

    pub fn select(&mut self, budget: &Budget, transactions: &[Transaction]) {
        debug!(
            "Reconciling budget {} (category {})",
            budget.budget_id, budget.category_id
        );
        self.state = ViewState::Selected(budget.clone());
        self.refresh(transactions);
    }

    pub fn clear(&mut self, transactions: &[Transaction]) {
        self.state = ViewState::Unselected;
        self.refresh(transactions);
    }

    /// Recomputes the filtered set for the current state.
    pub fn refresh(&mut self, transactions: &[Transaction]) {
        self.filtered = match &self.state {
            ViewState::Unselected => transactions.to_vec(),
            ViewState::Selected(budget) => transactions
                .iter()
                .filter(|t| matches_budget(t, budget))
                .cloned()
                .collect(),
        };
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn selected_budget(&self) -> Option<&Budget> {
        match &self.state {
            ViewState::Selected(budget) => Some(budget),
            ViewState::Unselected => None,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.filtered
    }

    /// Sum of amounts in the filtered set.
    ///
    /// When nothing is selected this adds up every transaction regardless
    /// of type.
    pub fn spent(&self) -> Decimal {
        self.filtered
            .iter()
            .fold(Decimal::ZERO, |sum, t| sum.saturating_add(t.amount))
    }

    pub fn remaining(&self, budget: &Budget) -> Decimal {
        budget.limit_amount.saturating_sub(self.spent())
    }

    pub fn progress(&self, budget: &Budget) -> Decimal {
        percent_of(self.spent(), budget.limit_amount)
    }

    /// Progress of the selected budget, `None` when nothing is selected.
    pub fn summary(&self) -> Option<BudgetProgress> {
        self.selected_budget()
            .map(|budget| budget_progress(budget, &self.filtered))
    }
}
