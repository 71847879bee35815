use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::Budget;

/// Which transactions the reconciliation view is showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// Every transaction, no budget in focus.
    #[default]
    Unselected,
    /// Only expenses in the budget's category.
    Selected(Budget),
}

/// Spending against one budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub budget_id: i64,
    pub category_id: i32,
    pub category_name: String,
    pub limit_amount: Decimal,
    pub spent: Decimal,
    /// `limit_amount - spent`, negative once the budget is exceeded
    pub remaining: Decimal,
    /// Percentage of the limit used; 0 for a zero limit, above 100 when over
    pub progress: Decimal,
    pub is_over_budget: bool,
}
