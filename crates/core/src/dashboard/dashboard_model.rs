use serde::{Deserialize, Serialize};

use crate::reconciliation::BudgetProgress;
use crate::transactions::{Transaction, TransactionTotals};

/// Snapshot of the ledger for an overview screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub totals: TransactionTotals,
    pub transaction_count: usize,
    pub budget_count: usize,
    pub category_count: usize,
    /// Leading transactions in store order, i.e. most recently added first
    pub recent_transactions: Vec<Transaction>,
    pub budgets: Vec<BudgetProgress>,
    pub over_budget_count: usize,
}
