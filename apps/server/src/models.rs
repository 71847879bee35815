use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use budget_ledger_core::budgets as core_budgets;
use budget_ledger_core::categories as core_categories;
use budget_ledger_core::constants::DISPLAY_DECIMAL_PRECISION;
use budget_ledger_core::dashboard as core_dashboard;
use budget_ledger_core::reconciliation as core_reconciliation;
use budget_ledger_core::transactions as core_transactions;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub icon: String,
}

impl From<core_categories::Category> for Category {
    fn from(c: core_categories::Category) -> Self {
        Self {
            id: c.id,
            name: c.name.to_string(),
            icon: c.icon.to_string(),
        }
    }
}

// ===================== Transactions =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl From<core_transactions::TransactionType> for TransactionType {
    fn from(t: core_transactions::TransactionType) -> Self {
        match t {
            core_transactions::TransactionType::Income => TransactionType::Income,
            core_transactions::TransactionType::Expense => TransactionType::Expense,
        }
    }
}

impl From<TransactionType> for core_transactions::TransactionType {
    fn from(t: TransactionType) -> Self {
        match t {
            TransactionType::Income => core_transactions::TransactionType::Income,
            TransactionType::Expense => core_transactions::TransactionType::Expense,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub category: String,
    pub category_id: Option<i32>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

impl From<core_transactions::Transaction> for Transaction {
    fn from(t: core_transactions::Transaction) -> Self {
        Self {
            id: t.id,
            date: t.date,
            description: t.description,
            category: t.category,
            category_id: t.category_id,
            transaction_type: t.transaction_type.into(),
            amount: t.amount,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Defaults to now
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub category: String,
    #[serde(rename = "type", default)]
    pub transaction_type: TransactionType,
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

impl From<NewTransaction> for core_transactions::NewTransaction {
    fn from(t: NewTransaction) -> Self {
        Self {
            date: t.date,
            description: t.description,
            category: t.category,
            transaction_type: t.transaction_type.into(),
            amount: t.amount,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub date: DateTime<Utc>,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

impl From<TransactionUpdate> for core_transactions::TransactionUpdate {
    fn from(t: TransactionUpdate) -> Self {
        Self {
            date: t.date,
            description: t.description,
            category: t.category,
            transaction_type: t.transaction_type.into(),
            amount: t.amount,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTotals {
    #[schema(value_type = f64)]
    pub income: Decimal,
    #[schema(value_type = f64)]
    pub expense: Decimal,
    #[schema(value_type = f64)]
    pub net: Decimal,
}

impl From<core_transactions::TransactionTotals> for TransactionTotals {
    fn from(t: core_transactions::TransactionTotals) -> Self {
        Self {
            income: t.income,
            expense: t.expense,
            net: t.net,
        }
    }
}

// ===================== Budgets =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub budget_id: i64,
    pub user_id: i64,
    pub category_id: i32,
    #[schema(value_type = f64)]
    pub limit_amount: Decimal,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub category_name: String,
    /// Icon slug of `category_id`, `tag` for unknown categories
    pub category_icon: String,
}

impl From<core_budgets::Budget> for Budget {
    fn from(b: core_budgets::Budget) -> Self {
        Self {
            budget_id: b.budget_id,
            user_id: b.user_id,
            category_id: b.category_id,
            limit_amount: b.limit_amount,
            from_date: b.from_date,
            to_date: b.to_date,
            category_name: b.category_name,
            category_icon: core_categories::resolve_category_icon(b.category_id).to_string(),
        }
    }
}

/// Body for creating a budget or replacing one.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub category_id: i32,
    #[schema(value_type = f64)]
    pub limit_amount: Decimal,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl From<NewBudget> for core_budgets::NewBudget {
    fn from(b: NewBudget) -> Self {
        Self {
            user_id: b.user_id,
            category_id: b.category_id,
            limit_amount: b.limit_amount,
            from_date: b.from_date,
            to_date: b.to_date,
        }
    }
}

// ===================== Reconciliation =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub budget_id: i64,
    pub category_id: i32,
    pub category_name: String,
    #[schema(value_type = f64)]
    pub limit_amount: Decimal,
    #[schema(value_type = f64)]
    pub spent: Decimal,
    #[schema(value_type = f64)]
    pub remaining: Decimal,
    /// Percent of the limit used, rounded for display
    #[schema(value_type = f64)]
    pub progress: Decimal,
    pub is_over_budget: bool,
}

impl From<core_reconciliation::BudgetProgress> for BudgetProgress {
    fn from(p: core_reconciliation::BudgetProgress) -> Self {
        Self {
            budget_id: p.budget_id,
            category_id: p.category_id,
            category_name: p.category_name,
            limit_amount: p.limit_amount,
            spent: p.spent,
            remaining: p.remaining,
            progress: p.progress.round_dp(DISPLAY_DECIMAL_PRECISION),
            is_over_budget: p.is_over_budget,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationState {
    /// `None` when every transaction is shown
    pub selected_budget: Option<Budget>,
    pub transactions: Vec<Transaction>,
    #[schema(value_type = f64)]
    pub spent: Decimal,
    pub summary: Option<BudgetProgress>,
}

impl From<&core_reconciliation::ReconciliationView> for ReconciliationState {
    fn from(view: &core_reconciliation::ReconciliationView) -> Self {
        Self {
            selected_budget: view.selected_budget().cloned().map(Budget::from),
            transactions: view
                .transactions()
                .iter()
                .cloned()
                .map(Transaction::from)
                .collect(),
            spent: view.spent(),
            summary: view.summary().map(BudgetProgress::from),
        }
    }
}

// ===================== Dashboard =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub totals: TransactionTotals,
    pub transaction_count: usize,
    pub budget_count: usize,
    pub category_count: usize,
    pub recent_transactions: Vec<Transaction>,
    pub budgets: Vec<BudgetProgress>,
    pub over_budget_count: usize,
}

impl From<core_dashboard::DashboardSummary> for DashboardSummary {
    fn from(s: core_dashboard::DashboardSummary) -> Self {
        Self {
            totals: s.totals.into(),
            transaction_count: s.transaction_count,
            budget_count: s.budget_count,
            category_count: s.category_count,
            recent_transactions: s
                .recent_transactions
                .into_iter()
                .map(Transaction::from)
                .collect(),
            budgets: s.budgets.into_iter().map(BudgetProgress::from).collect(),
            over_budget_count: s.over_budget_count,
        }
    }
}
