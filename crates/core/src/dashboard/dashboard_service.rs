use log::debug;
use std::sync::Arc;

use super::dashboard_model::DashboardSummary;
use crate::budgets::BudgetServiceTrait;
use crate::categories::CATEGORIES;
use crate::errors::Result;
use crate::reconciliation::{budget_progress, BudgetProgress};
use crate::transactions::TransactionServiceTrait;

pub struct DashboardService {
    transaction_service: Arc<dyn TransactionServiceTrait>,
    budget_service: Arc<dyn BudgetServiceTrait>,
}

impl DashboardService {
    pub fn new(
        transaction_service: Arc<dyn TransactionServiceTrait>,
        budget_service: Arc<dyn BudgetServiceTrait>,
    ) -> Self {
        DashboardService {
            transaction_service,
            budget_service,
        }
    }

    /// Builds the summary, listing at most `recent_limit` recent transactions.
    pub fn get_summary(&self, recent_limit: usize) -> Result<DashboardSummary> {
        let transactions = self.transaction_service.list();
        let budgets = self.budget_service.list()?;

        let progress: Vec<BudgetProgress> = budgets
            .iter()
            .map(|budget| budget_progress(budget, &transactions))
            .collect();
        let over_budget_count = progress.iter().filter(|p| p.is_over_budget).count();

        debug!(
            "Dashboard over {} transactions and {} budgets ({} over)",
            transactions.len(),
            budgets.len(),
            over_budget_count
        );

        Ok(DashboardSummary {
            totals: self.transaction_service.totals(),
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            category_count: CATEGORIES.len(),
            recent_transactions: transactions.iter().take(recent_limit).cloned().collect(),
            budgets: progress,
            over_budget_count,
        })
    }
}
