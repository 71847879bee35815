//! Dashboard module - read-only rollup of the ledger.

mod dashboard_model;
mod dashboard_service;

pub use dashboard_model::DashboardSummary;
pub use dashboard_service::DashboardService;
