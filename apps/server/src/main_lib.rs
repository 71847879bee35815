use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{Config, LogFormat};
use budget_ledger_core::{
    budgets::{BudgetService, BudgetServiceTrait, KeyValueBudgetRepository},
    dashboard::DashboardService,
    reconciliation::ReconciliationView,
    transactions::{sample_transactions, TransactionService, TransactionServiceTrait},
    utils::{Clock, SystemClock},
};
use budget_ledger_storage_sqlite::{db, SqliteKeyValueStore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub dashboard_service: Arc<DashboardService>,
    /// Shared reconciliation focus; every client sees the same selection
    pub reconciliation: Mutex<ReconciliationView>,
}

impl AppState {
    pub fn reconciliation(&self) -> MutexGuard<'_, ReconciliationView> {
        self.reconciliation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

/// Opens the database and wires the services. Blocking; runs once at startup.
pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let key_value_store = Arc::new(SqliteKeyValueStore::new(pool.clone()));
    let budget_repository = Arc::new(KeyValueBudgetRepository::new(key_value_store));
    let budget_service: Arc<dyn BudgetServiceTrait> =
        Arc::new(BudgetService::new(budget_repository));
    let budgets = budget_service.load()?;
    tracing::info!("Loaded {} budgets", budgets.len());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let initial_transactions = if config.seed_sample_transactions {
        sample_transactions(clock.now())
    } else {
        Vec::new()
    };
    let transaction_service: Arc<dyn TransactionServiceTrait> = Arc::new(
        TransactionService::with_transactions(clock, initial_transactions),
    );

    let dashboard_service = Arc::new(DashboardService::new(
        transaction_service.clone(),
        budget_service.clone(),
    ));
    let reconciliation = Mutex::new(ReconciliationView::new(&transaction_service.list()));

    Ok(Arc::new(AppState {
        transaction_service,
        budget_service,
        dashboard_service,
        reconciliation,
    }))
}
