use std::sync::Arc;

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{
        Budget, BudgetProgress, Category, DashboardSummary, NewBudget, NewTransaction,
        ReconciliationState, Transaction, TransactionTotals, TransactionType, TransactionUpdate,
    },
};
use anyhow::Context;
use axum::http::{HeaderValue, StatusCode};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use budget_ledger_core::{
    budgets::BudgetServiceTrait, categories, constants::DEFAULT_RECENT_TRANSACTIONS,
    transactions::TransactionServiceTrait,
};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/categories", responses((status = 200, body = [Category])))]
async fn list_categories() -> Json<Vec<Category>> {
    Json(
        categories::list_categories()
            .into_iter()
            .map(Category::from)
            .collect(),
    )
}

/// Re-filters the shared reconciliation view after the ledger changed.
///
/// A selected budget is re-read so edits show up; if it was deleted the
/// view falls back to showing everything.
fn refresh_reconciliation(state: &AppState) -> ApiResult<()> {
    let transactions = state.transaction_service.list();
    let mut view = state.reconciliation();
    let selected_id = view.selected_budget().map(|b| b.budget_id);
    match selected_id {
        Some(budget_id) => match state.budget_service.get(budget_id)? {
            Some(budget) => view.select(&budget, &transactions),
            None => view.clear(&transactions),
        },
        None => view.refresh(&transactions),
    }
    Ok(())
}

// ===================== Transactions =====================

#[utoipa::path(get, path = "/api/v1/transactions", responses((status = 200, body = [Transaction])))]
async fn list_transactions(State(state): State<Arc<AppState>>) -> Json<Vec<Transaction>> {
    let transactions = state.transaction_service.list();
    Json(transactions.into_iter().map(Transaction::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = NewTransaction,
    responses((status = 200, body = Transaction), (status = 400, description = "Invalid transaction"))
)]
async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewTransaction>,
) -> ApiResult<Json<Transaction>> {
    let created = state
        .transaction_service
        .add(payload.into())
        .into_result("Transaction")?;
    refresh_reconciliation(&state)?;
    Ok(Json(Transaction::from(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/transactions/{id}",
    params(("id" = i64, Path, description = "Transaction id")),
    request_body = TransactionUpdate,
    responses((status = 200, body = Transaction), (status = 400, description = "Invalid input"), (status = 404, description = "Not found"))
)]
async fn update_transaction(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TransactionUpdate>,
) -> ApiResult<Json<Transaction>> {
    let updated = state
        .transaction_service
        .edit(id, payload.into())
        .into_result("Transaction")?;
    refresh_reconciliation(&state)?;
    Ok(Json(Transaction::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{id}",
    params(("id" = i64, Path, description = "Transaction id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
async fn delete_transaction(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .transaction_service
        .delete(id)
        .into_result("Transaction")?;
    refresh_reconciliation(&state)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/v1/transactions/totals", responses((status = 200, body = TransactionTotals)))]
async fn get_transaction_totals(State(state): State<Arc<AppState>>) -> Json<TransactionTotals> {
    Json(state.transaction_service.totals().into())
}

// ===================== Budgets =====================

#[utoipa::path(get, path = "/api/v1/budgets", responses((status = 200, body = [Budget])))]
async fn list_budgets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Budget>>> {
    let budgets = state.budget_service.list()?;
    Ok(Json(budgets.into_iter().map(Budget::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/budgets",
    request_body = NewBudget,
    responses((status = 200, body = Budget), (status = 400, description = "Invalid budget"))
)]
async fn create_budget(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewBudget>,
) -> ApiResult<Json<Budget>> {
    let created = state
        .budget_service
        .add(payload.into())?
        .into_result("Budget")?;
    Ok(Json(Budget::from(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/budgets/{id}",
    params(("id" = i64, Path, description = "Budget id")),
    request_body = NewBudget,
    responses((status = 200, body = Budget), (status = 400, description = "Invalid input"), (status = 404, description = "Not found"))
)]
async fn update_budget(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewBudget>,
) -> ApiResult<Json<Budget>> {
    let updated = state
        .budget_service
        .edit(id, payload.into())?
        .into_result("Budget")?;
    refresh_reconciliation(&state)?;
    Ok(Json(Budget::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/budgets/{id}",
    params(("id" = i64, Path, description = "Budget id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
async fn delete_budget(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.budget_service.delete(id)?.into_result("Budget")?;
    refresh_reconciliation(&state)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===================== Reconciliation =====================

#[utoipa::path(get, path = "/api/v1/reconciliation", responses((status = 200, body = ReconciliationState)))]
async fn get_reconciliation(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ReconciliationState>> {
    refresh_reconciliation(&state)?;
    let view = state.reconciliation();
    Ok(Json(ReconciliationState::from(&*view)))
}

#[utoipa::path(
    post,
    path = "/api/v1/reconciliation/select/{budget_id}",
    params(("budget_id" = i64, Path, description = "Budget to reconcile")),
    responses((status = 200, body = ReconciliationState), (status = 404, description = "Unknown budget"))
)]
async fn select_reconciliation_budget(
    Path(budget_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ReconciliationState>> {
    let budget = state
        .budget_service
        .get(budget_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Budget with id {} not found", budget_id)))?;
    let transactions = state.transaction_service.list();

    let mut view = state.reconciliation();
    view.select(&budget, &transactions);
    tracing::debug!("Reconciliation focused on budget {}", budget_id);
    Ok(Json(ReconciliationState::from(&*view)))
}

#[utoipa::path(post, path = "/api/v1/reconciliation/clear", responses((status = 200, body = ReconciliationState)))]
async fn clear_reconciliation(State(state): State<Arc<AppState>>) -> Json<ReconciliationState> {
    let transactions = state.transaction_service.list();
    let mut view = state.reconciliation();
    view.clear(&transactions);
    Json(ReconciliationState::from(&*view))
}

// ===================== Dashboard =====================

#[derive(Deserialize)]
struct DashboardQuery {
    recent: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(("recent" = Option<usize>, Query, description = "Number of recent transactions")),
    responses((status = 200, body = DashboardSummary))
)]
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardSummary>> {
    let summary = state
        .dashboard_service
        .get_summary(q.recent.unwrap_or(DEFAULT_RECENT_TRANSACTIONS))?;
    Ok(Json(summary.into()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        list_categories,
        list_transactions,
        create_transaction,
        update_transaction,
        delete_transaction,
        get_transaction_totals,
        list_budgets,
        create_budget,
        update_budget,
        delete_budget,
        get_reconciliation,
        select_reconciliation_budget,
        clear_reconciliation,
        get_dashboard
    ),
    components(schemas(
        Category,
        Transaction,
        TransactionType,
        NewTransaction,
        TransactionUpdate,
        TransactionTotals,
        Budget,
        NewBudget,
        BudgetProgress,
        ReconciliationState,
        DashboardSummary
    )),
    tags((name = "budget-ledger"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/categories", get(list_categories))
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/totals", get(get_transaction_totals))
        .route(
            "/transactions/{id}",
            put(update_transaction).delete(delete_transaction),
        )
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/{id}", put(update_budget).delete(delete_budget))
        .route("/reconciliation", get(get_reconciliation))
        .route(
            "/reconciliation/select/{budget_id}",
            post(select_reconciliation_budget),
        )
        .route("/reconciliation/clear", post(clear_reconciliation))
        .route("/dashboard", get(get_dashboard));

    Ok(Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http()))
}
