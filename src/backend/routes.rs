use axum::{routing::get, Router};

use crate::backend::{handlers, AppState};

// Each collection is reachable with and without its trailing slash.
pub fn api_routes() -> Router<AppState> {
    let transactions = get(handlers::get_transactions).post(handlers::add_transaction);
    let fixed_income = get(handlers::get_fixed_income).post(handlers::set_fixed_income);
    let budget = get(handlers::get_budgets).post(handlers::set_budget);

    Router::new()
        .route("/transactions", transactions.clone())
        .route("/transactions/", transactions)
        .route("/transactions/summary", get(handlers::transaction_summary))
        .route("/fixed-income", fixed_income.clone())
        .route("/fixed-income/", fixed_income)
        .route("/budget", budget.clone())
        .route("/budget/", budget)
        .route("/budget/status", get(handlers::budget_status))
}
