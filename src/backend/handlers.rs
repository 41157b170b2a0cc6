// src/backend/handlers.rs
use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Json};
use tracing::instrument;

use crate::backend::error::ApiError;
use crate::backend::types::{
    CreateTransaction, FixedIncome, MessageResponse, SetBudget, SetFixedIncome, Transaction,
};
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::TransactionType;
use crate::ledger::{self, BudgetStatus, Summary};

const OVERFLOW_MESSAGE: &str = "totals exceed the representable range";

// Amounts and limits must be real, non-negative numbers.
fn ensure_non_negative(field: &str, value: f64) -> Result<(), ApiError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "{field} must be a non-negative number"
        )))
    }
}

/*==========Transactions=========== */

#[instrument(skip(state, payload), fields(category = %payload.category, kind = %payload.kind))]
pub async fn add_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let kind: TransactionType = payload.kind.parse()?;
    ensure_non_negative("amount", payload.amount)?;

    let record = queries::insert_transaction(
        &state.db,
        payload.date,
        payload.amount,
        &payload.category,
        kind,
        &payload.description,
    )
    .await?;

    tracing::info!(id = %record.id, kind = %record.kind, "transaction recorded");

    Ok((StatusCode::CREATED, Json(record.into())))
}

#[instrument(skip(state))]
pub async fn get_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let records = queries::list_transactions(&state.db).await?;
    Ok(Json(records.into_iter().map(Transaction::from).collect()))
}

#[instrument(skip(state))]
pub async fn transaction_summary(State(state): State<AppState>) -> Result<Json<Summary>, ApiError> {
    let totals = queries::income_expense_totals(&state.db).await?;
    let fixed = queries::get_fixed_income(&state.db).await?;

    let summary = Summary::from_totals(totals, fixed.map(|f| f.amount));
    if !summary.is_finite() {
        return Err(ApiError::Internal(OVERFLOW_MESSAGE.to_string()));
    }

    Ok(Json(summary))
}

/*==========Fixed income=========== */

#[instrument(skip(state, payload), fields(category = %payload.category))]
pub async fn set_fixed_income(
    State(state): State<AppState>,
    Json(payload): Json<SetFixedIncome>,
) -> Result<Json<FixedIncome>, ApiError> {
    ensure_non_negative("amount", payload.amount)?;

    let record = queries::replace_fixed_income(
        &state.db,
        payload.amount,
        &payload.description,
        &payload.category,
    )
    .await?;

    tracing::info!(id = %record.id, amount = record.amount, "fixed income replaced");

    Ok(Json(record.into()))
}

// Responds with JSON `null` while no fixed income has been set.
#[instrument(skip(state))]
pub async fn get_fixed_income(
    State(state): State<AppState>,
) -> Result<Json<Option<FixedIncome>>, ApiError> {
    let record = queries::get_fixed_income(&state.db).await?;
    Ok(Json(record.map(FixedIncome::from)))
}

/*==========Budgets=========== */

#[instrument(skip(state, payload), fields(category = %payload.category))]
pub async fn set_budget(
    State(state): State<AppState>,
    Json(payload): Json<SetBudget>,
) -> Result<Json<MessageResponse>, ApiError> {
    ensure_non_negative("limit", payload.limit)?;

    let message = format!("Budget set for {}", payload.category);
    state.budgets.set(payload.category, payload.limit).await;

    Ok(Json(MessageResponse { message }))
}

#[instrument(skip(state))]
pub async fn get_budgets(State(state): State<AppState>) -> Json<BTreeMap<String, f64>> {
    Json(state.budgets.list().await)
}

#[instrument(skip(state))]
pub async fn budget_status(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, BudgetStatus>>, ApiError> {
    let budgets = state.budgets.list().await;
    if budgets.is_empty() {
        return Ok(Json(BTreeMap::new()));
    }

    let spending = queries::expense_totals_by_category(&state.db).await?;
    let status = ledger::budget_status(&budgets, &spending);
    if status.values().any(|s| !s.is_finite()) {
        return Err(ApiError::Internal(OVERFLOW_MESSAGE.to_string()));
    }

    Ok(Json(status))
}
