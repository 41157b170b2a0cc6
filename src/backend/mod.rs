mod handlers;
mod routes;

pub mod error;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use sqlx::{Pool, Sqlite};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::budget::{BudgetStore, InMemoryBudgetStore};

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub budgets: Arc<dyn BudgetStore>,
}

impl AppState {
    /// State backed by a process-wide in-memory budget store.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self::with_budget_store(pool, Arc::new(InMemoryBudgetStore::new()))
    }

    pub fn with_budget_store(pool: Pool<Sqlite>, budgets: Arc<dyn BudgetStore>) -> Self {
        Self { db: pool, budgets }
    }
}

/// The full HTTP application: API routes, health check, open CORS and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "Backend is running" }))
        .merge(routes::api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
