//! Per-category spending limits.
//!
//! Budgets are not persisted. [`InMemoryBudgetStore`] keeps them for the
//! lifetime of the process; anything implementing [`BudgetStore`] can be
//! injected in its place through [`crate::backend::AppState::with_budget_store`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Sets the limit for `category`, overwriting any previous one.
    async fn set(&self, category: String, limit: f64);

    async fn get(&self, category: &str) -> Option<f64>;

    /// Every configured category and its limit.
    async fn list(&self) -> BTreeMap<String, f64>;
}

#[derive(Debug, Default)]
pub struct InMemoryBudgetStore {
    budgets: RwLock<BTreeMap<String, f64>>,
}

impl InMemoryBudgetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BudgetStore for InMemoryBudgetStore {
    async fn set(&self, category: String, limit: f64) {
        self.budgets.write().await.insert(category, limit);
    }

    async fn get(&self, category: &str) -> Option<f64> {
        self.budgets.read().await.get(category).copied()
    }

    async fn list(&self) -> BTreeMap<String, f64> {
        self.budgets.read().await.clone()
    }
}
