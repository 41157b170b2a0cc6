use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::database::models::{CategorySpending, IncomeExpenseTotals};

/// Income, expense and balance figures across every recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub fixed_income: f64,
    pub variable_income: f64,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

impl Summary {
    pub fn from_totals(totals: IncomeExpenseTotals, fixed_income: Option<f64>) -> Self {
        let fixed_income = fixed_income.unwrap_or(0.0);
        let total_income = totals.variable_income + fixed_income;

        Self {
            fixed_income,
            variable_income: totals.variable_income,
            total_income,
            total_expense: totals.total_expense,
            balance: total_income - totals.total_expense,
        }
    }

    /// False once a sum has overflowed, which JSON cannot represent.
    pub fn is_finite(&self) -> bool {
        [
            self.fixed_income,
            self.variable_income,
            self.total_income,
            self.total_expense,
            self.balance,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
}

impl BudgetStatus {
    pub fn is_finite(&self) -> bool {
        self.limit.is_finite() && self.spent.is_finite() && self.remaining.is_finite()
    }
}

// Only budgeted categories are reported; spending in other categories is ignored.
pub fn budget_status(
    budgets: &BTreeMap<String, f64>,
    spending: &[CategorySpending],
) -> BTreeMap<String, BudgetStatus> {
    let spent_by_category: HashMap<&str, f64> = spending
        .iter()
        .map(|s| (s.category.as_str(), s.total_amount))
        .collect();

    budgets
        .iter()
        .map(|(category, &limit)| {
            let spent = spent_by_category
                .get(category.as_str())
                .copied()
                .unwrap_or(0.0);
            (
                category.clone(),
                BudgetStatus {
                    limit,
                    spent,
                    remaining: limit - spent,
                },
            )
        })
        .collect()
}
