use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, FromRow)]
pub struct IncomeExpenseTotals {
    pub variable_income: f64,
    pub total_expense: f64,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CategorySpending {
    pub category: String,
    pub total_amount: f64,
}
