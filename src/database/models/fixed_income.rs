use sqlx::FromRow;

pub const DEFAULT_FIXED_INCOME_CATEGORY: &str = "Salary";

/// The single row of the `fixed_income` table, if one has been set.
#[derive(FromRow, Debug, Clone)]
pub struct FixedIncomeRecord {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
}
