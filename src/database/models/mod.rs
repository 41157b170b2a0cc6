pub mod fixed_income;
pub mod totals;
pub mod transaction;

pub use fixed_income::{FixedIncomeRecord, DEFAULT_FIXED_INCOME_CATEGORY};
pub use totals::{CategorySpending, IncomeExpenseTotals};
pub use transaction::{InvalidTransactionType, TransactionRecord, TransactionType};
