use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid transaction type")]
pub struct InvalidTransactionType;

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

// Exact match only: "Income" or " expense" are rejected.
impl FromStr for TransactionType {
    type Err = InvalidTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(InvalidTransactionType),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `transactions` table.
#[derive(FromRow, Debug, Clone)]
pub struct TransactionRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub category: String,
    #[sqlx(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub is_fixed_income: bool, // never set by the API, fixed income lives in its own table
}
