// Request and response bodies. Storage records are converted through the
// `From` impls below and nowhere else.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::database::models::{
    FixedIncomeRecord, TransactionRecord, TransactionType, DEFAULT_FIXED_INCOME_CATEGORY,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateTransaction {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub category: String,
    // Kept as a raw string so an unknown type is a 400 with a message rather
    // than a generic body rejection.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

// RFC 3339 first; a timestamp without an offset (or a bare date) is read as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(raw.trim()).ok_or_else(|| {
        de::Error::custom(format!("invalid timestamp `{raw}`, expected ISO 8601"))
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    pub id: String,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            amount: record.amount,
            category: record.category,
            kind: record.kind,
            description: record.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetFixedIncome {
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_fixed_income_category")]
    pub category: String,
}

fn default_fixed_income_category() -> String {
    DEFAULT_FIXED_INCOME_CATEGORY.to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FixedIncome {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
}

impl From<FixedIncomeRecord> for FixedIncome {
    fn from(record: FixedIncomeRecord) -> Self {
        Self {
            id: record.id,
            amount: record.amount,
            description: record.description,
            category: record.category,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetBudget {
    pub category: String,
    pub limit: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
