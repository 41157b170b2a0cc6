use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::database::models::{
    CategorySpending, FixedIncomeRecord, IncomeExpenseTotals, TransactionRecord, TransactionType,
};
/*
SQL for the two persisted tables. Every function borrows a connection from the
pool for the duration of a single statement (or a single sqlx transaction) and
hands it back before returning.
 */

/*==========Transaction Queries=========== */

// Insert a user-entered transaction. Ids are server generated and the fixed
// income flag is always written as false.
pub async fn insert_transaction(
    pool: &Pool<Sqlite>,
    date: DateTime<Utc>,
    amount: f64,
    category: &str,
    kind: TransactionType,
    description: &str,
) -> Result<TransactionRecord, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query_as::<_, TransactionRecord>(
        r#"
        INSERT INTO transactions (id, date, amount, category, type, description, is_fixed_income)
        VALUES (?, ?, ?, ?, ?, ?, 0)
        RETURNING id, date, amount, category, type, description, is_fixed_income
        "#,
    )
    .bind(id)
    .bind(date)
    .bind(amount)
    .bind(category)
    .bind(kind)
    .bind(description)
    .fetch_one(pool)
    .await
}

// All transactions, in whatever order SQLite hands them back.
pub async fn list_transactions(pool: &Pool<Sqlite>) -> Result<Vec<TransactionRecord>, sqlx::Error> {
    sqlx::query_as::<_, TransactionRecord>(
        r#"
        SELECT id, date, amount, category, type, description, is_fixed_income
        FROM transactions
        "#,
    )
    .fetch_all(pool)
    .await
}

// Variable income excludes rows flagged as fixed income; expenses count every row.
pub async fn income_expense_totals(pool: &Pool<Sqlite>) -> Result<IncomeExpenseTotals, sqlx::Error> {
    sqlx::query_as::<_, IncomeExpenseTotals>(
        r#"
        SELECT
            CAST(COALESCE(SUM(CASE WHEN type = 'income' AND is_fixed_income = 0 THEN amount END), 0.0) AS REAL)
                AS variable_income,
            CAST(COALESCE(SUM(CASE WHEN type = 'expense' THEN amount END), 0.0) AS REAL)
                AS total_expense
        FROM transactions
        "#,
    )
    .fetch_one(pool)
    .await
}

// All-time expense sum per category. Categories with no expenses are absent.
pub async fn expense_totals_by_category(
    pool: &Pool<Sqlite>,
) -> Result<Vec<CategorySpending>, sqlx::Error> {
    sqlx::query_as::<_, CategorySpending>(
        r#"
        SELECT category, CAST(SUM(amount) AS REAL) AS total_amount
        FROM transactions
        WHERE type = 'expense'
        GROUP BY category
        ORDER BY category ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/*==========Fixed Income Queries=========== */

// Full replace: every existing row goes, exactly one new row comes in.
// Both statements share one sqlx transaction so readers never observe an empty table.
pub async fn replace_fixed_income(
    pool: &Pool<Sqlite>,
    amount: f64,
    description: &str,
    category: &str,
) -> Result<FixedIncomeRecord, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM fixed_income")
        .execute(&mut *tx)
        .await?;

    let record = sqlx::query_as::<_, FixedIncomeRecord>(
        r#"
        INSERT INTO fixed_income (id, amount, description, category)
        VALUES (?, ?, ?, ?)
        RETURNING id, amount, description, category
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(amount)
    .bind(description)
    .bind(category)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(record)
}

pub async fn get_fixed_income(pool: &Pool<Sqlite>) -> Result<Option<FixedIncomeRecord>, sqlx::Error> {
    sqlx::query_as::<_, FixedIncomeRecord>(
        "SELECT id, amount, description, category FROM fixed_income LIMIT 1",
    )
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::db::migrate::run_migrations;
    use chrono::TimeZone;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> Pool<Sqlite> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn insert_transaction_assigns_id_and_clears_fixed_flag() {
        let pool = test_pool().await;

        let record = insert_transaction(&pool, day(1), 45.5, "Groceries", TransactionType::Expense, "Metro")
            .await
            .unwrap();

        assert!(!record.id.is_empty());
        assert!(!record.is_fixed_income);
        assert_eq!(record.kind, TransactionType::Expense);
        assert_eq!(record.date, day(1));
        assert_eq!(record.description, "Metro");

        let all = list_transactions(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, record.id);
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let pool = test_pool().await;

        let a = insert_transaction(&pool, day(1), 10.0, "Food", TransactionType::Expense, "")
            .await
            .unwrap();
        let b = insert_transaction(&pool, day(1), 10.0, "Food", TransactionType::Expense, "")
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn totals_are_zero_on_empty_table() {
        let pool = test_pool().await;

        let totals = income_expense_totals(&pool).await.unwrap();

        assert_eq!(totals, IncomeExpenseTotals::default());
        assert!(expense_totals_by_category(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn totals_split_income_and_expense() {
        let pool = test_pool().await;
        insert_transaction(&pool, day(1), 1000.0, "Salary", TransactionType::Income, "")
            .await
            .unwrap();
        insert_transaction(&pool, day(2), 200.0, "Rent", TransactionType::Expense, "")
            .await
            .unwrap();
        insert_transaction(&pool, day(3), 50.0, "Rent", TransactionType::Expense, "")
            .await
            .unwrap();
        insert_transaction(&pool, day(3), 25.0, "Food", TransactionType::Expense, "")
            .await
            .unwrap();

        let totals = income_expense_totals(&pool).await.unwrap();
        assert_eq!(totals.variable_income, 1000.0);
        assert_eq!(totals.total_expense, 275.0);

        let by_category = expense_totals_by_category(&pool).await.unwrap();
        assert_eq!(
            by_category,
            vec![
                CategorySpending { category: "Food".into(), total_amount: 25.0 },
                CategorySpending { category: "Rent".into(), total_amount: 250.0 },
            ]
        );
    }

    #[tokio::test]
    async fn rows_flagged_as_fixed_income_are_not_variable_income() {
        let pool = test_pool().await;
        insert_transaction(&pool, day(1), 300.0, "Freelance", TransactionType::Income, "")
            .await
            .unwrap();
        sqlx::query(
            r#"
            INSERT INTO transactions (id, date, amount, category, type, description, is_fixed_income)
            VALUES ('legacy-income', ?, 900.0, 'Salary', 'income', '', 1),
                   ('legacy-expense', ?, 40.0, 'Rent', 'expense', '', 1)
            "#,
        )
        .bind(day(2))
        .bind(day(2))
        .execute(&pool)
        .await
        .unwrap();

        let totals = income_expense_totals(&pool).await.unwrap();

        assert_eq!(totals.variable_income, 300.0);
        // Expenses count regardless of the flag.
        assert_eq!(totals.total_expense, 40.0);
    }

    #[tokio::test]
    async fn replacing_fixed_income_keeps_a_single_row() {
        let pool = test_pool().await;
        assert!(get_fixed_income(&pool).await.unwrap().is_none());

        let first = replace_fixed_income(&pool, 500.0, "", "Salary").await.unwrap();
        let second = replace_fixed_income(&pool, 750.0, "raise", "Salary").await.unwrap();
        assert_ne!(first.id, second.id);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fixed_income")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        let current = get_fixed_income(&pool).await.unwrap().unwrap();
        assert_eq!(current.id, second.id);
        assert_eq!(current.amount, 750.0);
        assert_eq!(current.description, "raise");
    }
}
