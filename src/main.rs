// src/main.rs
use personal_finance_api::{backend, config::Config, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    personal_finance_api::init_tracing();

    tracing::info!(database_url = %config.database_url, "opening database");
    let pool = database::db::connection::get_db_pool(&config.database_url).await?;
    database::db::migrate::run_migrations(&pool).await?;

    let state = backend::AppState::new(pool);
    backend::run_server(state, config.bind_addr).await?;

    Ok(())
}
