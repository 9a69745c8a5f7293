use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use shared_types::AppError;

use crate::error_convert::SqlxErrorExt;

/// Create a database connection pool from environment variables.
/// Uses `connect_lazy` so no connections open until the first query.
pub fn create_pool() -> Result<Pool<Postgres>, AppError> {
    // Load .env file if present (ignored in production where env vars are set directly).
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::config("DATABASE_URL must be set"))?;

    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(&database_url)
        .map_err(SqlxErrorExt::into_app_error)
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to run database migrations: {e}")))
}

/// Open the pool and bring the schema up to date.
pub async fn connect() -> Result<Pool<Postgres>, AppError> {
    let pool = create_pool()?;
    run_migrations(&pool).await?;
    Ok(pool)
}
