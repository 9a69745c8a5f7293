use chrono::{DateTime, Utc};
use shared_types::{AppError, Court};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// List every court. Each one gets an archive, even when empty.
pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<Court>, AppError> {
    let rows = sqlx::query_as::<_, Court>(
        r#"
        SELECT id, name, full_name, court_type, citation_string, url,
               in_use, created_at, updated_at
        FROM courts
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

/// Page through courts by id, optionally only those modified after a cutoff.
pub async fn list_batch(
    pool: &Pool<Postgres>,
    modified_after: Option<DateTime<Utc>>,
    after_id: Option<&str>,
    limit: i64,
) -> Result<Vec<Court>, AppError> {
    let rows = sqlx::query_as::<_, Court>(
        r#"
        SELECT id, name, full_name, court_type, citation_string, url,
               in_use, created_at, updated_at
        FROM courts
        WHERE ($1::timestamptz IS NULL OR updated_at > $1)
          AND ($2::text IS NULL OR id > $2)
        ORDER BY id ASC
        LIMIT $3
        "#,
    )
    .bind(modified_after)
    .bind(after_id)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}
