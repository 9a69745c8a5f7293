use chrono::{DateTime, Utc};
use shared_types::{AppError, Docket};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Page through dockets by id, optionally only those modified after a cutoff.
pub async fn list_batch(
    pool: &Pool<Postgres>,
    modified_after: Option<DateTime<Utc>>,
    after_id: Option<Uuid>,
    limit: i64,
) -> Result<Vec<Docket>, AppError> {
    let rows = sqlx::query_as::<_, Docket>(
        r#"
        SELECT id, court_id, docket_number, case_name, date_filed,
               date_terminated, blocked, created_at, updated_at
        FROM dockets
        WHERE ($1::timestamptz IS NULL OR updated_at > $1)
          AND ($2::uuid IS NULL OR id > $2)
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
