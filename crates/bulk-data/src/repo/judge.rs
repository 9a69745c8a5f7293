use shared_types::{AppError, Judge, NewJudge};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// Find a judge by full name (case-insensitive, exact).
pub async fn find_by_name(
    pool: &Pool<Postgres>,
    full_name: &str,
) -> Result<Option<Judge>, AppError> {
    let row = sqlx::query_as::<_, Judge>(
        r#"
        SELECT id, name_full, name_first, name_middle, name_last,
               name_suffix, created_at, updated_at
        FROM judges
        WHERE LOWER(name_full) = LOWER($1)
        ORDER BY created_at ASC
        LIMIT 1
        "#,
    )
    .bind(full_name)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

/// Insert a new judge.
pub async fn create(pool: &Pool<Postgres>, judge: NewJudge) -> Result<Judge, AppError> {
    let row = sqlx::query_as::<_, Judge>(
        r#"
        INSERT INTO judges
            (name_full, name_first, name_middle, name_last, name_suffix)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name_full, name_first, name_middle, name_last,
                  name_suffix, created_at, updated_at
        "#,
    )
    .bind(&judge.name_full)
    .bind(&judge.name_first)
    .bind(judge.name_middle.as_deref())
    .bind(&judge.name_last)
    .bind(judge.name_suffix.as_deref())
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}
