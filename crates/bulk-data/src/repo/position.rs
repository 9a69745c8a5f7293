use shared_types::{AppError, NewPosition, Position};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert one position for a judge. Each call is its own implicit
/// transaction.
pub async fn create(
    pool: &Pool<Postgres>,
    judge_id: Uuid,
    pos: NewPosition,
) -> Result<Position, AppError> {
    let row = sqlx::query_as::<_, Position>(
        r#"
        INSERT INTO positions
            (judge_id, court_id, organization_name, position_type, job_title,
             how_selected, location_city, location_county,
             date_start, date_granularity_start,
             date_termination, date_granularity_termination, termination_reason)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING id, judge_id, court_id, organization_name, position_type,
                  job_title, how_selected, location_city, location_county,
                  date_start, date_granularity_start,
                  date_termination, date_granularity_termination,
                  termination_reason, created_at
        "#,
    )
    .bind(judge_id)
    .bind(pos.court_id.as_deref())
    .bind(pos.organization_name.as_deref())
    .bind(pos.position_type.as_deref())
    .bind(pos.job_title.as_deref())
    .bind(pos.how_selected.as_deref())
    .bind(pos.location_city.as_deref())
    .bind(pos.location_county.as_deref())
    .bind(pos.date_start)
    .bind(pos.date_granularity_start.map(|g| g.as_str()))
    .bind(pos.date_termination)
    .bind(pos.date_granularity_termination.map(|g| g.as_str()))
    .bind(pos.termination_reason.as_deref())
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}
