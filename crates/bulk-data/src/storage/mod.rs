use std::io::Write;

use chrono::{DateTime, Utc};
use shared_types::{AppError, Court, ExportRecord, Judge, NewJudge, NewPosition, ObjectType, Position};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::repo;

// ── Traits ───────────────────────────────────────────────────────────

/// Read side used by the bulk exporter.
#[allow(async_fn_in_trait)]
pub trait ExportSource {
    /// Every court; each one is a jurisdiction with its own archive.
    async fn list_courts(&self) -> Result<Vec<Court>, AppError>;

    /// Up to `limit` records of one type, ordered by primary key and strictly
    /// after `after_pk`. When `modified_after` is set only records with
    /// `date_modified > modified_after` are returned.
    async fn fetch_batch(
        &self,
        object_type: ObjectType,
        modified_after: Option<DateTime<Utc>>,
        after_pk: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ExportRecord>, AppError>;

    /// Write the `document_id,citation_id` CSV (with header) into `out`.
    /// Returns the number of bytes written.
    async fn copy_citations<W: Write>(&self, out: &mut W) -> Result<u64, AppError>;
}

/// Write side used by the judge importer.
#[allow(async_fn_in_trait)]
pub trait JudgeStore {
    async fn find_judge_by_name(&self, full_name: &str) -> Result<Option<Judge>, AppError>;

    async fn create_judge(&self, judge: NewJudge) -> Result<Judge, AppError>;

    async fn create_position(
        &self,
        judge_id: Uuid,
        position: NewPosition,
    ) -> Result<Position, AppError>;
}

// ── Postgres implementation ─────────────────────────────────────────

/// Both seams backed by a Postgres pool.
#[derive(Clone)]
pub struct PgStorage {
    pool: Pool<Postgres>,
}

impl PgStorage {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

impl ExportSource for PgStorage {
    async fn list_courts(&self) -> Result<Vec<Court>, AppError> {
        repo::court::list_all(&self.pool).await
    }

    async fn fetch_batch(
        &self,
        object_type: ObjectType,
        modified_after: Option<DateTime<Utc>>,
        after_pk: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ExportRecord>, AppError> {
        let records = match object_type {
            ObjectType::Document => {
                let after = repo::uuid_cursor(after_pk)?;
                repo::opinion::list_batch(&self.pool, modified_after, after, limit)
                    .await?
                    .into_iter()
                    .map(ExportRecord::Document)
                    .collect()
            }
            ObjectType::Audio => {
                let after = repo::uuid_cursor(after_pk)?;
                repo::audio::list_batch(&self.pool, modified_after, after, limit)
                    .await?
                    .into_iter()
                    .map(ExportRecord::Audio)
                    .collect()
            }
            ObjectType::Docket => {
                let after = repo::uuid_cursor(after_pk)?;
                repo::docket::list_batch(&self.pool, modified_after, after, limit)
                    .await?
                    .into_iter()
                    .map(ExportRecord::Docket)
                    .collect()
            }
            ObjectType::Jurisdiction => {
                repo::court::list_batch(&self.pool, modified_after, after_pk, limit)
                    .await?
                    .into_iter()
                    .map(ExportRecord::Jurisdiction)
                    .collect()
            }
        };

        Ok(records)
    }

    async fn copy_citations<W: Write>(&self, out: &mut W) -> Result<u64, AppError> {
        repo::opinion_citation::copy_csv(&self.pool, out).await
    }
}

impl JudgeStore for PgStorage {
    async fn find_judge_by_name(&self, full_name: &str) -> Result<Option<Judge>, AppError> {
        repo::judge::find_by_name(&self.pool, full_name).await
    }

    async fn create_judge(&self, judge: NewJudge) -> Result<Judge, AppError> {
        repo::judge::create(&self.pool, judge).await
    }

    async fn create_position(
        &self,
        judge_id: Uuid,
        position: NewPosition,
    ) -> Result<Position, AppError> {
        repo::position::create(&self.pool, judge_id, position).await
    }
}
