use std::io::Write;

use futures::TryStreamExt;
use shared_types::AppError;
use sqlx::postgres::PgPoolCopyExt;
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// Server-side COPY of the citation graph as a headered two-column CSV.
/// Unresolved citations keep their row with an empty `citation_id`.
pub const CITATION_COPY_SQL: &str = r#"
    COPY (
        SELECT opinion_id AS document_id, cited_opinion_id AS citation_id
        FROM opinion_citations
    ) TO STDOUT WITH (FORMAT csv, HEADER true, DELIMITER ',')
"#;

/// Stream the citation table straight out of Postgres into `out`.
/// Returns the number of CSV bytes written.
pub async fn copy_csv<W: Write>(pool: &Pool<Postgres>, out: &mut W) -> Result<u64, AppError> {
    let mut stream = pool
        .copy_out_raw(CITATION_COPY_SQL)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    let mut written = 0u64;
    while let Some(chunk) = stream.try_next().await.map_err(SqlxErrorExt::into_app_error)? {
        out.write_all(&chunk)
            .map_err(|e| AppError::io(format!("writing citation CSV: {e}")))?;
        written += chunk.len() as u64;
    }

    Ok(written)
}
