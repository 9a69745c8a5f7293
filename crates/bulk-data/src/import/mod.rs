//! California judge import: judges matched or created by name, each
//! position normalized and inserted on its own.

pub mod counties;
pub mod file;
pub mod names;
pub mod positions;

use shared_types::{AppError, Judge, JudgeImportFile};
use tracing::{info, warn};

use crate::storage::JudgeStore;

pub use counties::CountyTable;
pub use file::{parse_import_file, read_import_file};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub judges_created: usize,
    pub judges_matched: usize,
    pub positions_created: usize,
}

/// Match an existing judge by full name (case-insensitive) or create one
/// from the parsed name parts. Returns the judge and whether it was created.
pub async fn find_or_create_judge<S: JudgeStore>(
    store: &S,
    full_name: &str,
) -> Result<(Judge, bool), AppError> {
    let parsed = names::parse_full_name(full_name)?;
    if let Some(judge) = store.find_judge_by_name(&parsed.full).await? {
        return Ok((judge, false));
    }
    let judge = store.create_judge(parsed.into()).await?;
    Ok((judge, true))
}

/// Import every judge in `file`.
///
/// There is no enclosing transaction. If a position fails to normalize or
/// insert, the run stops and everything inserted so far stays, including
/// that judge's earlier positions.
pub async fn import_ca_judges<S: JudgeStore>(
    store: &S,
    file: &JudgeImportFile,
    counties: &CountyTable,
) -> Result<ImportReport, AppError> {
    info!(count = ?file.count, judges = file.judges.len(), "Starting judge import");
    if file.count.value() != Some(file.judges.len() as u64) {
        warn!(
            count = ?file.count,
            judges = file.judges.len(),
            "Declared count does not match number of judges"
        );
    }

    let mut report = ImportReport::default();
    for entry in &file.judges {
        let (judge, created) = find_or_create_judge(store, &entry.full_name).await?;
        if created {
            report.judges_created += 1;
            info!(judge = %judge.name_full, id = %judge.id, "Created judge");
        } else {
            report.judges_matched += 1;
            info!(judge = %judge.name_full, id = %judge.id, "Matched existing judge");
        }

        for processed in positions::process_positions(&entry.positions, counties) {
            let position = positions::normalize_position(processed)?;
            if let Some(start) = position.date_start {
                info!(judge = %judge.name_full, date_start = %start, "Adding position");
            }
            store.create_position(judge.id, position).await?;
            report.positions_created += 1;
        }
    }

    info!(
        judges_created = report.judges_created,
        judges_matched = report.judges_matched,
        positions_created = report.positions_created,
        "Judge import finished"
    );
    Ok(report)
}
