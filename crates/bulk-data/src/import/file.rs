use std::path::Path;

use shared_types::{AppError, JudgeImportFile};

use crate::error_convert::{IoResultExt, ValidateRequest};

/// Parse a judge dump and validate every entry.
pub fn parse_import_file(json: &str) -> Result<JudgeImportFile, AppError> {
    let file: JudgeImportFile = serde_json::from_str(json)?;
    for (index, judge) in file.judges.iter().enumerate() {
        judge.validate_request().map_err(|mut e| {
            e.message = format!("judge #{index}: {}", e.message);
            e
        })?;
    }
    Ok(file)
}

pub fn read_import_file(path: &Path) -> Result<JudgeImportFile, AppError> {
    let contents = std::fs::read_to_string(path).at_path(path)?;
    parse_import_file(&contents)
}
