use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use shared_types::{AppError, Court, ObjectType};

use crate::error_convert::IoResultExt;

/// Scratch tree where records are serialized before archiving:
/// `<root>/<type>/<jurisdiction>/<pk>.json`.
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
}

impl StagingArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn type_dir(&self, object_type: ObjectType) -> PathBuf {
        self.root.join(object_type.as_str())
    }

    pub fn jurisdiction_dir(&self, object_type: ObjectType, court_id: &str) -> PathBuf {
        self.type_dir(object_type).join(court_id)
    }

    /// True when the type's staging directory exists and holds at least one
    /// entry of any kind.
    pub fn has_prior_files(&self, object_type: ObjectType) -> Result<bool, AppError> {
        let dir = self.type_dir(object_type);
        match fs::read_dir(&dir) {
            Ok(mut entries) => Ok(entries.next().is_some()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).at_path(&dir),
        }
    }

    /// Create the type directory and one directory per court.
    pub fn prepare(&self, object_type: ObjectType, courts: &[Court]) -> Result<(), AppError> {
        let type_dir = self.type_dir(object_type);
        fs::create_dir_all(&type_dir).at_path(&type_dir)?;

        for court in courts {
            let name = path_component(&court.id)?;
            let dir = type_dir.join(name);
            fs::create_dir_all(&dir).at_path(&dir)?;
        }
        Ok(())
    }

    /// Write one serialized record as `<pk>.json` under its jurisdiction.
    ///
    /// The jurisdiction directory must already exist; a record for a court
    /// that `prepare` never saw is an error.
    pub fn write_record(
        &self,
        object_type: ObjectType,
        jurisdiction: &str,
        pk: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, AppError> {
        let dir = self.jurisdiction_dir(object_type, path_component(jurisdiction)?);
        if !dir.is_dir() {
            return Err(AppError::io(format!(
                "{}: no staging directory for jurisdiction '{jurisdiction}'",
                dir.display()
            )));
        }

        let path = dir.join(format!("{}.json", path_component(pk)?));
        fs::write(&path, bytes).at_path(&path)?;
        Ok(path)
    }

    /// Every staged `*.json` file for one court, sorted by name. A missing
    /// directory yields an empty list.
    pub fn record_files(
        &self,
        object_type: ObjectType,
        court_id: &str,
    ) -> Result<Vec<PathBuf>, AppError> {
        let dir = self.jurisdiction_dir(object_type, path_component(court_id)?);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).at_path(&dir),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.at_path(&dir)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Reject names that would escape the staging tree.
fn path_component(name: &str) -> Result<&str, AppError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(AppError::bad_request(format!(
            "'{name}' cannot be used as a file name"
        )));
    }
    Ok(name)
}
