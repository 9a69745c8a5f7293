use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use shared_types::{AppError, Court, ObjectType};

use super::staging::StagingArea;
use crate::error_convert::IoResultExt;

/// Name of the archive that bundles every jurisdiction of one type.
pub const AGGREGATE_ARCHIVE: &str = "all.tar";

/// What archiving one object type produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchiveSummary {
    /// Per-jurisdiction `.tar.gz` files, in court order.
    pub archives: Vec<PathBuf>,
    /// Records across all jurisdiction archives.
    pub records: usize,
}

/// `<staging>/<type>/<court>.tar.gz`
pub fn jurisdiction_archive_path(
    staging: &StagingArea,
    object_type: ObjectType,
    court_id: &str,
) -> PathBuf {
    staging
        .type_dir(object_type)
        .join(format!("{court_id}.tar.gz"))
}

/// `<staging>/<type>/all.tar`
pub fn aggregate_archive_path(staging: &StagingArea, object_type: ObjectType) -> PathBuf {
    staging.type_dir(object_type).join(AGGREGATE_ARCHIVE)
}

/// Write one gzip-compressed tar per court. Members are the staged
/// `<pk>.json` files with no directory prefix. A court with nothing staged
/// still gets an (empty) archive.
pub fn archive_jurisdictions(
    staging: &StagingArea,
    object_type: ObjectType,
    courts: &[Court],
    level: u32,
) -> Result<ArchiveSummary, AppError> {
    let mut summary = ArchiveSummary::default();

    for court in courts {
        let files = staging.record_files(object_type, &court.id)?;
        let path = jurisdiction_archive_path(staging, object_type, &court.id);
        write_gzip_tar(&path, &files, level)?;

        tracing::debug!(
            object_type = %object_type,
            court = %court.id,
            records = files.len(),
            "Wrote jurisdiction archive"
        );
        summary.records += files.len();
        summary.archives.push(path);
    }

    Ok(summary)
}

/// Write the uncompressed `all.tar` holding every court's `.tar.gz`.
pub fn build_aggregate(
    staging: &StagingArea,
    object_type: ObjectType,
    courts: &[Court],
) -> Result<PathBuf, AppError> {
    let members: Vec<PathBuf> = courts
        .iter()
        .map(|court| jurisdiction_archive_path(staging, object_type, &court.id))
        .collect();

    let path = aggregate_archive_path(staging, object_type);
    let file = File::create(&path).at_path(&path)?;
    let mut builder = tar::Builder::new(BufWriter::new(file));
    append_members(&mut builder, &members)?;
    builder
        .into_inner()
        .and_then(|mut writer| writer.flush())
        .at_path(&path)?;

    Ok(path)
}

fn write_gzip_tar(path: &Path, members: &[PathBuf], level: u32) -> Result<(), AppError> {
    let file = File::create(path).at_path(path)?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::new(level));
    let mut builder = tar::Builder::new(encoder);
    append_members(&mut builder, members)?;
    builder
        .into_inner()
        .and_then(|encoder| encoder.finish())
        .and_then(|mut writer| writer.flush())
        .at_path(path)
}

fn append_members<W: Write>(
    builder: &mut tar::Builder<W>,
    members: &[PathBuf],
) -> Result<(), AppError> {
    for member in members {
        let name = member
            .file_name()
            .ok_or_else(|| AppError::internal(format!("{} has no file name", member.display())))?;
        builder
            .append_path_with_name(member, name)
            .at_path(member)?;
    }
    Ok(())
}
