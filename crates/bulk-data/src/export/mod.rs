//! Bulk export: stage every record as JSON, archive per jurisdiction,
//! bundle into `all.tar`, then swap the archives into the public tree.

pub mod archiver;
pub mod citation;
pub mod mode;
pub mod publisher;
pub mod serializer;
pub mod staging;

use std::time::{Duration, Instant};

use chrono::Utc;
use shared_types::{AppError, Court, ObjectType, RunMode};
use tracing::info;

use crate::config::BulkConfig;
use crate::storage::ExportSource;

pub use mode::ExportMode;
pub use staging::StagingArea;

/// Outcome for one object type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeReport {
    pub object_type: ObjectType,
    pub mode: ExportMode,
    /// JSON files written this run (not the archive total in incremental mode).
    pub records_written: usize,
    /// Records across the published jurisdiction archives.
    pub records_archived: usize,
    pub published: Vec<String>,
}

/// Outcome of the citation dump.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationReport {
    pub csv_bytes: u64,
    pub published: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub jurisdictions: usize,
    pub types: Vec<TypeReport>,
    pub citations: Option<CitationReport>,
    pub elapsed: Duration,
}

/// Drives one export run across every object type.
pub struct BulkExporter<'a, S> {
    source: &'a S,
    config: &'a BulkConfig,
    run_mode: RunMode,
    include_citations: bool,
    staging: StagingArea,
}

impl<'a, S: ExportSource> BulkExporter<'a, S> {
    pub fn new(source: &'a S, config: &'a BulkConfig, run_mode: RunMode) -> Self {
        Self {
            source,
            config,
            run_mode,
            include_citations: true,
            staging: StagingArea::new(config.staging_root.clone()),
        }
    }

    pub fn with_citations(mut self, include: bool) -> Self {
        self.include_citations = include;
        self
    }

    /// Run the whole export. The first error aborts the run; whatever was
    /// already published stays published.
    pub async fn run(&self) -> Result<RunReport, AppError> {
        let started = Instant::now();
        info!(mode = %self.run_mode, "Starting bulk file creation");

        let courts = self.source.list_courts().await?;
        info!(count = courts.len(), "Loaded jurisdictions");

        let mut types = Vec::with_capacity(ObjectType::EXPORT_ORDER.len());
        for object_type in ObjectType::EXPORT_ORDER {
            types.push(self.export_type(object_type, &courts).await?);
        }

        let citations = if self.include_citations {
            Some(self.export_citations().await?)
        } else {
            info!("Skipping citation dump");
            None
        };

        let elapsed = started.elapsed();
        info!(elapsed_secs = elapsed.as_secs_f64(), "Done");

        Ok(RunReport {
            jurisdictions: courts.len(),
            types,
            citations,
            elapsed,
        })
    }

    /// Stage, archive, aggregate, and publish one object type.
    pub async fn export_type(
        &self,
        object_type: ObjectType,
        courts: &[Court],
    ) -> Result<TypeReport, AppError> {
        info!(
            object_type = %object_type,
            jurisdictions = courts.len(),
            "Creating bulk {object_type} files"
        );

        let (mode, records_written) = self.write_json_to_disk(object_type, courts).await?;

        info!(object_type = %object_type, "Tarring and compressing");
        let level = self.config.compression_level(object_type);
        let summary =
            archiver::archive_jurisdictions(&self.staging, object_type, courts, level)?;

        info!(object_type = %object_type, "Building {}", archiver::AGGREGATE_ARCHIVE);
        archiver::build_aggregate(&self.staging, object_type, courts)?;

        let dest = self.config.published_dir(object_type.as_str());
        info!(object_type = %object_type, dest = %dest.display(), "Swapping in new files");
        let published =
            publisher::swap_archives(&self.staging.type_dir(object_type), &dest)?;

        Ok(TypeReport {
            object_type,
            mode,
            records_written,
            records_archived: summary.records,
            published,
        })
    }

    async fn write_json_to_disk(
        &self,
        object_type: ObjectType,
        courts: &[Court],
    ) -> Result<(ExportMode, usize), AppError> {
        // Must be checked before prepare() creates the jurisdiction dirs.
        let has_prior = self.staging.has_prior_files(object_type)?;
        let mode = mode::resolve(
            self.run_mode,
            has_prior,
            Utc::now(),
            self.config.incremental_window(),
        );
        self.staging.prepare(object_type, courts)?;

        if let ExportMode::Incremental { since } = mode {
            info!(object_type = %object_type, since = %since, "Using incremental mode");
        }

        let serializer = serializer::for_type(object_type);
        let batch_size = self.config.batch_size;
        let mut cursor: Option<String> = None;
        let mut written = 0usize;

        loop {
            let batch = self
                .source
                .fetch_batch(object_type, mode.modified_after(), cursor.as_deref(), batch_size)
                .await?;
            let Some(last) = batch.last() else {
                break;
            };
            cursor = Some(last.pk());
            let exhausted = (batch.len() as i64) < batch_size;

            for record in &batch {
                let bytes = serializer.serialize(record)?;
                self.staging
                    .write_record(object_type, record.jurisdiction(), &record.pk(), &bytes)?;
                written += 1;
            }

            tracing::debug!(object_type = %object_type, written, "Staged batch");
            if exhausted {
                break;
            }
        }

        info!(object_type = %object_type, count = written, "All {object_type} json files created");
        Ok((mode, written))
    }

    async fn export_citations(&self) -> Result<CitationReport, AppError> {
        let dir = &self.config.citation_dir;
        info!(dir = %dir.display(), "Dumping citation table");
        let dump = citation::make_citation_data(self.source, dir).await?;

        let dest = self.config.published_dir("citation");
        info!(dest = %dest.display(), "Swapping in citation dump");
        let published = publisher::swap_archives(dir, &dest)?;

        Ok(CitationReport {
            csv_bytes: dump.csv_bytes,
            published,
        })
    }
}
