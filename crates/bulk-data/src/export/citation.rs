use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use shared_types::AppError;

use crate::error_convert::IoResultExt;
use crate::storage::ExportSource;

/// Published name of the citation graph dump.
pub const CITATION_ARCHIVE: &str = "all.csv.gz";

/// Result of one citation dump.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationDump {
    pub path: PathBuf,
    /// Uncompressed CSV bytes written, header included.
    pub csv_bytes: u64,
}

/// Stream the `document_id,citation_id` table into
/// `<citation_dir>/all.csv.gz`.
///
/// The CSV is written under a temporary name and renamed into place once
/// the stream and the gzip trailer are complete, so a failed dump never
/// leaves a publishable file behind.
pub async fn make_citation_data<S: ExportSource>(
    source: &S,
    citation_dir: &Path,
) -> Result<CitationDump, AppError> {
    fs::create_dir_all(citation_dir).at_path(citation_dir)?;

    let path = citation_dir.join(CITATION_ARCHIVE);
    let partial = citation_dir.join(format!("{CITATION_ARCHIVE}.partial"));

    let file = File::create(&partial).at_path(&partial)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let csv_bytes = match source.copy_citations(&mut encoder).await {
        Ok(n) => n,
        Err(e) => {
            drop(encoder);
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
    };
    encoder
        .finish()
        .and_then(|mut writer| writer.flush())
        .at_path(&partial)?;

    fs::rename(&partial, &path).at_path(&path)?;
    Ok(CitationDump { path, csv_bytes })
}
