use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use shared_types::{AppConfig, AppError, BulkSettings, ObjectType};

/// Path to the config file, relative to the working directory.
pub const CONFIG_PATH: &str = "config.toml";

pub const DEFAULT_BULK_DATA_DIR: &str = "/srv/bulk-data";
pub const DEFAULT_INCREMENTAL_WINDOW_DAYS: i64 = 32;
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;
pub const DEFAULT_BATCH_SIZE: i64 = 1000;
pub const DEFAULT_CITATION_DIR: &str = "/tmp/bulk/citation";

/// Resolved settings for one export run.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkConfig {
    /// Scratch tree: `<staging_root>/<type>/<jurisdiction>/<pk>.json`.
    pub staging_root: PathBuf,
    /// Public tree: `<published_root>/<type>/*.tar*`.
    pub published_root: PathBuf,
    pub incremental_window_days: i64,
    pub compression_level_per_type: BTreeMap<ObjectType, u32>,
    pub citation_dir: PathBuf,
    /// Rows fetched per database round trip.
    pub batch_size: i64,
}

impl BulkConfig {
    /// Defaults laid out under a single bulk data root.
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            staging_root: root.join("tmp"),
            published_root: root.to_path_buf(),
            incremental_window_days: DEFAULT_INCREMENTAL_WINDOW_DAYS,
            compression_level_per_type: ObjectType::EXPORT_ORDER
                .iter()
                .map(|t| (*t, DEFAULT_COMPRESSION_LEVEL))
                .collect(),
            citation_dir: PathBuf::from(DEFAULT_CITATION_DIR),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Merge `[bulk]` settings over the defaults. `root_override` (normally
    /// `BULK_DATA_DIR`) wins over the file's `root`.
    pub fn from_settings(
        settings: &BulkSettings,
        root_override: Option<String>,
    ) -> Result<Self, AppError> {
        let root = root_override
            .or_else(|| settings.root.clone())
            .unwrap_or_else(|| DEFAULT_BULK_DATA_DIR.to_string());

        let mut config = Self::from_root(root);
        if let Some(days) = settings.incremental_window_days {
            config.incremental_window_days = days;
        }
        if let Some(size) = settings.batch_size {
            config.batch_size = size;
        }
        if let Some(dir) = &settings.citation_dir {
            config.citation_dir = PathBuf::from(dir);
        }
        for (object_type, level) in &settings.compression_level_per_type {
            config.compression_level_per_type.insert(*object_type, *level);
        }

        config.validate()?;
        Ok(config)
    }

    /// Read `config.toml` (if present) and the environment.
    ///
    /// A missing file falls back to defaults. A file that exists but does not
    /// parse is an error: exporting into a default root by accident would
    /// publish to the wrong place.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let settings = match std::fs::read_to_string(path) {
            Ok(contents) => {
                let config: AppConfig = toml::from_str(&contents).map_err(|e| {
                    AppError::config(format!("Failed to parse {}: {e}", path.display()))
                })?;
                config.bulk
            }
            Err(e) => {
                tracing::info!(
                    path = %path.display(),
                    error = %e,
                    "Config file not found, using defaults"
                );
                BulkSettings::default()
            }
        };

        let root_override = std::env::var("BULK_DATA_DIR").ok().filter(|v| !v.is_empty());
        Self::from_settings(&settings, root_override)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.incremental_window_days <= 0 {
            return Err(AppError::config("incremental_window_days must be positive"));
        }
        if self.batch_size <= 0 {
            return Err(AppError::config("batch_size must be positive"));
        }
        for (object_type, level) in &self.compression_level_per_type {
            if *level > 9 {
                return Err(AppError::config(format!(
                    "compression level for {object_type} must be 0-9, got {level}"
                )));
            }
        }
        Ok(())
    }

    pub fn compression_level(&self, object_type: ObjectType) -> u32 {
        self.compression_level_per_type
            .get(&object_type)
            .copied()
            .unwrap_or(DEFAULT_COMPRESSION_LEVEL)
    }

    pub fn incremental_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.incremental_window_days)
    }

    /// `<staging_root>/<type>`
    pub fn staging_dir(&self, name: &str) -> PathBuf {
        self.staging_root.join(name)
    }

    /// `<published_root>/<type>`
    pub fn published_dir(&self, name: &str) -> PathBuf {
        self.published_root.join(name)
    }
}
