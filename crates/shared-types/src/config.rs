use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ObjectType;

/// `[bulk]` section of `config.toml`. Every field is optional; unset fields
/// fall back to the exporter's defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BulkSettings {
    /// Root directory; staging lives at `<root>/tmp`.
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub incremental_window_days: Option<i64>,
    #[serde(default)]
    pub batch_size: Option<i64>,
    #[serde(default)]
    pub citation_dir: Option<String>,
    /// Gzip level (0-9) for per-jurisdiction archives, keyed by object type.
    #[serde(default)]
    pub compression_level_per_type: BTreeMap<ObjectType, u32>,
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub bulk: BulkSettings,
}
