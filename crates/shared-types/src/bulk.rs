use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{AppError, AudioRecording, Court, Docket, JudicialOpinion};

// ── Object types ────────────────────────────────────────────────────

/// A kind of record published as bulk data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Document,
    Audio,
    Docket,
    Jurisdiction,
}

impl ObjectType {
    /// Order in which the exporter walks the object types.
    pub const EXPORT_ORDER: [ObjectType; 4] = [
        ObjectType::Document,
        ObjectType::Audio,
        ObjectType::Docket,
        ObjectType::Jurisdiction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Audio => "audio",
            Self::Docket => "docket",
            Self::Jurisdiction => "jurisdiction",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "document" => Some(Self::Document),
            "audio" => Some(Self::Audio),
            "docket" => Some(Self::Docket),
            "jurisdiction" => Some(Self::Jurisdiction),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_opt(s).ok_or_else(|| AppError::bad_request(format!("unknown object type '{s}'")))
    }
}

// ── Run mode ────────────────────────────────────────────────────────

/// Operator's choice of export mode.
///
/// `Auto` infers the mode from the staging directory: any existing entry
/// means a previous run happened and only recent changes are exported.
/// A partially cleaned staging directory will therefore pick incremental
/// mode; pass `Full` to force a complete export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Auto,
    Full,
    Incremental,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Full => "full",
            Self::Incremental => "incremental",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "full" => Some(Self::Full),
            "incremental" => Some(Self::Incremental),
            _ => None,
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_opt(s).ok_or_else(|| {
            AppError::bad_request(format!(
                "unknown run mode '{s}' (expected auto, full, or incremental)"
            ))
        })
    }
}

// ── Export records ──────────────────────────────────────────────────

/// One database row selected for export.
#[derive(Debug, Clone)]
pub enum ExportRecord {
    Document(JudicialOpinion),
    Audio(AudioRecording),
    Docket(Docket),
    Jurisdiction(Court),
}

impl ExportRecord {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Document(_) => ObjectType::Document,
            Self::Audio(_) => ObjectType::Audio,
            Self::Docket(_) => ObjectType::Docket,
            Self::Jurisdiction(_) => ObjectType::Jurisdiction,
        }
    }

    /// Primary key, used as the staged file name and the pagination cursor.
    pub fn pk(&self) -> String {
        match self {
            Self::Document(o) => o.id.to_string(),
            Self::Audio(a) => a.id.to_string(),
            Self::Docket(d) => d.id.to_string(),
            Self::Jurisdiction(c) => c.id.clone(),
        }
    }

    /// Jurisdiction the record is partitioned under. A court is its own
    /// jurisdiction.
    pub fn jurisdiction(&self) -> &str {
        match self {
            Self::Document(o) => &o.court_id,
            Self::Audio(a) => &a.court_id,
            Self::Docket(d) => &d.court_id,
            Self::Jurisdiction(c) => &c.id,
        }
    }
}
