use chrono::{DateTime, Duration, Utc};
use shared_types::RunMode;

/// How one object type is exported during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Every record of the type.
    Full,
    /// Only records with `date_modified` strictly after `since`.
    Incremental { since: DateTime<Utc> },
}

impl ExportMode {
    pub fn modified_after(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Full => None,
            Self::Incremental { since } => Some(*since),
        }
    }

    pub fn is_incremental(&self) -> bool {
        matches!(self, Self::Incremental { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Incremental { .. } => "incremental",
        }
    }
}

/// Pick the export mode for one type.
///
/// `has_prior_files` must be observed before the run creates any staging
/// directories, otherwise `Auto` would always pick incremental.
pub fn resolve(
    run_mode: RunMode,
    has_prior_files: bool,
    now: DateTime<Utc>,
    window: Duration,
) -> ExportMode {
    let incremental = match run_mode {
        RunMode::Full => false,
        RunMode::Incremental => true,
        RunMode::Auto => has_prior_files,
    };

    if incremental {
        ExportMode::Incremental { since: now - window }
    } else {
        ExportMode::Full
    }
}
