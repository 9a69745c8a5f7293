use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

// ── Date granularity ────────────────────────────────────────────────

/// Precision of a stored date, persisted as its strftime pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateGranularity {
    #[serde(rename = "%Y")]
    Year,
    #[serde(rename = "%Y-%m")]
    Month,
    #[serde(rename = "%Y-%m-%d")]
    Day,
}

impl DateGranularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::Month => "%Y-%m",
            Self::Day => "%Y-%m-%d",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "%Y" => Some(Self::Year),
            "%Y-%m" => Some(Self::Month),
            "%Y-%m-%d" => Some(Self::Day),
            _ => None,
        }
    }
}

/// Shorthand for the granularity every imported position date carries.
pub const GRANULARITY_DAY: &str = "%Y-%m-%d";

// ── Judge DB struct ─────────────────────────────────────────────────

/// A person who has held one or more judicial positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Judge {
    pub id: Uuid,
    pub name_full: String,
    pub name_first: String,
    pub name_middle: Option<String>,
    pub name_last: String,
    pub name_suffix: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJudge {
    pub name_full: String,
    pub name_first: String,
    pub name_middle: Option<String>,
    pub name_last: String,
    pub name_suffix: Option<String>,
}

// ── Position DB struct ──────────────────────────────────────────────

/// One career position held by a judge.
///
/// `court_id` and `organization_name` are never both set, nor are
/// `position_type` and `job_title`. Termination reason and termination
/// granularity are only set alongside a termination date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Position {
    pub id: Uuid,
    pub judge_id: Uuid,
    pub court_id: Option<String>,
    pub organization_name: Option<String>,
    pub position_type: Option<String>,
    pub job_title: Option<String>,
    pub how_selected: Option<String>,
    pub location_city: Option<String>,
    pub location_county: Option<String>,
    pub date_start: Option<NaiveDate>,
    pub date_granularity_start: Option<String>,
    pub date_termination: Option<NaiveDate>,
    pub date_granularity_termination: Option<String>,
    pub termination_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A normalized position ready to insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPosition {
    pub court_id: Option<String>,
    pub organization_name: Option<String>,
    pub position_type: Option<String>,
    pub job_title: Option<String>,
    pub how_selected: Option<String>,
    pub location_city: Option<String>,
    pub location_county: Option<String>,
    pub date_start: Option<NaiveDate>,
    pub date_granularity_start: Option<DateGranularity>,
    pub date_termination: Option<NaiveDate>,
    pub date_granularity_termination: Option<DateGranularity>,
    pub termination_reason: Option<String>,
}

// ── Import file shapes ──────────────────────────────────────────────

/// Judge count as written by the upstream dump: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportCount {
    Number(u64),
    Text(String),
}

impl ImportCount {
    pub fn value(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Top-level shape of a judge dump: `{ count, judges: [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeImportFile {
    pub count: ImportCount,
    pub judges: Vec<JudgeEntry>,
}

/// One judge in a dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct JudgeEntry {
    #[serde(rename = "fullName")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Judge full name is required"))
    )]
    pub full_name: String,
    #[serde(default)]
    pub positions: Vec<RawPosition>,
}

/// A position exactly as it appears in a dump, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub position_type: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub how_selected: Option<String>,
    #[serde(default)]
    pub location_city: Option<String>,
    #[serde(default)]
    pub location_county: Option<String>,
    #[serde(default)]
    pub date_start: Option<String>,
    #[serde(default)]
    pub date_termination: Option<String>,
    #[serde(default)]
    pub termination_reason: Option<String>,
    #[serde(default)]
    pub pending_status: Option<String>,
    #[serde(default)]
    pub inactive_status: Option<String>,
}
