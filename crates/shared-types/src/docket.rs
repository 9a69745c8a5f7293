use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resource_uri;

// ── DB row struct ───────────────────────────────────────────────────

/// A case docket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Docket {
    pub id: Uuid,
    pub court_id: String,
    pub docket_number: String,
    pub case_name: String,
    pub date_filed: Option<DateTime<Utc>>,
    pub date_terminated: Option<DateTime<Utc>>,
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── API response types ──────────────────────────────────────────────

/// API response shape for a docket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocketResponse {
    pub resource_uri: String,
    pub id: String,
    pub court: String,
    pub docket_number: String,
    pub case_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_filed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_terminated: Option<String>,
    pub blocked: bool,
    pub date_created: String,
    pub date_modified: String,
}

impl From<Docket> for DocketResponse {
    fn from(d: Docket) -> Self {
        let id = d.id.to_string();
        Self {
            resource_uri: resource_uri("docket", &id),
            id,
            court: resource_uri("jurisdiction", &d.court_id),
            docket_number: d.docket_number,
            case_name: d.case_name,
            date_filed: d.date_filed.map(|dt| dt.to_rfc3339()),
            date_terminated: d.date_terminated.map(|dt| dt.to_rfc3339()),
            blocked: d.blocked,
            date_created: d.created_at.to_rfc3339(),
            date_modified: d.updated_at.to_rfc3339(),
        }
    }
}
