use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Path prefix of the public REST API whose shapes the bulk files mirror.
pub const API_ROOT: &str = "/api/rest/v3";

/// Build the API resource URI for a record.
pub fn resource_uri(resource: &str, id: &str) -> String {
    format!("{API_ROOT}/{resource}/{id}/")
}

// ── Court DB struct ─────────────────────────────────────────────────

/// A court. Its id doubles as the jurisdiction key for bulk archives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Court {
    pub id: String,
    pub name: String,
    pub full_name: String,
    /// Court type stored as text (e.g. "federal_appellate", "state_trial").
    pub court_type: String,
    pub citation_string: Option<String>,
    pub url: Option<String>,
    pub in_use: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Court API response ──────────────────────────────────────────────

/// API response shape for a jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtResponse {
    pub resource_uri: String,
    pub id: String,
    pub short_name: String,
    pub full_name: String,
    pub jurisdiction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub in_use: bool,
    pub date_modified: String,
}

impl From<Court> for CourtResponse {
    fn from(c: Court) -> Self {
        Self {
            resource_uri: resource_uri("jurisdiction", &c.id),
            id: c.id,
            short_name: c.name,
            full_name: c.full_name,
            jurisdiction: c.court_type,
            citation_string: c.citation_string,
            url: c.url,
            in_use: c.in_use,
            date_modified: c.updated_at.to_rfc3339(),
        }
    }
}
