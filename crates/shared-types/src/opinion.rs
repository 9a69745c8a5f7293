use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resource_uri;

// ── JudicialOpinion DB struct ──────────────────────────────────────

/// A written judicial opinion. Exported under the "document" object type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct JudicialOpinion {
    pub id: Uuid,
    pub court_id: String,
    pub docket_id: Uuid,
    pub case_name: String,
    pub author_judge_name: Option<String>,
    /// OpinionType enum stored as text (e.g. "Majority", "Dissent").
    pub opinion_type: String,
    /// Precedential status stored as text (e.g. "Published", "Unpublished").
    pub precedential_status: String,
    pub citation_volume: Option<String>,
    pub citation_reporter: Option<String>,
    pub citation_page: Option<String>,
    pub plain_text: String,
    pub date_filed: Option<DateTime<Utc>>,
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JudicialOpinion {
    /// Reporter citation assembled as "<volume> <reporter> <page>" when all
    /// three parts are known.
    pub fn citation(&self) -> Option<String> {
        match (
            self.citation_volume.as_deref(),
            self.citation_reporter.as_deref(),
            self.citation_page.as_deref(),
        ) {
            (Some(v), Some(r), Some(p)) => Some(format!("{v} {r} {p}")),
            _ => None,
        }
    }
}

// ── JudicialOpinion API response ───────────────────────────────────

/// API response shape for an opinion document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpinionResponse {
    pub resource_uri: String,
    pub id: String,
    pub court: String,
    pub docket: String,
    pub case_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub opinion_type: String,
    pub precedential_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    pub plain_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_filed: Option<String>,
    pub blocked: bool,
    pub date_created: String,
    pub date_modified: String,
}

impl From<JudicialOpinion> for OpinionResponse {
    fn from(o: JudicialOpinion) -> Self {
        let citation = o.citation();
        let id = o.id.to_string();
        Self {
            resource_uri: resource_uri("document", &id),
            id,
            court: resource_uri("jurisdiction", &o.court_id),
            docket: resource_uri("docket", &o.docket_id.to_string()),
            case_name: o.case_name,
            author: o.author_judge_name,
            opinion_type: o.opinion_type,
            precedential_status: o.precedential_status,
            citation,
            plain_text: o.plain_text,
            date_filed: o.date_filed.map(|dt| dt.to_rfc3339()),
            blocked: o.blocked,
            date_created: o.created_at.to_rfc3339(),
            date_modified: o.updated_at.to_rfc3339(),
        }
    }
}
