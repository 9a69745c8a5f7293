use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resource_uri;

/// An oral argument recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct AudioRecording {
    pub id: Uuid,
    pub court_id: String,
    pub docket_id: Uuid,
    pub case_name: String,
    /// Panel as free text (e.g. "Smith, Jones, Lee").
    pub judges: Option<String>,
    pub duration_secs: Option<i32>,
    pub sha1: String,
    pub download_url: Option<String>,
    pub local_path_mp3: Option<String>,
    pub date_argued: Option<DateTime<Utc>>,
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API response shape for an oral argument recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioResponse {
    pub resource_uri: String,
    pub id: String,
    pub court: String,
    pub docket: String,
    pub case_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judges: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    pub sha1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path_mp3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_argued: Option<String>,
    pub blocked: bool,
    pub date_created: String,
    pub date_modified: String,
}

impl From<AudioRecording> for AudioResponse {
    fn from(a: AudioRecording) -> Self {
        let id = a.id.to_string();
        Self {
            resource_uri: resource_uri("audio", &id),
            id,
            court: resource_uri("jurisdiction", &a.court_id),
            docket: resource_uri("docket", &a.docket_id.to_string()),
            case_name: a.case_name,
            judges: a.judges,
            duration: a.duration_secs,
            sha1: a.sha1,
            download_url: a.download_url,
            local_path_mp3: a.local_path_mp3,
            date_argued: a.date_argued.map(|dt| dt.to_rfc3339()),
            blocked: a.blocked,
            date_created: a.created_at.to_rfc3339(),
            date_modified: a.updated_at.to_rfc3339(),
        }
    }
}
