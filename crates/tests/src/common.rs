use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::{LazyLock, Mutex};

use bulk_data::config::BulkConfig;
use bulk_data::storage::{ExportSource, JudgeStore};
use chrono::{DateTime, Duration, TimeZone, Utc};
use shared_types::{
    AppError, AudioRecording, Court, Docket, ExportRecord, Judge, JudicialOpinion,
    NewJudge, NewPosition, ObjectType, Position,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

// ── In-memory storage ───────────────────────────────────────────────

/// One `opinion_citations` row. An unresolved citation has no target.
#[derive(Debug, Clone)]
pub struct CitationEdge {
    pub document_id: Uuid,
    pub citation_id: Option<Uuid>,
}

/// Stands in for Postgres in both pipelines.
#[derive(Default)]
pub struct MemoryStorage {
    pub courts: Vec<Court>,
    pub records: Vec<ExportRecord>,
    pub citations: Vec<CitationEdge>,
    pub fail_citations: bool,
    /// Zero-based index of the `create_position` call that fails.
    pub fail_position_at: Option<usize>,
    pub judges: Mutex<Vec<Judge>>,
    pub positions: Mutex<Vec<Position>>,
    pub position_calls: Mutex<usize>,
    pub fetch_calls: Mutex<usize>,
}

impl MemoryStorage {
    pub fn with_courts(ids: &[&str]) -> Self {
        Self {
            courts: ids.iter().map(|id| court(id, days_ago(400))).collect(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, record: ExportRecord) {
        self.records.push(record);
    }

    pub fn judges(&self) -> Vec<Judge> {
        self.judges.lock().unwrap().clone()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.positions.lock().unwrap().clone()
    }

    pub fn seed_judge(&self, name: &str) -> Judge {
        let now = Utc::now();
        let judge = Judge {
            id: Uuid::new_v4(),
            name_full: name.to_string(),
            name_first: String::new(),
            name_middle: None,
            name_last: name.to_string(),
            name_suffix: None,
            created_at: now,
            updated_at: now,
        };
        self.judges.lock().unwrap().push(judge.clone());
        judge
    }

    pub fn fetch_calls(&self) -> usize {
        *self.fetch_calls.lock().unwrap()
    }
}

impl ExportSource for MemoryStorage {
    async fn list_courts(&self) -> Result<Vec<Court>, AppError> {
        Ok(self.courts.clone())
    }

    async fn fetch_batch(
        &self,
        object_type: ObjectType,
        modified_after: Option<DateTime<Utc>>,
        after_pk: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ExportRecord>, AppError> {
        *self.fetch_calls.lock().unwrap() += 1;

        // Courts are exported as the jurisdiction type.
        let jurisdictions: Vec<ExportRecord> = self
            .courts
            .iter()
            .cloned()
            .map(ExportRecord::Jurisdiction)
            .collect();

        let mut matching: Vec<ExportRecord> = self
            .records
            .iter()
            .chain(jurisdictions.iter())
            .filter(|r| r.object_type() == object_type)
            .filter(|r| modified_after.is_none_or(|cutoff| updated_at(r) > cutoff))
            .filter(|r| after_pk.is_none_or(|after| r.pk().as_str() > after))
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.pk());
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn copy_citations<W: Write>(&self, out: &mut W) -> Result<u64, AppError> {
        if self.fail_citations {
            return Err(AppError::database("COPY failed: relation does not exist"));
        }
        let mut csv = String::from("document_id,citation_id\n");
        for edge in &self.citations {
            let target = edge.citation_id.map(|id| id.to_string()).unwrap_or_default();
            csv.push_str(&format!("{},{}\n", edge.document_id, target));
        }
        out.write_all(csv.as_bytes())
            .map_err(|e| AppError::io(e.to_string()))?;
        Ok(csv.len() as u64)
    }
}

impl JudgeStore for MemoryStorage {
    async fn find_judge_by_name(&self, full_name: &str) -> Result<Option<Judge>, AppError> {
        let wanted = full_name.to_lowercase();
        Ok(self
            .judges
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.name_full.to_lowercase() == wanted)
            .cloned())
    }

    async fn create_judge(&self, judge: NewJudge) -> Result<Judge, AppError> {
        let now = Utc::now();
        let judge = Judge {
            id: Uuid::new_v4(),
            name_full: judge.name_full,
            name_first: judge.name_first,
            name_middle: judge.name_middle,
            name_last: judge.name_last,
            name_suffix: judge.name_suffix,
            created_at: now,
            updated_at: now,
        };
        self.judges.lock().unwrap().push(judge.clone());
        Ok(judge)
    }

    async fn create_position(
        &self,
        judge_id: Uuid,
        position: NewPosition,
    ) -> Result<Position, AppError> {
        let call = {
            let mut calls = self.position_calls.lock().unwrap();
            let call = *calls;
            *calls += 1;
            call
        };
        if self.fail_position_at == Some(call) {
            return Err(AppError::database("insert into positions failed"));
        }

        let position = Position {
            id: Uuid::new_v4(),
            judge_id,
            court_id: position.court_id,
            organization_name: position.organization_name,
            position_type: position.position_type,
            job_title: position.job_title,
            how_selected: position.how_selected,
            location_city: position.location_city,
            location_county: position.location_county,
            date_start: position.date_start,
            date_granularity_start: position.date_granularity_start.map(|g| g.as_str().to_string()),
            date_termination: position.date_termination,
            date_granularity_termination: position
                .date_granularity_termination
                .map(|g| g.as_str().to_string()),
            termination_reason: position.termination_reason,
            created_at: Utc::now(),
        };
        self.positions.lock().unwrap().push(position.clone());
        Ok(position)
    }
}

fn updated_at(record: &ExportRecord) -> DateTime<Utc> {
    match record {
        ExportRecord::Document(o) => o.updated_at,
        ExportRecord::Audio(a) => a.updated_at,
        ExportRecord::Docket(d) => d.updated_at,
        ExportRecord::Jurisdiction(c) => c.updated_at,
    }
}

// ── Postgres ────────────────────────────────────────────────────────

/// Serializes the tests that truncate and seed the shared test database.
static TEST_MUTEX: LazyLock<tokio::sync::Mutex<()>> =
    LazyLock::new(|| tokio::sync::Mutex::new(()));

/// Connect to `TEST_DATABASE_URL`, migrate, and empty every table.
/// Returns `None` when no test database is configured.
/// The guard must be held for the duration of the test.
pub async fn test_db() -> Option<(Pool<Postgres>, tokio::sync::MutexGuard<'static, ()>)> {
    let _ = dotenvy::dotenv();
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping Postgres test");
        return None;
    };

    let guard = TEST_MUTEX.lock().await;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    bulk_data::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query(
        "TRUNCATE opinion_citations, judicial_opinions, audio_recordings, dockets, courts, positions, judges CASCADE",
    )
    .execute(&pool)
    .await
    .expect("Failed to truncate");

    Some((pool, guard))
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
}

pub fn court(id: &str, updated_at: DateTime<Utc>) -> Court {
    Court {
        id: id.to_string(),
        name: id.to_uppercase(),
        full_name: format!("Court of {id}"),
        court_type: "federal".to_string(),
        citation_string: None,
        url: None,
        in_use: true,
        created_at: updated_at,
        updated_at,
    }
}

pub fn opinion(court_id: &str, updated_at: DateTime<Utc>) -> ExportRecord {
    ExportRecord::Document(JudicialOpinion {
        id: Uuid::new_v4(),
        court_id: court_id.to_string(),
        docket_id: Uuid::new_v4(),
        case_name: "Doe v. Roe".to_string(),
        author_judge_name: Some("Jane Roe".to_string()),
        opinion_type: "lead".to_string(),
        precedential_status: "Published".to_string(),
        citation_volume: Some("123".to_string()),
        citation_reporter: Some("F.3d".to_string()),
        citation_page: Some("456".to_string()),
        plain_text: "It is so ordered.".to_string(),
        date_filed: Some(updated_at),
        blocked: false,
        created_at: updated_at,
        updated_at,
    })
}

pub fn audio(court_id: &str, updated_at: DateTime<Utc>) -> ExportRecord {
    ExportRecord::Audio(AudioRecording {
        id: Uuid::new_v4(),
        court_id: court_id.to_string(),
        docket_id: Uuid::new_v4(),
        case_name: "United States v. Smith".to_string(),
        judges: Some("Smith, Jones, Lee".to_string()),
        duration_secs: Some(1800),
        sha1: "da39a3ee5e6b4b0d3255bfef95601890afd80709".to_string(),
        download_url: None,
        local_path_mp3: Some("mp3/2024/01/15/smith.mp3".to_string()),
        date_argued: Some(updated_at),
        blocked: false,
        created_at: updated_at,
        updated_at,
    })
}

pub fn docket(court_id: &str, updated_at: DateTime<Utc>) -> ExportRecord {
    ExportRecord::Docket(Docket {
        id: Uuid::new_v4(),
        court_id: court_id.to_string(),
        docket_number: "24-0001".to_string(),
        case_name: "In re Example".to_string(),
        date_filed: Some(updated_at),
        date_terminated: None,
        blocked: false,
        created_at: updated_at,
        updated_at,
    })
}

/// Config rooted in a scratch directory, citations included.
pub fn test_config(root: &Path) -> BulkConfig {
    let mut config = BulkConfig::from_root(root.join("bulk"));
    config.citation_dir = root.join("citation");
    config.batch_size = 2;
    config
}

// ── Archive readers ─────────────────────────────────────────────────

/// Member names of a plain tar, sorted.
pub fn tar_members(path: &Path) -> Vec<String> {
    let mut archive = tar::Archive::new(File::open(path).unwrap());
    let mut names: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Member names and bodies of a gzip-compressed tar, sorted by name.
pub fn gz_tar_members(path: &Path) -> Vec<(String, Vec<u8>)> {
    let file = File::open(path).unwrap();
    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(file));
    let mut members = Vec::new();
    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        let name = entry.path().unwrap().to_string_lossy().into_owned();
        let mut body = Vec::new();
        entry.read_to_end(&mut body).unwrap();
        members.push((name, body));
    }
    members.sort_by(|a, b| a.0.cmp(&b.0));
    members
}

pub fn gunzip_to_string(path: &Path) -> String {
    let mut out = String::new();
    flate2::read::GzDecoder::new(File::open(path).unwrap())
        .read_to_string(&mut out)
        .unwrap();
    out
}
