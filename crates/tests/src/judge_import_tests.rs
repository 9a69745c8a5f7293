use bulk_data::import::{self, find_or_create_judge, parse_import_file, CountyTable, ImportReport};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, GRANULARITY_DAY};

use crate::common::*;

fn counties() -> CountyTable {
    CountyTable::bundled().unwrap()
}

// ── End to end ──────────────────────────────────────────────────────

#[tokio::test]
async fn jane_roe_gets_one_judge_and_one_position() {
    let storage = MemoryStorage::default();
    let file = parse_import_file(
        r#"{
            "count": 1,
            "judges": [{
                "fullName": "Jane Roe",
                "positions": [{
                    "court": "CA-Super",
                    "date_start": "2001-05-01",
                    "date_termination": null,
                    "termination_reason": "ret",
                    "pending_status": "pending",
                    "inactive_status": "active"
                }]
            }]
        }"#,
    )
    .unwrap();

    let report = import::import_ca_judges(&storage, &file, &counties())
        .await
        .unwrap();
    assert_eq!(
        report,
        ImportReport {
            judges_created: 1,
            judges_matched: 0,
            positions_created: 1,
        }
    );

    let judges = storage.judges();
    assert_eq!(judges.len(), 1);
    assert_eq!(judges[0].name_first, "Jane");
    assert_eq!(judges[0].name_last, "Roe");

    let positions = storage.positions();
    assert_eq!(positions.len(), 1);
    let position = &positions[0];
    assert_eq!(position.judge_id, judges[0].id);
    assert_eq!(position.court_id.as_deref(), Some("CA-Super"));
    assert_eq!(position.date_start, NaiveDate::from_ymd_opt(2001, 5, 1));
    assert_eq!(position.date_granularity_start.as_deref(), Some(GRANULARITY_DAY));
    assert_eq!(position.date_termination, None);
    assert_eq!(position.date_granularity_termination, None);
    assert_eq!(position.termination_reason, None);
}

#[tokio::test]
async fn count_given_as_string_is_accepted() {
    let storage = MemoryStorage::default();
    let file = parse_import_file(
        r#"{"count": "2", "judges": [
            {"fullName": "Ann Lee", "positions": []},
            {"fullName": "Bo Park", "positions": []}
        ]}"#,
    )
    .unwrap();

    let report = import::import_ca_judges(&storage, &file, &counties())
        .await
        .unwrap();
    assert_eq!(report.judges_created, 2);
    assert_eq!(report.positions_created, 0);
}

#[tokio::test]
async fn county_courts_resolve_to_superior_court_keys() {
    let storage = MemoryStorage::default();
    let file = parse_import_file(
        r#"{"count": 1, "judges": [{
            "fullName": "Hon. Maria Elena Torres",
            "positions": [{
                "court": "Los Angeles County Superior Court",
                "organization_name": "Superior Court",
                "position_type": "jud",
                "job_title": "Judge",
                "location_county": "los angeles",
                "date_start": "03/15/2012",
                "date_termination": "2020-01-31T00:00:00Z",
                "termination_reason": "ret"
            }]
        }]}"#,
    )
    .unwrap();

    import::import_ca_judges(&storage, &file, &counties())
        .await
        .unwrap();

    let judge = &storage.judges()[0];
    assert_eq!(judge.name_first, "Maria");
    assert_eq!(judge.name_middle.as_deref(), Some("Elena"));
    assert_eq!(judge.name_last, "Torres");

    let position = &storage.positions()[0];
    assert_eq!(position.court_id.as_deref(), Some("casuperctla"));
    assert_eq!(position.organization_name, None);
    assert_eq!(position.position_type.as_deref(), Some("jud"));
    assert_eq!(position.job_title, None);
    assert_eq!(position.location_county.as_deref(), Some("Los Angeles"));
    assert_eq!(position.date_start, NaiveDate::from_ymd_opt(2012, 3, 15));
    assert_eq!(position.date_termination, NaiveDate::from_ymd_opt(2020, 1, 31));
    assert_eq!(position.termination_reason.as_deref(), Some("ret"));
    assert_eq!(
        position.date_granularity_termination.as_deref(),
        Some(GRANULARITY_DAY)
    );
}

// ── Judge resolution ────────────────────────────────────────────────

#[tokio::test]
async fn existing_judge_is_matched_case_insensitively() {
    let storage = MemoryStorage::default();
    let existing = storage.seed_judge("Jane Roe");

    let (judge, created) = find_or_create_judge(&storage, "  JANE   ROE ").await.unwrap();
    assert!(!created);
    assert_eq!(judge.id, existing.id);
    assert_eq!(storage.judges().len(), 1);
}

#[tokio::test]
async fn repeated_judge_in_one_file_is_created_once() {
    let storage = MemoryStorage::default();
    let file = parse_import_file(
        r#"{"count": 2, "judges": [
            {"fullName": "Ann Lee", "positions": [{"organization_name": "Lee & Co"}]},
            {"fullName": "ann lee", "positions": [{"court": "cal"}]}
        ]}"#,
    )
    .unwrap();

    let report = import::import_ca_judges(&storage, &file, &counties())
        .await
        .unwrap();
    assert_eq!(report.judges_created, 1);
    assert_eq!(report.judges_matched, 1);
    assert_eq!(storage.judges().len(), 1);
    assert!(storage
        .positions()
        .iter()
        .all(|p| p.judge_id == storage.judges()[0].id));
}

#[tokio::test]
async fn honorific_does_not_split_a_judge_in_two() {
    let storage = MemoryStorage::default();
    let file = parse_import_file(
        r#"{"count": 2, "judges": [
            {"fullName": "Hon. Maria Elena Torres", "positions": [{"court": "cal"}]},
            {"fullName": "Maria Elena Torres", "positions": [{"court": "calctapp"}]}
        ]}"#,
    )
    .unwrap();

    let report = import::import_ca_judges(&storage, &file, &counties())
        .await
        .unwrap();
    assert_eq!(report.judges_created, 1);
    assert_eq!(report.judges_matched, 1);
    let judges = storage.judges();
    assert_eq!(judges.len(), 1);
    assert_eq!(judges[0].name_full, "Maria Elena Torres");
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_failure_keeps_earlier_positions_and_stops() {
    let storage = MemoryStorage {
        fail_position_at: Some(1),
        ..Default::default()
    };
    let file = parse_import_file(
        r#"{"count": 2, "judges": [
            {"fullName": "Ann Lee", "positions": [
                {"court": "cal", "date_start": "1999-01-04"},
                {"court": "calctapp"},
                {"court": "cal"}
            ]},
            {"fullName": "Bo Park", "positions": [{"court": "cal"}]}
        ]}"#,
    )
    .unwrap();

    let err = import::import_ca_judges(&storage, &file, &counties())
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::DatabaseError);

    assert_eq!(storage.judges().len(), 1);
    let positions = storage.positions();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].court_id.as_deref(), Some("cal"));
}

#[tokio::test]
async fn bad_date_aborts_after_earlier_positions() {
    let storage = MemoryStorage::default();
    let file = parse_import_file(
        r#"{"count": 1, "judges": [
            {"fullName": "Ann Lee", "positions": [
                {"court": "cal", "date_start": "1999-01-04"},
                {"court": "cal", "date_start": "sometime in 2004"}
            ]}
        ]}"#,
    )
    .unwrap();

    let err = import::import_ca_judges(&storage, &file, &counties())
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("date_start"));
    assert_eq!(storage.positions().len(), 1);
}

#[test]
fn missing_full_name_is_rejected_before_import() {
    let err = parse_import_file(r#"{"count": 1, "judges": [{"fullName": ""}]}"#).unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
}
