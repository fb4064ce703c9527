mod common;

use common::{ensemble, scored, sdf_record};
use fastgrow::engine::db_ops::validate_hit;
use fastgrow::engine::{HitStore, SqliteStore, open_db, open_db_in_memory};
use fastgrow::sdf::build_hit;
use fastgrow::{GrowError, GrowingJob, JobStatus, ParsedHit};
use std::path::PathBuf;
use tempfile::TempDir;

fn memory_store() -> SqliteStore {
    SqliteStore::new(open_db_in_memory().unwrap())
}

fn hit(name: &str, score: f64) -> ParsedHit {
    build_hit(scored(name, &score.to_string()), &ensemble(&["4agm"])).unwrap()
}

fn job(id: i64) -> GrowingJob {
    GrowingJob {
        id,
        core: PathBuf::from("core.sdf"),
        search_points: None,
        ensemble: ensemble(&["4agm"]),
        fragment_set: "fragments_v1".to_string(),
        status: JobStatus::Pending,
    }
}

#[test]
fn test_persist_and_load_hits() {
    let mut store = memory_store();
    let batch = vec![hit("HIT_A", 12.5), hit("HIT_B", 8.1)];
    assert_eq!(store.persist(7, &batch).unwrap(), 2);

    let loaded = store.load_hits(7).unwrap();
    assert_eq!(loaded, batch);
    assert_eq!(store.hit_count(7).unwrap(), 2);
    assert_eq!(store.hit_count(8).unwrap(), 0);
}

#[test]
fn test_persist_keeps_ensemble_scores() {
    let mut store = memory_store();
    let record = sdf_record("HIT_A", &[("Score", "3"), ("M1", "1.25"), ("M2", "-0.5")]);
    let h = build_hit(record, &ensemble(&["M1", "M2"])).unwrap();
    store.persist(1, std::slice::from_ref(&h)).unwrap();

    let loaded = store.load_hits(1).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].ensemble_scores.get("M1"), Some(&1.25));
    assert_eq!(loaded[0].ensemble_scores.get("M2"), Some(&-0.5));
    assert_eq!(loaded[0].file_string, h.file_string);
}

#[test]
fn test_persist_empty_batch() {
    let mut store = memory_store();
    assert_eq!(store.persist(1, &[]).unwrap(), 0);
    assert_eq!(store.hit_count(1).unwrap(), 0);
}

#[test]
fn test_persist_is_atomic() {
    let mut store = memory_store();
    store.persist(1, &[hit("EARLIER", 1.0)]).unwrap();

    let mut bad = hit("HIT_C", 2.0);
    bad.score = f64::NAN;
    let batch = vec![hit("HIT_A", 1.0), hit("HIT_B", 1.5), bad];
    assert!(matches!(
        store.persist(1, &batch),
        Err(GrowError::InvalidHit { .. })
    ));

    // earlier batch untouched, nothing from the failed one
    let names: Vec<String> = store
        .load_hits(1)
        .unwrap()
        .into_iter()
        .map(|h| h.name)
        .collect();
    assert_eq!(names, vec!["EARLIER".to_string()]);
}

#[test]
fn test_validate_hit() {
    assert!(validate_hit(&hit("ok", 1.0)).is_ok());

    let mut long = hit("x", 1.0);
    long.name = "x".repeat(255);
    assert!(matches!(
        validate_hit(&long),
        Err(GrowError::InvalidHit { .. })
    ));

    let mut exact = hit("x", 1.0);
    exact.name = "x".repeat(254);
    assert!(validate_hit(&exact).is_ok());

    let mut bad_member = hit("x", 1.0);
    bad_member
        .ensemble_scores
        .insert("M1".to_string(), f64::INFINITY);
    assert!(validate_hit(&bad_member).is_err());
}

#[test]
fn test_status_transitions() {
    let mut store = memory_store();
    assert_eq!(store.job_status(3).unwrap(), None);

    store.register_job(&job(3)).unwrap();
    assert_eq!(store.job_status(3).unwrap(), Some(JobStatus::Pending));

    store.set_status(3, JobStatus::Running).unwrap();
    assert_eq!(store.job_status(3).unwrap(), Some(JobStatus::Running));

    store.set_status(3, JobStatus::Failure).unwrap();
    assert_eq!(store.job_status(3).unwrap(), Some(JobStatus::Failure));
}

#[test]
fn test_set_status_without_registration() {
    let mut store = memory_store();
    store.set_status(9, JobStatus::Running).unwrap();
    assert_eq!(store.job_status(9).unwrap(), Some(JobStatus::Running));
}

#[test]
fn test_register_job_keeps_fragment_set() {
    let mut store = memory_store();
    store.register_job(&job(4)).unwrap();
    store.set_status(4, JobStatus::Success).unwrap();
    let fragment_set: String = store
        .conn()
        .query_row("SELECT fragment_set FROM growings WHERE id = 4", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(fragment_set, "fragments_v1");
}

#[test]
fn test_open_db_on_disk_reopens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hits.db");
    {
        let mut store = SqliteStore::new(open_db(&path).unwrap());
        store.persist(1, &[hit("HIT_A", 12.5)]).unwrap();
        store.set_status(1, JobStatus::Success).unwrap();
    }
    let store = SqliteStore::new(open_db(&path).unwrap());
    assert_eq!(store.hit_count(1).unwrap(), 1);
    assert_eq!(store.job_status(1).unwrap(), Some(JobStatus::Success));
}

#[test]
fn test_job_status_round_trip_strings() {
    for status in [
        JobStatus::Pending,
        JobStatus::Running,
        JobStatus::Success,
        JobStatus::Failure,
    ] {
        assert_eq!(JobStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(JobStatus::parse("running"), None);
}
