//! Tests for fuzzy fact lookup.

use crate::store::SqliteFactStore;
use crate::FactStore;
use tempfile::NamedTempFile;

const THRESHOLD: f64 = 85.0;

fn seeded_store() -> SqliteFactStore {
    let store = SqliteFactStore::in_memory().unwrap();
    store
        .save("capital of france", "Paris is the capital of France.")
        .unwrap();
    store
        .save("boiling point of water", "Water boils at 100 °C at sea level.")
        .unwrap();
    store
        .save("who wrote hamlet", "William Shakespeare wrote Hamlet.")
        .unwrap();
    store
}

#[test]
fn test_case_insensitive_hit() {
    let store = seeded_store();

    let hit = store.lookup("capital of France", THRESHOLD).unwrap().unwrap();
    assert_eq!(hit.question, "capital of france");
    assert_eq!(hit.answer, "Paris is the capital of France.");
    assert_eq!(hit.score, 100.0);
}

#[test]
fn test_near_wording_hit() {
    let store = seeded_store();

    let hit = store.lookup("the capital of france?", THRESHOLD).unwrap();
    assert_eq!(
        hit.map(|m| m.question),
        Some("capital of france".to_string())
    );
}

#[test]
fn test_unrelated_query_misses() {
    let store = seeded_store();
    assert!(store
        .lookup("how far is the moon", THRESHOLD)
        .unwrap()
        .is_none());
}

#[test]
fn test_threshold_is_exclusive() {
    let store = seeded_store();
    // An exact match scores 100, which is not strictly above 100
    assert!(store
        .lookup("capital of france", 100.0)
        .unwrap()
        .is_none());
}

#[test]
fn test_best_score_wins() {
    let store = SqliteFactStore::in_memory().unwrap();
    store.save("capital of franc", "Close.").unwrap();
    store.save("capital of france", "Exact.").unwrap();

    let hit = store.lookup("capital of france", THRESHOLD).unwrap().unwrap();
    assert_eq!(hit.answer, "Exact.");
}

#[test]
fn test_empty_store_misses() {
    let temp_file = NamedTempFile::new().unwrap();
    let store = SqliteFactStore::open(temp_file.path()).unwrap();
    assert!(store.lookup("anything", THRESHOLD).unwrap().is_none());
}

#[test]
fn test_deleted_fact_no_longer_matches() {
    let store = seeded_store();
    assert!(store.delete("Who wrote Hamlet").unwrap());
    assert!(store
        .lookup("who wrote hamlet", THRESHOLD)
        .unwrap()
        .is_none());
    assert_eq!(store.count().unwrap(), 2);
}
