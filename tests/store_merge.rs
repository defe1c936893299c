// tests/store_merge.rs
use std::fs;

use ufc_scrape::config::options::ExportFormat;
use ufc_scrape::{load_seen_keys, merge_and_save, merge_and_save_by, DataSet, Record, Store, StoreError};

fn rec(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().copied().collect()
}

fn csv_store(dir: &tempfile::TempDir, name: &str) -> Store {
    Store::new(dir.path().join(name), ExportFormat::Csv)
}

#[test]
fn bootstrap_writes_new_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = csv_store(&dir, "events.csv");

    let summary = merge_and_save(&store, &[rec(&[("fight_link", "A"), ("x", "1")])], "fight_link").unwrap();
    assert_eq!((summary.existing, summary.added, summary.total), (0, 1, 1));

    let ds = store.read_all().unwrap();
    assert_eq!(ds.headers, vec!["fight_link", "x"]);
    assert_eq!(ds.rows, vec![vec!["A", "1"]]);
}

#[test]
fn first_occurrence_wins() {
    let dir = tempfile::tempdir().unwrap();
    let store = csv_store(&dir, "events.csv");
    merge_and_save(&store, &[rec(&[("fight_link", "A"), ("x", "1")])], "fight_link").unwrap();

    let summary = merge_and_save(
        &store,
        &[rec(&[("fight_link", "A"), ("x", "2")]), rec(&[("fight_link", "B"), ("x", "3")])],
        "fight_link",
    )
    .unwrap();
    assert_eq!(summary.existing, 1);
    assert_eq!(summary.added, 1);
    assert_eq!(summary.dropped_duplicates, 1);
    assert_eq!(summary.total, 2);

    let ds = store.read_all().unwrap();
    assert_eq!(ds.rows, vec![vec!["A", "1"], vec!["B", "3"]]);
}

#[test]
fn no_duplicates_within_new_batch() {
    let dir = tempfile::tempdir().unwrap();
    let store = csv_store(&dir, "events.csv");
    let batch = [
        rec(&[("fight_link", "A"), ("x", "first")]),
        rec(&[("fight_link", "A"), ("x", "second")]),
    ];
    merge_and_save(&store, &batch, "fight_link").unwrap();
    assert_eq!(store.read_all().unwrap().rows, vec![vec!["A", "first"]]);
}

#[test]
fn empty_batch_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = csv_store(&dir, "events.csv");

    merge_and_save(&store, &[], "fight_link").unwrap();
    assert!(!store.exists());

    fs::write(store.path(), "fight_link\nA\n").unwrap();
    let before = fs::metadata(store.path()).unwrap().modified().unwrap();
    merge_and_save(&store, &[], "fight_link").unwrap();
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "fight_link\nA\n");
    assert_eq!(fs::metadata(store.path()).unwrap().modified().unwrap(), before);
}

#[test]
fn new_columns_are_appended_and_padded() {
    let dir = tempfile::tempdir().unwrap();
    let store = csv_store(&dir, "events.csv");
    merge_and_save(&store, &[rec(&[("fight_link", "A"), ("method", "KO")])], "fight_link").unwrap();
    merge_and_save(&store, &[rec(&[("fight_link", "B"), ("nickname", "The B")])], "fight_link").unwrap();

    let ds = store.read_all().unwrap();
    assert_eq!(ds.headers, vec!["fight_link", "method", "nickname"]);
    assert_eq!(ds.rows, vec![vec!["A", "KO", ""], vec!["B", "", "The B"]]);
}

#[test]
fn composite_key_keeps_every_round() {
    let dir = tempfile::tempdir().unwrap();
    let store = csv_store(&dir, "details.csv");
    let rounds = |url: &str, n: usize| -> Vec<Record> {
        (1..=n).map(|r| rec(&[("fight_url", url), ("round", &r.to_string()), ("red_kd", "0")])).collect()
    };

    let s1 = merge_and_save_by(&store, &rounds("F1", 3), &["fight_url", "round"]).unwrap();
    assert_eq!(s1.total, 3);

    let mut again = rounds("F1", 3);
    again.extend(rounds("F2", 2));
    let s2 = merge_and_save_by(&store, &again, &["fight_url", "round"]).unwrap();
    assert_eq!((s2.existing, s2.added, s2.dropped_duplicates, s2.total), (3, 2, 3, 5));

    // a single-column key on fight_url would have collapsed the rounds
    let ds = store.read_all().unwrap();
    assert_eq!(ds.column_values("fight_url").unwrap().filter(|u| *u == "F1").count(), 3);
}

#[test]
fn seen_keys_from_missing_and_existing_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = csv_store(&dir, "events.csv");
    assert!(load_seen_keys(&store, "fight_link").unwrap().is_empty());

    fs::write(store.path(), "event_link,fight_link\ne1,A\ne1,B\ne2,\ne2,A\n").unwrap();
    let seen = load_seen_keys(&store, "fight_link").unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.contains("A") && seen.contains("B"));

    let events = load_seen_keys(&store, "event_link").unwrap();
    assert_eq!(events.len(), 2);
}

#[test]
fn missing_key_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = csv_store(&dir, "events.csv");
    fs::write(store.path(), "event_link,other\ne1,x\n").unwrap();

    let err = load_seen_keys(&store, "fight_link").unwrap_err();
    assert!(matches!(err, StoreError::MissingColumn { ref column, .. } if column == "fight_link"));

    let err = merge_and_save(&store, &[rec(&[("fight_link", "A")])], "fight_link").unwrap_err();
    assert!(matches!(err, StoreError::MissingColumn { .. }));
    // the store is not rewritten on error
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "event_link,other\ne1,x\n");
}

#[test]
fn zero_length_store_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = csv_store(&dir, "events.csv");
    fs::write(store.path(), "").unwrap();

    assert!(load_seen_keys(&store, "fight_link").unwrap().is_empty());
    let s = merge_and_save(&store, &[rec(&[("fight_link", "A")])], "fight_link").unwrap();
    assert_eq!(s.total, 1);
}

#[test]
fn save_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("data").join("d.tsv"), ExportFormat::Tsv);
    for key in ["A", "B", "C"] {
        merge_and_save(&store, &[rec(&[("k", key)])], "k").unwrap();
    }
    let entries: Vec<_> = fs::read_dir(dir.path().join("data"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("d.tsv")]);
    assert_eq!(store.read_all().unwrap().len(), 3);
}

#[test]
fn dataset_round_trips_records() {
    let records = vec![rec(&[("a", "1"), ("b", "2")]), rec(&[("a", "3")])];
    let ds = DataSet::from_records(&records);
    let back: Vec<Record> = ds.records().collect();
    assert_eq!(back[0], records[0]);
    assert_eq!(back[1].get("b"), Some(""));
}

#[test]
fn bootstrap_without_key_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = csv_store(&dir, "events.csv");
    let batch = [rec(&[("x", "1")]), rec(&[("x", "2")]), rec(&[("x", "3")])];

    let err = merge_and_save(&store, &batch, "fight_link").unwrap_err();
    assert!(matches!(err, StoreError::MissingColumn { ref column, .. } if column == "fight_link"));
    assert!(!store.exists());

    // same on a zero-length file, which is left as it was
    fs::write(store.path(), "").unwrap();
    let err = merge_and_save_by(&store, &batch, &["x", "round"]).unwrap_err();
    assert!(matches!(err, StoreError::MissingColumn { ref column, .. } if column == "round"));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
}

#[test]
fn long_stored_row_stops_the_merge() {
    let dir = tempfile::tempdir().unwrap();
    let store = csv_store(&dir, "events.csv");
    fs::write(store.path(), "fight_link,a\nA,1,EXTRA\n").unwrap();

    let err = merge_and_save(&store, &[rec(&[("fight_link", "B"), ("a", "2")])], "fight_link").unwrap_err();
    assert!(matches!(err, StoreError::RowTooLong { line: 2, .. }));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "fight_link,a\nA,1,EXTRA\n");
}
