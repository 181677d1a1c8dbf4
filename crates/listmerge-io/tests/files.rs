use listmerge_core::Record;
use listmerge_io::{
    load_batch, write_record_sets, write_records, DocumentShape, FileSelector, IoError,
};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PATTERN: &str = r"business_data_(\d+)";

fn write_json(dir: &Path, name: &str, value: Value) {
    fs::write(dir.join(name), serde_json::to_vec(&value).expect("encode")).expect("write");
}

fn file_names(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().expect("name").to_string_lossy().into_owned())
        .collect()
}

#[test]
fn select_filters_by_range_and_sorts_lexically() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path();
    for name in [
        "business_data_12.json",
        "business_data_3.json",
        "business_data_100.json",
        "business_data_2.json",
        "notes.json",
    ] {
        write_json(dir, name, json!([]));
    }
    fs::create_dir(dir.join("business_data_5")).expect("mkdir");

    let selector = FileSelector::new(PATTERN, Some(3), Some(100)).expect("selector");
    let selected = selector.select(dir).expect("select");
    assert_eq!(
        file_names(&selected),
        vec![
            "business_data_100.json",
            "business_data_12.json",
            "business_data_3.json",
        ]
    );
}

#[test]
fn select_reports_missing_directory() {
    let temp = TempDir::new().expect("temp dir");
    let selector = FileSelector::new(PATTERN, None, None).expect("selector");
    let err = selector.select(&temp.path().join("missing")).unwrap_err();
    assert!(matches!(err, IoError::ReadDir { .. }));
}

#[test]
fn load_batch_concatenates_files_in_given_order() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path();
    write_json(
        dir,
        "business_data_1.json",
        json!([{"Business Name": "A"}, {"Business Name": "B"}]),
    );
    write_json(dir, "business_data_2.json", json!({"Business Name": "C"}));
    write_json(dir, "business_data_3.json", json!("not records"));

    let selector = FileSelector::new(PATTERN, None, None).expect("selector");
    let paths = selector.select(dir).expect("select");
    let report = load_batch(&paths).expect("load");

    assert_eq!(report.batch.files_processed, 3);
    let names: Vec<&str> = report
        .batch
        .records
        .iter()
        .map(|r| r.text("Business Name"))
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);

    let shapes: Vec<DocumentShape> = report.files.iter().map(|f| f.shape).collect();
    assert_eq!(
        shapes,
        vec![
            DocumentShape::Array,
            DocumentShape::Object,
            DocumentShape::Ignored("string"),
        ]
    );
}

#[test]
fn load_batch_aborts_on_first_bad_file() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path();
    write_json(dir, "business_data_1.json", json!([{"Business Name": "A"}]));
    fs::write(dir.join("business_data_2.json"), "{ not json").expect("write");

    let selector = FileSelector::new(PATTERN, None, None).expect("selector");
    let paths = selector.select(dir).expect("select");
    let err = load_batch(&paths).unwrap_err();
    assert!(matches!(err, IoError::Parse { .. }));
    assert!(err.to_string().contains("business_data_2.json"));
}

#[test]
fn write_records_emits_pretty_array_and_creates_parents() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("out").join("records.json");
    let records = vec![
        Record::from_value(json!({"Business Name": "A", "Postcode": "1"})).expect("record"),
    ];

    write_records(&path, &records).expect("write");

    let text = fs::read_to_string(&path).expect("read");
    assert!(text.starts_with("[\n  {\n    \"Business Name\": \"A\""));
    let parsed: Value = serde_json::from_str(&text).expect("parse");
    assert_eq!(parsed, json!([{"Business Name": "A", "Postcode": "1"}]));
}

#[test]
fn write_records_with_empty_input_writes_empty_array() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("empty.json");
    write_records(&path, &[]).expect("write");
    assert_eq!(fs::read_to_string(&path).expect("read"), "[]");
}

#[test]
fn write_record_sets_writes_every_target() {
    let temp = TempDir::new().expect("temp dir");
    let first = temp.path().join("a.json");
    let second = temp.path().join("nested").join("b.json");
    let records =
        vec![Record::from_value(json!({"Business Name": "A"})).expect("record")];

    let empty: &[Record] = &[];
    write_record_sets(&[(first.as_path(), records.as_slice()), (second.as_path(), empty)])
        .expect("write");

    let parsed: Value =
        serde_json::from_str(&fs::read_to_string(&first).expect("read")).expect("parse");
    assert_eq!(parsed, json!([{"Business Name": "A"}]));
    assert_eq!(fs::read_to_string(&second).expect("read"), "[]");
}

#[test]
fn write_record_sets_replaces_nothing_when_a_target_fails() {
    let temp = TempDir::new().expect("temp dir");
    let first = temp.path().join("with_email.json");
    let second = temp.path().join("without_email.json");
    fs::write(&first, "old").expect("seed");
    fs::write(temp.path().join("blocker"), "file").expect("seed");
    let third = temp.path().join("blocker").join("all_unique.json");
    let records =
        vec![Record::from_value(json!({"Business Name": "A"})).expect("record")];

    let err = write_record_sets(&[
        (first.as_path(), records.as_slice()),
        (second.as_path(), records.as_slice()),
        (third.as_path(), records.as_slice()),
    ])
    .unwrap_err();

    assert!(matches!(err, IoError::Write { .. }));
    assert!(err.to_string().contains("all_unique.json"));
    assert_eq!(fs::read_to_string(&first).expect("read"), "old");
    assert!(!second.exists());
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(leftovers.len(), 2);
}
