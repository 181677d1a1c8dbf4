use listmerge_core::{FieldNames, Pipeline, Record, RecordBatch};
use serde_json::{json, Value};
use std::collections::HashSet;

fn batch(values: Vec<Value>) -> RecordBatch {
    let records = values
        .into_iter()
        .map(|value| Record::from_value(value).expect("record"))
        .collect();
    RecordBatch {
        files_processed: 1,
        records,
    }
}

fn names(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.text("Business Name")).collect()
}

#[test]
fn pipeline_three_record_scenario() {
    let pipeline = Pipeline::default();
    let output = pipeline.run(batch(vec![
        json!({"Business Name": "A", "Phone Number": "1234567890", "Postcode": "2"}),
        json!({
            "Business Name": "A",
            "Phone Number": "(123) 456-7890",
            "Postcode": "2",
            "Emails": ["a@x.com"],
        }),
        json!({"Business Name": "B", "Phone Number": "555", "Postcode": "1"}),
    ]));

    assert_eq!(output.with_email.len(), 1);
    assert_eq!(output.with_email[0].text("Phone Number"), "+11234567890");
    assert!(output.with_email[0].has_email("Emails"));
    assert_eq!(names(&output.without_email), vec!["B"]);
    assert_eq!(output.without_email[0].text("Phone Number"), "555");
    assert_eq!(names(&output.all_unique), vec!["B", "A"]);
    assert!(output.all_unique[1].has_email("Emails"));

    let summary = output.summary;
    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.total_input_records, 3);
    assert_eq!(summary.unique_count, 2);
    assert_eq!(summary.with_email_count, 1);
    assert_eq!(summary.without_email_count, 1);
    assert_eq!(summary.duplicates_removed, 1);
}

#[test]
fn pipeline_sorts_each_view_independently() {
    let pipeline = Pipeline::default();
    let output = pipeline.run(batch(vec![
        json!({"Business Name": "w10", "Postcode": "10", "Emails": ["x@y.z"]}),
        json!({"Business Name": "n2", "Postcode": "2"}),
        json!({"Business Name": "w9", "Postcode": "9", "Emails": ["x@y.z"]}),
        json!({"Business Name": "n1", "Postcode": "1"}),
        json!({"Business Name": "none"}),
    ]));

    assert_eq!(names(&output.with_email), vec!["w9", "w10"]);
    assert_eq!(names(&output.without_email), vec!["none", "n1", "n2"]);
    assert_eq!(
        names(&output.all_unique),
        vec!["none", "n1", "n2", "w9", "w10"]
    );
}

#[test]
fn pipeline_counters_reconcile_and_groups_partition_unique_set() {
    let pipeline = Pipeline::default();
    let mut values = Vec::new();
    for idx in 0..30 {
        let name = format!("biz-{}", idx % 7);
        let mut value = json!({
            "Business Name": name,
            "Phone Number": format!("555-010{}", idx % 3),
            "Postcode": format!("{}", 100 - idx),
        });
        if idx % 4 == 0 {
            value["Emails"] = json!([format!("{idx}@example.com")]);
        }
        values.push(value);
    }
    let output = pipeline.run(batch(values));
    let summary = output.summary;

    assert_eq!(
        summary.with_email_count + summary.without_email_count,
        summary.unique_count
    );
    assert_eq!(
        summary.unique_count + summary.duplicates_removed,
        summary.total_input_records
    );
    assert_eq!(summary.total_input_records, 30);
    assert_eq!(output.dedup.duplicates_removed(), summary.duplicates_removed);

    let key = |r: &Record| {
        format!(
            "{}_{}",
            r.text("Business Name"),
            r.text("Phone Number")
        )
    };
    let all: HashSet<String> = output.all_unique.iter().map(key).collect();
    let with: HashSet<String> = output.with_email.iter().map(key).collect();
    let without: HashSet<String> = output.without_email.iter().map(key).collect();
    assert_eq!(all.len(), output.all_unique.len());
    assert!(with.is_disjoint(&without));
    let union: HashSet<String> = with.union(&without).cloned().collect();
    assert_eq!(union, all);
}

#[test]
fn pipeline_keeps_numeric_key_fields_distinct() {
    let output = Pipeline::default().run(batch(vec![
        json!({"Business Name": 101, "Phone Number": "5550001111"}),
        json!({"Business Name": 202, "Phone Number": "5550001111"}),
        json!({"Business Name": "Acme", "Phone Number": 5551234567u64}),
        json!({"Business Name": "Acme", "Phone Number": 5559999999u64}),
    ]));

    assert_eq!(output.summary.unique_count, 4);
    assert_eq!(output.summary.duplicates_removed, 0);
    assert_eq!(output.dedup.dropped, 0);
    assert_eq!(output.all_unique[2].get("Phone Number"), Some(&json!(5551234567u64)));
}

#[test]
fn pipeline_runs_are_independent() {
    let pipeline = Pipeline::default();
    let input = vec![
        json!({"Business Name": "A", "Phone Number": "1234567890"}),
        json!({"Business Name": "A", "Phone Number": "1234567890"}),
    ];
    let first = pipeline.run(batch(input.clone()));
    let second = pipeline.run(batch(input));
    assert_eq!(first.summary, second.summary);
    assert_eq!(second.summary.unique_count, 1);
}

#[test]
fn pipeline_honours_custom_field_names() {
    let pipeline = Pipeline::new(FieldNames {
        business_name: "BusinessName".to_string(),
        phone_number: "PhoneNumber".to_string(),
        emails: "Emails".to_string(),
        postcode: "Postcode".to_string(),
    });
    let output = pipeline.run(batch(vec![
        json!({"BusinessName": "A", "PhoneNumber": "11234567890", "Postcode": "2"}),
        json!({"BusinessName": "A", "PhoneNumber": "+1 123 456 7890", "Postcode": "1"}),
    ]));

    assert_eq!(output.summary.unique_count, 1);
    assert_eq!(output.all_unique[0].text("PhoneNumber"), "+11234567890");
    assert_eq!(output.all_unique[0].text("Postcode"), "2");
}

#[test]
fn pipeline_on_empty_batch_yields_empty_views() {
    let output = Pipeline::default().run(RecordBatch::default());
    assert!(output.all_unique.is_empty());
    assert_eq!(output.summary.total_input_records, 0);
    assert_eq!(output.summary.duplicates_removed, 0);
}
