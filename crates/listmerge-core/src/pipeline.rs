use crate::domain::FieldNames;
use crate::dto::{RecordBatch, RunSummaryDto};
use crate::rules::{dedup_records, partition_by_email, sorted_by_postcode, DedupStats};
use crate::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub with_email: Vec<Record>,
    pub without_email: Vec<Record>,
    pub all_unique: Vec<Record>,
    pub summary: RunSummaryDto,
    pub dedup: DedupStats,
}

/// Dedup, partition and sort over one batch. Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    fields: FieldNames,
}

impl Pipeline {
    pub fn new(fields: FieldNames) -> Self {
        Self { fields }
    }

    pub fn run(&self, batch: RecordBatch) -> PipelineOutput {
        let RecordBatch {
            files_processed,
            records,
        } = batch;
        let total_input_records = records.len();

        let (table, dedup) = dedup_records(records, &self.fields);
        let unique = table.into_records();
        let split = partition_by_email(&unique, &self.fields);

        let postcode = self.fields.postcode.as_str();
        let with_email = sorted_by_postcode(split.with_email, postcode);
        let without_email = sorted_by_postcode(split.without_email, postcode);
        let all_unique = sorted_by_postcode(unique, postcode);

        let summary = RunSummaryDto {
            files_processed,
            total_input_records,
            unique_count: all_unique.len(),
            with_email_count: with_email.len(),
            without_email_count: without_email.len(),
            duplicates_removed: total_input_records - all_unique.len(),
        };

        PipelineOutput {
            with_email,
            without_email,
            all_unique,
            summary,
            dedup,
        }
    }
}
