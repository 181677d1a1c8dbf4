use crate::domain::Record;
use serde::{Deserialize, Serialize};

/// Records as handed over by the loader, in deterministic load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    pub files_processed: usize,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummaryDto {
    pub files_processed: usize,
    pub total_input_records: usize,
    pub unique_count: usize,
    pub with_email_count: usize,
    pub without_email_count: usize,
    pub duplicates_removed: usize,
}
