pub mod dedup;
pub mod partition;
pub mod sort;

pub use dedup::{dedup_records, DedupOutcome, DedupStats, DedupTable, Deduplicator};
pub use partition::{partition_by_email, EmailPartition};
pub use sort::{natural_cmp, sort_by_postcode, sorted_by_postcode};
