use crate::domain::{identity_key, FieldNames, Record};
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupOutcome {
    /// First record seen for its identity key.
    Inserted,
    /// Existing entry overwritten by a record carrying emails.
    Replaced,
    /// Emailless duplicate; the existing entry was kept.
    Dropped,
}

/// Records keyed by identity, iterated in first-insertion order of each key.
#[derive(Debug, Clone, Default)]
pub struct DedupTable {
    records: IndexMap<String, Record>,
}

impl DedupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn get_index(&self, index: usize) -> Option<&Record> {
        self.records.get_index(index).map(|(_, record)| record)
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Record> {
        self.records.values()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records.into_values().collect()
    }

    // A later record only wins when it has emails; the entry keeps its original position.
    fn offer(&mut self, key: String, record: Record, has_email: bool) -> DedupOutcome {
        match self.records.get_mut(&key) {
            None => {
                self.records.insert(key, record);
                DedupOutcome::Inserted
            }
            Some(existing) => {
                if has_email {
                    *existing = record;
                    DedupOutcome::Replaced
                } else {
                    DedupOutcome::Dropped
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    pub seen: usize,
    pub inserted: usize,
    pub replaced: usize,
    pub dropped: usize,
}

impl DedupStats {
    pub fn duplicates_removed(&self) -> usize {
        self.replaced + self.dropped
    }
}

/// Folds records, in arrival order, into a [`DedupTable`].
#[derive(Debug)]
pub struct Deduplicator<'a> {
    fields: &'a FieldNames,
    table: DedupTable,
    stats: DedupStats,
}

impl<'a> Deduplicator<'a> {
    pub fn new(fields: &'a FieldNames) -> Self {
        Self {
            fields,
            table: DedupTable::new(),
            stats: DedupStats::default(),
        }
    }

    pub fn push(&mut self, mut record: Record) -> DedupOutcome {
        record.normalize_phone(&self.fields.phone_number);
        let key = identity_key(&record, self.fields);
        let has_email = record.has_email(&self.fields.emails);

        let outcome = self.table.offer(key, record, has_email);
        self.stats.seen += 1;
        match outcome {
            DedupOutcome::Inserted => self.stats.inserted += 1,
            DedupOutcome::Replaced => self.stats.replaced += 1,
            DedupOutcome::Dropped => self.stats.dropped += 1,
        }
        outcome
    }

    pub fn table(&self) -> &DedupTable {
        &self.table
    }

    pub fn finish(self) -> (DedupTable, DedupStats) {
        (self.table, self.stats)
    }
}

impl Extend<Record> for Deduplicator<'_> {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, records: I) {
        for record in records {
            self.push(record);
        }
    }
}

pub fn dedup_records<I>(records: I, fields: &FieldNames) -> (DedupTable, DedupStats)
where
    I: IntoIterator<Item = Record>,
{
    let mut dedup = Deduplicator::new(fields);
    dedup.extend(records);
    dedup.finish()
}
