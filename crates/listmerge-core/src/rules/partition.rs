use crate::domain::{FieldNames, Record};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailPartition {
    pub with_email: Vec<Record>,
    pub without_email: Vec<Record>,
}

impl EmailPartition {
    pub fn len(&self) -> usize {
        self.with_email.len() + self.without_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.with_email.is_empty() && self.without_email.is_empty()
    }
}

/// Splits records on a non-empty email list, keeping input order in each group.
pub fn partition_by_email(records: &[Record], fields: &FieldNames) -> EmailPartition {
    let (with_email, without_email): (Vec<Record>, Vec<Record>) = records
        .iter()
        .cloned()
        .partition(|record| record.has_email(&fields.emails));
    EmailPartition {
        with_email,
        without_email,
    }
}
