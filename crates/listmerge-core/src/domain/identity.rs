use crate::domain::record::{FieldNames, Record};

/// `<business name>_<phone>`; expects the phone to be normalized already.
///
/// Numeric and boolean values take part in the key as their JSON text.
pub fn identity_key(record: &Record, fields: &FieldNames) -> String {
    format!(
        "{}_{}",
        record.key_text(&fields.business_name),
        record.key_text(&fields.phone_number)
    )
}
