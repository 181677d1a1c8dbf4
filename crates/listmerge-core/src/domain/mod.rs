pub mod identity;
pub mod phone;
pub mod record;

pub use identity::identity_key;
pub use phone::normalize_phone;
pub use record::{
    value_kind, FieldNames, Record, DEFAULT_BUSINESS_NAME_FIELD, DEFAULT_EMAILS_FIELD,
    DEFAULT_PHONE_NUMBER_FIELD, DEFAULT_POSTCODE_FIELD,
};
