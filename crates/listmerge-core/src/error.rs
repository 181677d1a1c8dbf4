use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("record must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("field name for {0} cannot be empty")]
    EmptyFieldName(&'static str),
    #[error("field names must be distinct: {0}")]
    DuplicateFieldName(String),
}
