use crate::domain::phone::normalize_phone;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

pub const DEFAULT_BUSINESS_NAME_FIELD: &str = "Business Name";
pub const DEFAULT_PHONE_NUMBER_FIELD: &str = "Phone Number";
pub const DEFAULT_EMAILS_FIELD: &str = "Emails";
pub const DEFAULT_POSTCODE_FIELD: &str = "Postcode";

/// JSON keys of the fields the pipeline reads. Every other key passes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    pub business_name: String,
    pub phone_number: String,
    pub emails: String,
    pub postcode: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            business_name: DEFAULT_BUSINESS_NAME_FIELD.to_string(),
            phone_number: DEFAULT_PHONE_NUMBER_FIELD.to_string(),
            emails: DEFAULT_EMAILS_FIELD.to_string(),
            postcode: DEFAULT_POSTCODE_FIELD.to_string(),
        }
    }
}

impl FieldNames {
    pub fn validate(&self) -> Result<(), CoreError> {
        let named = [
            ("business_name", &self.business_name),
            ("phone_number", &self.phone_number),
            ("emails", &self.emails),
            ("postcode", &self.postcode),
        ];

        for (label, value) in named {
            if value.trim().is_empty() {
                return Err(CoreError::EmptyFieldName(label));
            }
        }

        for (idx, (_, value)) in named.iter().enumerate() {
            if named[idx + 1..].iter().any(|(_, other)| other == value) {
                return Err(CoreError::DuplicateFieldName((*value).clone()));
            }
        }

        Ok(())
    }
}

/// One business listing, kept as the JSON object it was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(CoreError::NotAnObject(value_kind(&other))),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String value of `field`, or `""` when it is missing or not a string.
    pub fn text(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or("")
    }

    /// Like [`Record::text`], but numbers and booleans keep their JSON text.
    pub fn key_text(&self, field: &str) -> Cow<'_, str> {
        match self.0.get(field) {
            Some(Value::String(value)) => Cow::Borrowed(value),
            Some(Value::Number(value)) => Cow::Owned(value.to_string()),
            Some(Value::Bool(value)) => Cow::Owned(value.to_string()),
            _ => Cow::Borrowed(""),
        }
    }

    pub fn has_email(&self, field: &str) -> bool {
        matches!(self.0.get(field), Some(Value::Array(items)) if !items.is_empty())
    }

    /// Rewrites the phone field in place. Non-string values are left alone.
    pub fn normalize_phone(&mut self, field: &str) {
        if let Some(Value::String(phone)) = self.0.get_mut(field) {
            *phone = normalize_phone(phone);
        }
    }
}

pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
