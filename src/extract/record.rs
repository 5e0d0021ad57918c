use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LlmError;
use crate::types::ResponseSchema;

/// A structured object extracted from a model reply.
///
/// Thin wrapper over a JSON object with typed accessors. The `get_*` accessors return
/// `None` when a field is absent or has another type; the `require_*` variants turn
/// that into `LlmError::MissingField` for callers that cannot proceed without it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field)?.as_str()
    }

    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field)?.as_f64()
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field)?.as_i64()
    }

    /// A list of strings; `None` if any element is not a string.
    pub fn get_string_list(&self, field: &str) -> Option<Vec<&str>> {
        self.get(field)?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    pub fn get_record(&self, field: &str) -> Option<Record> {
        self.get(field)?.as_object().cloned().map(Record)
    }

    pub fn require_str(&self, field: &str) -> Result<&str, LlmError> {
        self.get_str(field).ok_or_else(|| missing(field, "string"))
    }

    pub fn require_f64(&self, field: &str) -> Result<f64, LlmError> {
        self.get_f64(field).ok_or_else(|| missing(field, "number"))
    }

    pub fn require_string_list(&self, field: &str) -> Result<Vec<&str>, LlmError> {
        self.get_string_list(field)
            .ok_or_else(|| missing(field, "list of strings"))
    }

    pub fn require_record(&self, field: &str) -> Result<Record, LlmError> {
        self.get_record(field).ok_or_else(|| missing(field, "object"))
    }

    /// Check this record against a caller-declared schema.
    pub fn validate(&self, schema: &ResponseSchema) -> Result<(), LlmError> {
        schema.validate(&Value::Object(self.0.clone()))
    }

    /// Deserialize into a caller type.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, LlmError> {
        T::deserialize(Value::Object(self.0.clone()))
            .map_err(|e| LlmError::SchemaMismatch(e.to_string()))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn missing(field: &str, expected: &str) -> LlmError {
    LlmError::MissingField(format!("{field} ({expected})"))
}
