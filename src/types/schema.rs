//! Response schema for schema-constrained replies.
//!
//! Serializes to the endpoint's OpenAPI-subset shape: upper-case `type`, nested
//! `properties`, `items` for arrays and an advisory `propertyOrdering`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::LlmError;

/// Primitive schema types understood by the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    /// Whether `value` has this type. Integers satisfy `Number`.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, ResponseSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Serialization order hint only; never checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_ordering: Option<Vec<String>>,
}

impl ResponseSchema {
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: None,
            items: None,
            enum_values: None,
            required: None,
            property_ordering: None,
        }
    }

    pub fn object() -> Self {
        Self::new(SchemaType::Object)
    }

    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    /// Array whose items match `items`.
    pub fn array(items: ResponseSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaType::Array)
        }
    }

    pub fn string_list() -> Self {
        Self::array(Self::string())
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict a string schema to `values`.
    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Add an object property. Insertion order becomes the advisory ordering.
    pub fn property(mut self, name: impl Into<String>, schema: ResponseSchema) -> Self {
        let name = name.into();
        let ordering = self.property_ordering.get_or_insert_with(Vec::new);
        if !ordering.contains(&name) {
            ordering.push(name.clone());
        }
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(name, schema);
        self
    }

    /// Add a property and mark it as required.
    pub fn required_property(self, name: impl Into<String>, schema: ResponseSchema) -> Self {
        let name = name.into();
        let mut this = self.property(name.clone(), schema);
        let required = this.required.get_or_insert_with(Vec::new);
        if !required.contains(&name) {
            required.push(name);
        }
        this
    }

    /// Check `value` against this schema.
    ///
    /// Required properties must be present; every present property must have its
    /// declared type. Unknown properties are ignored and ordering is never checked.
    pub fn validate(&self, value: &Value) -> Result<(), LlmError> {
        self.validate_at("$", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), LlmError> {
        if !self.schema_type.matches(value) {
            return Err(LlmError::SchemaMismatch(format!(
                "{path}: expected {:?}, found {}",
                self.schema_type,
                json_type_name(value)
            )));
        }

        if let (Some(allowed), Some(s)) = (&self.enum_values, value.as_str())
            && !allowed.iter().any(|a| a == s)
        {
            return Err(LlmError::SchemaMismatch(format!(
                "{path}: `{s}` is not one of {allowed:?}"
            )));
        }

        if let Some(object) = value.as_object() {
            for name in self.required.iter().flatten() {
                if !object.contains_key(name) {
                    return Err(LlmError::MissingField(format!("{path}.{name}")));
                }
            }
            for (name, schema) in self.properties.iter().flatten() {
                if let Some(field) = object.get(name) {
                    schema.validate_at(&format!("{path}.{name}"), field)?;
                }
            }
        }

        if let (Some(items), Some(array)) = (&self.items, value.as_array()) {
            for (i, item) in array.iter().enumerate() {
                items.validate_at(&format!("{path}[{i}]"), item)?;
            }
        }

        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
