//! Decoded records: an ordered name → value mapping produced by one schema decode

use crate::error::SchemaError;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::fmt;

/// Semantic value of one decoded field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Unsigned(value) => Some(*value),
            FieldValue::Signed(value) => u64::try_from(*value).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(value) => Some(*value),
            FieldValue::Unsigned(value) => Some(*value as f64),
            FieldValue::Signed(value) => Some(*value as f64),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Unsigned(value) => write!(f, "{value}"),
            FieldValue::Signed(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    pub name: &'static str,
    pub label: &'static str,
    pub offset: usize,
    pub value: FieldValue,
}

/// Fields of one record, in offset order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    schema: String,
    fields: Vec<DecodedField>,
}

impl Record {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            fields: Vec::new(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn push(&mut self, field: DecodedField) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[DecodedField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    fn require(&self, name: &str) -> Result<&FieldValue, SchemaError> {
        self.get(name).ok_or_else(|| SchemaError::MissingField {
            schema: self.schema.clone(),
            field: name.to_string(),
        })
    }

    pub fn u32(&self, name: &str) -> Result<u32, SchemaError> {
        self.require(name)?
            .as_u64()
            .and_then(|value| u32::try_from(value).ok())
            .ok_or_else(|| mismatch(name, "u32"))
    }

    pub fn f64(&self, name: &str) -> Result<f64, SchemaError> {
        self.require(name)?
            .as_f64()
            .ok_or_else(|| mismatch(name, "float"))
    }

    pub fn text(&self, name: &str) -> Result<&str, SchemaError> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| mismatch(name, "text"))
    }
}

fn mismatch(field: &str, expected: &'static str) -> SchemaError {
    SchemaError::TypeMismatch {
        field: field.to_string(),
        expected,
    }
}

/// Serializes as a JSON object keyed by field name, preserving offset order.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(field.name, &field.value)?;
        }
        map.end()
    }
}
