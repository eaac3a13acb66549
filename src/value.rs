//! Constructed DTO instances and the values they hold
//!
//! A [`Dto`] keeps its fields in declaration order next to an explicit `raw` trace of the input
//! it was built from. Serialization only ever sees the declared fields.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::Result;

/// The coerced value of a single DTO field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicit null, either from the input or from a `null` default
    Null,
    /// Passthrough value of a generic, string, boolean, number or list field
    Json(Value),
    /// Parsed value of a date field
    Date(DateTime<Utc>),
    /// Nested DTO of an `object_with_dto` field
    Dto(Box<Dto>),
    /// Nested DTOs of a `list_with_dto` field
    DtoList(Vec<Dto>),
}

impl FieldValue {
    /// Wraps a passthrough value, folding JSON null into [`FieldValue::Null`]
    pub fn from_json(value: &Value) -> Self {
        if value.is_null() {
            Self::Null
        } else {
            Self::Json(value.clone())
        }
    }

    /// Returns `true` for [`FieldValue::Null`]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The passthrough JSON value, if this is one
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The string held by a string or generic field
    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    /// The number held by a number or generic field
    pub fn as_f64(&self) -> Option<f64> {
        self.as_json().and_then(Value::as_f64)
    }

    /// The integer held by a number or generic field
    pub fn as_i64(&self) -> Option<i64> {
        self.as_json().and_then(Value::as_i64)
    }

    /// The boolean held by a boolean or generic field
    pub fn as_bool(&self) -> Option<bool> {
        self.as_json().and_then(Value::as_bool)
    }

    /// The array held by a list or generic field
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        self.as_json().and_then(Value::as_array)
    }

    /// The instant held by a date field
    pub const fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(date) => Some(date),
            _ => None,
        }
    }

    /// The nested DTO held by an `object_with_dto` field
    pub fn as_dto(&self) -> Option<&Dto> {
        match self {
            Self::Dto(dto) => Some(dto.as_ref()),
            _ => None,
        }
    }

    /// The nested DTOs held by a `list_with_dto` field
    pub fn as_dto_list(&self) -> Option<&[Dto]> {
        match self {
            Self::DtoList(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Converts into plain JSON, recursing into nested DTOs
    pub fn to_plain(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Json(value) => value.clone(),
            Self::Date(date) => Value::String(format_date(date)),
            Self::Dto(dto) => dto.to_plain(),
            Self::DtoList(items) => Value::Array(items.iter().map(Dto::to_plain).collect()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Json(value) => value.serialize(serializer),
            Self::Date(date) => serializer.serialize_str(&format_date(date)),
            Self::Dto(dto) => dto.serialize(serializer),
            Self::DtoList(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Dates serialize the way a JSON stringifier renders them: UTC with milliseconds
fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A validated DTO instance
///
/// Holds exactly the fields declared by the mapping it was constructed from. The original input
/// is kept in `raw` for traceability and is skipped by serialization and equality.
#[derive(Debug, Clone)]
pub struct Dto {
    fields: Vec<(String, FieldValue)>,
    raw:    Value,
}

impl Dto {
    pub(crate) const fn new(fields: Vec<(String, FieldValue)>, raw: Value) -> Self {
        Self { fields, raw }
    }

    /// Looks up a declared field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if `name` is a declared field
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declared field names, in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Declared fields and their values, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of declared fields
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false` for a constructed DTO, since empty mappings are rejected
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The untouched input this DTO was constructed from
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    /// Returns a new plain JSON object with exactly the declared keys
    pub fn to_plain(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(key, value)| (key.clone(), value.to_plain()))
                .collect(),
        )
    }

    /// Converts the plain form into a caller-defined serde type
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Conversion`] if the plain form does not fit `T`.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_plain())?)
    }
}

// Equality covers declared values only, the raw trace is excluded
impl PartialEq for Dto {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Serialize for Dto {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl fmt::Display for Dto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
