//! Field kinds that construct nested DTOs

use serde_json::Value;

use super::{FieldCoercion, FieldOptions};
use crate::constants::{KIND_LIST_WITH_DTO, KIND_OBJECT_WITH_DTO};
use crate::error::{Error, Result};
use crate::mapping::{DtoType, construct_items};
use crate::value::FieldValue;

/// Constructs every element of an array through one DTO type
#[derive(Debug, Clone)]
pub struct ListWithDtoField {
    item_type: DtoType,
}

impl ListWithDtoField {
    /// Binds the item type, rejecting types that declare no fields
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `item_type` declares no fields.
    pub fn new(item_type: &DtoType) -> Result<Self> {
        item_type.ensure_valid()?;
        Ok(Self {
            item_type: item_type.clone(),
        })
    }
}

impl FieldCoercion for ListWithDtoField {
    fn kind(&self) -> &'static str {
        KIND_LIST_WITH_DTO
    }

    fn coerce(&self, _key: &str, value: &Value, _options: &FieldOptions) -> Result<FieldValue> {
        if value.is_null() {
            return Ok(FieldValue::Null);
        }

        construct_items(value, &self.item_type).map(FieldValue::DtoList)
    }
}

/// Constructs an object through one DTO type
///
/// With a `null` default the field is optional: empty values (`false`, `0`, `""`) map to null.
#[derive(Debug, Clone)]
pub struct ObjectWithDtoField {
    dto_type: DtoType,
}

impl ObjectWithDtoField {
    /// Binds the nested type, rejecting types that declare no fields
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `dto_type` declares no fields.
    pub fn new(dto_type: &DtoType) -> Result<Self> {
        dto_type.ensure_valid()?;
        Ok(Self {
            dto_type: dto_type.clone(),
        })
    }

    fn construct(&self, value: &Value) -> Result<FieldValue> {
        self.dto_type
            .construct(value)
            .map(|dto| FieldValue::Dto(Box::new(dto)))
    }
}

impl FieldCoercion for ObjectWithDtoField {
    fn kind(&self) -> &'static str {
        KIND_OBJECT_WITH_DTO
    }

    fn coerce(&self, key: &str, value: &Value, options: &FieldOptions) -> Result<FieldValue> {
        if value.is_null() {
            return Ok(FieldValue::Null);
        }

        if !is_empty_value(value) {
            return self.construct(value);
        }

        match options.default_value() {
            Some(Value::Null) => Ok(FieldValue::Null),
            Some(default) if !is_empty_value(default) => self.construct(default),
            _ => Err(Error::missing_property(key)),
        }
    }
}

/// Null, `false`, zero and the empty string carry no object
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
