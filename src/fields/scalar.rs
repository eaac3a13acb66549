//! Passthrough field kinds that only check the JSON type

use serde_json::Value;

use super::{FieldCoercion, FieldOptions};
use crate::constants::{
    KIND_BOOLEAN, KIND_GENERIC, KIND_LIST, KIND_NUMBER, KIND_STRING, MSG_ARRAY_REQUIRED,
    MSG_BOOLEAN_REQUIRED, MSG_NUMBER_REQUIRED, MSG_STRING_REQUIRED,
};
use crate::error::{Error, Result};
use crate::value::FieldValue;

/// A field kind that accepts null or values passing a JSON type check
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveField {
    kind:    &'static str,
    accepts: fn(&Value) -> bool,
    message: &'static str,
}

impl PrimitiveField {
    /// Any value
    pub const GENERIC: Self = Self {
        kind:    KIND_GENERIC,
        accepts: any_value,
        message: "",
    };
    /// Strings
    pub const STRING: Self = Self {
        kind:    KIND_STRING,
        accepts: Value::is_string,
        message: MSG_STRING_REQUIRED,
    };
    /// Booleans
    pub const BOOLEAN: Self = Self {
        kind:    KIND_BOOLEAN,
        accepts: Value::is_boolean,
        message: MSG_BOOLEAN_REQUIRED,
    };
    /// Numbers
    pub const NUMBER: Self = Self {
        kind:    KIND_NUMBER,
        accepts: Value::is_number,
        message: MSG_NUMBER_REQUIRED,
    };
    /// Arrays
    pub const LIST: Self = Self {
        kind:    KIND_LIST,
        accepts: Value::is_array,
        message: MSG_ARRAY_REQUIRED,
    };
}

const fn any_value(_: &Value) -> bool {
    true
}

impl FieldCoercion for PrimitiveField {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn coerce(&self, _key: &str, value: &Value, _options: &FieldOptions) -> Result<FieldValue> {
        if !value.is_null() && !(self.accepts)(value) {
            return Err(Error::InvalidProperty(self.message.to_string()));
        }

        Ok(FieldValue::from_json(value))
    }
}
