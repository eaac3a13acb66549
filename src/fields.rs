//! Field descriptors
//!
//! A [`FieldDescriptor`] pairs the [`FieldOptions`] of one mapped field with the
//! [`FieldCoercion`] that validates its value. Descriptors are immutable and cheap to clone, so a
//! single descriptor can be shared by any number of mapping specs and threads.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::mapping::DtoType;
use crate::value::FieldValue;

mod date;
mod nested;
mod scalar;

pub use self::date::DateField;
pub use self::nested::{ListWithDtoField, ObjectWithDtoField};
pub use self::scalar::PrimitiveField;

/// Computes a field value from the entire raw input; `None` means "no value"
pub type Callback = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Per-field mapping options
#[derive(Clone, Default)]
pub struct FieldOptions {
    default:    Option<Value>,
    source_key: Option<String>,
    callback:   Option<Callback>,
}

impl FieldOptions {
    /// Options with no default, no key rename and no callback
    pub fn new() -> Self {
        Self::default()
    }

    /// Value used when neither the callback nor the input supply one.
    ///
    /// A `null` default makes the field optional: its absence is not an error and it maps to
    /// null.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Reads the value from `key` in the input instead of the field name
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.source_key = Some(key.into());
        self
    }

    /// Computes the value from the whole input; takes precedence unless it returns `None`
    #[must_use]
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// The configured default value
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The configured source key
    pub fn source_key(&self) -> Option<&str> {
        self.source_key.as_deref()
    }

    /// Returns `true` if a callback is configured
    pub const fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Runs the callback against the raw input, if one is configured
    pub fn resolve_callback(&self, raw: &Value) -> Option<Value> {
        self.callback.as_ref().and_then(|callback| callback(raw))
    }

    /// Returns `true` when the default is explicitly `null`
    pub fn is_optional(&self) -> bool {
        matches!(self.default, Some(Value::Null))
    }
}

impl fmt::Debug for FieldOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldOptions")
            .field("default", &self.default)
            .field("source_key", &self.source_key)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// Validates and converts the value of one field kind
///
/// Implement this to add custom field kinds; wrap the implementation with
/// [`FieldDescriptor::new`].
pub trait FieldCoercion: Send + Sync {
    /// Short name of the field kind, used in logs and `Debug` output
    fn kind(&self) -> &'static str;

    /// Converts a present value read from the input under `key`
    ///
    /// # Errors
    ///
    /// Fails with a typed error, usually [`crate::Error::InvalidProperty`], when the value does
    /// not fit this kind.
    fn coerce(&self, key: &str, value: &Value, options: &FieldOptions) -> Result<FieldValue>;
}

/// A reusable value coercion rule plus its options
#[derive(Clone)]
pub struct FieldDescriptor {
    options:  FieldOptions,
    coercion: Arc<dyn FieldCoercion>,
}

impl FieldDescriptor {
    /// Wraps a coercion with the given options
    pub fn new(coercion: impl FieldCoercion + 'static, options: FieldOptions) -> Self {
        Self {
            options,
            coercion: Arc::new(coercion),
        }
    }

    /// Replaces the options of this descriptor
    #[must_use]
    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// Shorthand for [`FieldOptions::with_default`]
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.options = self.options.with_default(value);
        self
    }

    /// Shorthand for [`FieldOptions::with_key`]
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.options = self.options.with_key(key);
        self
    }

    /// Shorthand for [`FieldOptions::with_callback`]
    #[must_use]
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.options = self.options.with_callback(callback);
        self
    }

    /// The options of this descriptor
    pub const fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// The field kind reported by the coercion
    pub fn kind(&self) -> &'static str {
        self.coercion.kind()
    }

    /// Validates and converts a value read from the input under `key`
    ///
    /// # Errors
    ///
    /// Propagates the error of the wrapped [`FieldCoercion`].
    pub fn coerce(&self, key: &str, value: &Value) -> Result<FieldValue> {
        self.coercion.coerce(key, value, &self.options)
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("kind", &self.kind())
            .field("options", &self.options)
            .finish()
    }
}

/// Takes values of any kind, including null
pub fn generic() -> FieldDescriptor {
    FieldDescriptor::new(PrimitiveField::GENERIC, FieldOptions::new())
}

/// Takes string values or null
pub fn string() -> FieldDescriptor {
    FieldDescriptor::new(PrimitiveField::STRING, FieldOptions::new())
}

/// Takes boolean values or null
pub fn boolean() -> FieldDescriptor {
    FieldDescriptor::new(PrimitiveField::BOOLEAN, FieldOptions::new())
}

/// Takes number values or null
pub fn number() -> FieldDescriptor {
    FieldDescriptor::new(PrimitiveField::NUMBER, FieldOptions::new())
}

/// Takes arrays or null
pub fn list() -> FieldDescriptor {
    FieldDescriptor::new(PrimitiveField::LIST, FieldOptions::new())
}

/// Takes date strings, millisecond timestamps or null and parses them to UTC instants
pub fn date() -> FieldDescriptor {
    FieldDescriptor::new(DateField, FieldOptions::new())
}

/// Takes arrays or null and constructs every element as a `item_type` DTO
///
/// # Errors
///
/// Returns [`crate::Error::InvalidArgument`] if `item_type` declares no fields.
pub fn list_with_dto(item_type: &DtoType) -> Result<FieldDescriptor> {
    Ok(FieldDescriptor::new(
        ListWithDtoField::new(item_type)?,
        FieldOptions::new(),
    ))
}

/// Takes an object and constructs it as a `dto_type` DTO
///
/// # Errors
///
/// Returns [`crate::Error::InvalidArgument`] if `dto_type` declares no fields.
pub fn object_with_dto(dto_type: &DtoType) -> Result<FieldDescriptor> {
    Ok(FieldDescriptor::new(
        ObjectWithDtoField::new(dto_type)?,
        FieldOptions::new(),
    ))
}
