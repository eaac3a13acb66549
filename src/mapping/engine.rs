//! Single object construction

use serde_json::Value;
use tracing::{debug, trace};

use super::spec::MappingSpec;
use crate::constants::MSG_MAPPING_REQUIRED;
use crate::error::{Error, Result};
use crate::fields::FieldDescriptor;
use crate::value::{Dto, FieldValue};

/// Where a field's value came from, for tracing
#[derive(Debug, Clone, Copy)]
enum ValueSource {
    Callback,
    Input,
    Default,
}

/// Constructs one validated DTO from raw input
///
/// Fields are resolved in declaration order: the callback first, then the input under the
/// field's source key, then the default. The first failing field aborts construction. Non-object
/// input is accepted and simply supplies no values.
///
/// # Errors
///
/// - [`Error::Mapping`] if `spec` declares no fields
/// - [`Error::MissingProperty`] if a field resolves to no value
/// - [`Error::InvalidProperty`] or any other error raised by a field's coercion
pub fn construct_dto(raw: &Value, spec: &MappingSpec) -> Result<Dto> {
    if spec.is_empty() {
        return Err(Error::Mapping(MSG_MAPPING_REQUIRED.to_string()));
    }

    let fields = spec
        .iter()
        .map(|(name, descriptor)| {
            map_field(raw, name, descriptor)
                .map(|value| (name.to_string(), value))
                .inspect_err(|e| debug!("Field '{}' ({}) failed: {}", name, descriptor.kind(), e))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dto::new(fields, raw.clone()))
}

fn map_field(raw: &Value, name: &str, descriptor: &FieldDescriptor) -> Result<FieldValue> {
    let options = descriptor.options();
    let source_key = options.source_key().unwrap_or(name);

    let Some((value, source)) = resolve_value(raw, source_key, descriptor) else {
        return Err(Error::missing_property(source_key));
    };

    trace!("Field '{}' resolved from {:?} key '{}'", name, source, source_key);
    descriptor.coerce(source_key, &value)
}

fn resolve_value(
    raw: &Value,
    source_key: &str,
    descriptor: &FieldDescriptor,
) -> Option<(Value, ValueSource)> {
    let options = descriptor.options();

    options
        .resolve_callback(raw)
        .map(|value| (value, ValueSource::Callback))
        .or_else(|| {
            raw.get(source_key)
                .map(|value| (value.clone(), ValueSource::Input))
        })
        .or_else(|| {
            options
                .default_value()
                .map(|value| (value.clone(), ValueSource::Default))
        })
}
