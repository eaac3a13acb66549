//! Mapping specs and the DTO types built from them

use std::sync::Arc;

use serde_json::Value;

use super::engine::construct_dto;
use super::list::DtoListType;
use crate::constants::{ANONYMOUS_DTO_NAME, MSG_DTO_TYPE_REQUIRED, MSG_FIELD_NAME_REQUIRED};
use crate::error::{Error, Result};
use crate::fields::FieldDescriptor;
use crate::value::Dto;

/// Ordered table of output field name to field descriptor
///
/// Re-registering a name replaces its descriptor but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct MappingSpec {
    fields: Vec<(String, FieldDescriptor)>,
}

impl MappingSpec {
    /// An empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a spec from `(name, descriptor)` pairs, in iteration order
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any name is empty.
    pub fn from_fields<I, N>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, FieldDescriptor)>,
        N: Into<String>,
    {
        let mut spec = Self::new();
        for (name, descriptor) in fields {
            spec.insert(name, descriptor)?;
        }
        Ok(spec)
    }

    /// Registers one field
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is empty.
    pub fn insert(&mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidArgument(MSG_FIELD_NAME_REQUIRED.to_string()));
        }

        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = descriptor,
            None => self.fields.push((name, descriptor)),
        }
        Ok(())
    }

    /// Returns a new spec holding this spec's fields merged with `overrides`
    #[must_use]
    pub fn extend(&self, overrides: &Self) -> Self {
        let mut merged = self.clone();
        for (name, descriptor) in &overrides.fields {
            match merged.fields.iter_mut().find(|(existing, _)| *existing == *name) {
                Some((_, slot)) => *slot = descriptor.clone(),
                None => merged.fields.push((name.clone(), descriptor.clone())),
            }
        }
        merged
    }

    /// Looks up the descriptor of a field
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, descriptor)| descriptor)
    }

    /// Field names, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Fields and their descriptors, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    /// Number of declared fields
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are declared
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A named, immutable DTO shape
///
/// This is what nested fields and list types bind to. A type is only usable as a nested shape once
/// it declares at least one field.
#[derive(Debug, Clone)]
pub struct DtoType {
    name: Arc<str>,
    spec: Arc<MappingSpec>,
}

impl DtoType {
    /// A type with the given name and mapping
    pub fn new(name: impl Into<String>, spec: MappingSpec) -> Self {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            spec: Arc::new(spec),
        }
    }

    /// A type that declares no fields yet, to be grown with [`DtoType::field`]
    pub fn base(name: impl Into<String>) -> Self {
        Self::new(name, MappingSpec::new())
    }

    /// The type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The mapping this type constructs with
    pub fn mapping(&self) -> &MappingSpec {
        &self.spec
    }

    /// Returns `true` if the type declares at least one field
    pub fn is_valid(&self) -> bool {
        !self.spec.is_empty()
    }

    pub(crate) fn ensure_valid(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!(
                "{MSG_DTO_TYPE_REQUIRED}: \"{}\" declares no fields",
                self.name
            )))
        }
    }

    /// Constructs one DTO of this type from raw input
    ///
    /// # Errors
    ///
    /// See [`construct_dto`].
    pub fn construct(&self, raw: &Value) -> Result<Dto> {
        construct_dto(raw, &self.spec)
    }

    /// Derives a new type
    ///
    /// A non-empty `overrides` becomes the new type's whole mapping; otherwise the parent's
    /// mapping is copied.
    #[must_use]
    pub fn inherit(&self, name: impl Into<String>, overrides: Option<MappingSpec>) -> Self {
        let name: String = name.into();
        let spec = match overrides {
            Some(spec) if !spec.is_empty() => Arc::new(spec),
            _ => Arc::clone(&self.spec),
        };
        Self {
            name: Arc::from(name),
            spec,
        }
    }

    /// Returns a copy of this type with one more field registered
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is empty.
    pub fn field(&self, name: impl Into<String>, descriptor: FieldDescriptor) -> Result<Self> {
        let mut spec = MappingSpec::clone(&self.spec);
        spec.insert(name, descriptor)?;
        Ok(Self {
            name: Arc::clone(&self.name),
            spec: Arc::new(spec),
        })
    }

    /// A list type constructing every array element as this type
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if this type declares no fields.
    pub fn list_type(&self) -> Result<DtoListType> {
        DtoListType::new(self)
    }
}

impl From<MappingSpec> for DtoType {
    fn from(spec: MappingSpec) -> Self {
        Self::new(ANONYMOUS_DTO_NAME, spec)
    }
}
