//! List construction and the read-only sequence it produces

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use super::spec::DtoType;
use crate::constants::MSG_ARRAY_REQUIRED;
use crate::error::{Error, Result};
use crate::value::Dto;

/// Constructs every element of `raw` as an `item_type` DTO
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if `item_type` declares no fields
/// - [`Error::InvalidProperty`] if `raw` is not an array
/// - the error of the first element that fails, unchanged
pub fn construct_dto_list(raw: &Value, item_type: &DtoType) -> Result<DtoList> {
    item_type.ensure_valid()?;
    let items = construct_items(raw, item_type)?;
    Ok(DtoList {
        items,
        raw: raw.clone(),
    })
}

/// Positional construction shared by list types and `list_with_dto` fields
pub(crate) fn construct_items(raw: &Value, item_type: &DtoType) -> Result<Vec<Dto>> {
    let Some(elements) = raw.as_array() else {
        return Err(Error::InvalidProperty(MSG_ARRAY_REQUIRED.to_string()));
    };

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            item_type.construct(element).inspect_err(|e| {
                debug!("{} item {} failed: {}", item_type.name(), index, e);
            })
        })
        .collect()
}

/// A list shape bound to one item type
#[derive(Debug, Clone)]
pub struct DtoListType {
    item_type: DtoType,
}

impl DtoListType {
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

    /// The bound item type
    pub const fn item_type(&self) -> &DtoType {
        &self.item_type
    }

    /// Constructs a list from a raw array
    ///
    /// # Errors
    ///
    /// See [`construct_dto_list`].
    pub fn construct(&self, raw: &Value) -> Result<DtoList> {
        construct_dto_list(raw, &self.item_type)
    }
}

/// An ordered, read-only sequence of DTOs built from one raw array
///
/// The helpers mirror the usual array operations and never mutate the items. Callbacks that
/// take an index receive the item's position in this list.
#[derive(Debug, Clone)]
pub struct DtoList {
    items: Vec<Dto>,
    raw:   Value,
}

impl DtoList {
    /// Number of items
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list holds no items
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`
    pub fn get(&self, index: usize) -> Option<&Dto> {
        self.items.get(index)
    }

    /// All items, in input order
    pub fn items(&self) -> &[Dto] {
        &self.items
    }

    /// Consumes the list, returning its items
    pub fn into_items(self) -> Vec<Dto> {
        self.items
    }

    /// The untouched array this list was constructed from
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    /// A fresh forward iterator over the items
    pub fn iter(&self) -> std::slice::Iter<'_, Dto> {
        self.items.iter()
    }

    /// Maps every item, passing its index
    pub fn map<T, F>(&self, mut f: F) -> Vec<T>
    where
        F: FnMut(&Dto, usize) -> T,
    {
        self.iter().enumerate().map(|(index, dto)| f(dto, index)).collect()
    }

    /// Items for which `predicate` holds
    pub fn filter<F>(&self, mut predicate: F) -> Vec<&Dto>
    where
        F: FnMut(&Dto, usize) -> bool,
    {
        self.iter()
            .enumerate()
            .filter(|(index, dto)| predicate(*dto, *index))
            .map(|(_, dto)| dto)
            .collect()
    }

    /// Folds the items front to back
    pub fn reduce<T, F>(&self, initial: T, mut f: F) -> T
    where
        F: FnMut(T, &Dto, usize) -> T,
    {
        self.iter()
            .enumerate()
            .fold(initial, |acc, (index, dto)| f(acc, dto, index))
    }

    /// Folds the items back to front
    pub fn reduce_right<T, F>(&self, initial: T, mut f: F) -> T
    where
        F: FnMut(T, &Dto, usize) -> T,
    {
        self.iter()
            .enumerate()
            .rev()
            .fold(initial, |acc, (index, dto)| f(acc, dto, index))
    }

    /// Calls `f` for every item
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Dto, usize),
    {
        for (index, dto) in self.iter().enumerate() {
            f(dto, index);
        }
    }

    /// Items in `start..end`, clamped to the list bounds
    pub fn slice(&self, start: usize, end: usize) -> &[Dto] {
        let end = end.min(self.items.len());
        let start = start.min(end);
        &self.items[start..end]
    }

    /// Renders every item as compact JSON, separated by `separator`
    pub fn join(&self, separator: &str) -> String {
        self.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// A new vector holding these items followed by `others`
    pub fn concat(&self, others: &[Dto]) -> Vec<Dto> {
        self.items.iter().chain(others).cloned().collect()
    }

    /// Returns `true` if `predicate` holds for every item
    pub fn every<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Dto, usize) -> bool,
    {
        self.iter()
            .enumerate()
            .all(|(index, dto)| predicate(dto, index))
    }

    /// Returns `true` if `predicate` holds for any item
    pub fn some<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Dto, usize) -> bool,
    {
        self.iter()
            .enumerate()
            .any(|(index, dto)| predicate(dto, index))
    }

    /// Position of the first item equal to `dto`
    pub fn index_of(&self, dto: &Dto) -> Option<usize> {
        self.iter().position(|item| item == dto)
    }

    /// Position of the last item equal to `dto`
    pub fn last_index_of(&self, dto: &Dto) -> Option<usize> {
        self.iter().rposition(|item| item == dto)
    }
}

// Equality covers the items only, the raw trace is excluded
impl PartialEq for DtoList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<'a> IntoIterator for &'a DtoList {
    type Item = &'a Dto;
    type IntoIter = std::slice::Iter<'a, Dto>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for DtoList {
    type Item = Dto;
    type IntoIter = std::vec::IntoIter<Dto>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// Serializes as the plain sequence of items, the raw trace is skipped
impl Serialize for DtoList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}
