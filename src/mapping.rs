//! Mapping engine
//!
//! Applies a [`MappingSpec`] to raw JSON input, producing a validated [`crate::Dto`], and applies a
//! [`DtoType`] across an array, producing a [`DtoList`].

mod engine;
mod list;
mod spec;

pub use self::engine::construct_dto;
pub(crate) use self::list::construct_items;
pub use self::list::{DtoList, DtoListType, construct_dto_list};
pub use self::spec::{DtoType, MappingSpec};

#[cfg(test)]
mod tests;
