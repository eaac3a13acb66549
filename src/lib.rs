//! Declarative mapping of loosely-typed JSON into validated data-transfer objects
//!
//! A [`MappingSpec`] names the fields of a DTO and the [`FieldDescriptor`] that validates each of
//! them. [`construct_dto`] applies a spec to raw input such as an HTTP response body, resolving
//! key renames, callbacks and defaults, and returns a [`Dto`] holding exactly the declared fields.
//! [`construct_dto_list`] does the same for every element of an array.
//!
//! ```
//! use dtomap::{DtoType, ErrorKind, MappingSpec, fields};
//! use serde_json::json;
//!
//! # fn main() -> dtomap::Result<()> {
//! let user = DtoType::new(
//!     "UserDTO",
//!     MappingSpec::from_fields([
//!         ("id", fields::number()),
//!         ("name", fields::string()),
//!         ("roles", fields::list().with_default(json!([])).with_key("groups")),
//!         ("validated", fields::boolean().with_default(false)),
//!         ("dateCreated", fields::date()),
//!     ])?,
//! );
//!
//! let dto = user.construct(&json!({
//!     "id": 123,
//!     "name": "john_doe",
//!     "groups": ["administrator"],
//!     "dateCreated": "1997-07-16T19:20:30Z",
//!     "extra": "ignored"
//! }))?;
//!
//! assert_eq!(dto.get("name").and_then(|v| v.as_str()), Some("john_doe"));
//! assert_eq!(
//!     dto.to_plain(),
//!     json!({
//!         "id": 123,
//!         "name": "john_doe",
//!         "roles": ["administrator"],
//!         "validated": false,
//!         "dateCreated": "1997-07-16T19:20:30.000Z"
//!     })
//! );
//!
//! let missing = user.construct(&json!({ "name": "jane_doe" })).unwrap_err();
//! assert_eq!(missing.kind(), ErrorKind::MissingProperty);
//! # Ok(())
//! # }
//! ```

mod constants;
mod error;
pub mod fields;
mod mapping;
mod value;

pub use self::error::{Error, ErrorKind, Result};
pub use self::fields::{Callback, FieldCoercion, FieldDescriptor, FieldOptions};
pub use self::mapping::{
    DtoList, DtoListType, DtoType, MappingSpec, construct_dto, construct_dto_list,
};
pub use self::value::{Dto, FieldValue};
