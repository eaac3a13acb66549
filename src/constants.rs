// This file contains constants shared by the field descriptors and the mapping engine

// Error messages
pub const MSG_MAPPING_REQUIRED: &str = "Mapping required";
pub const MSG_DTO_TYPE_REQUIRED: &str = "Valid DTO type required";
pub const MSG_FIELD_NAME_REQUIRED: &str = "Field name required";
pub const MSG_STRING_REQUIRED: &str = "Property of type string required";
pub const MSG_BOOLEAN_REQUIRED: &str = "Property of type boolean required";
pub const MSG_NUMBER_REQUIRED: &str = "Property of type number required";
pub const MSG_ARRAY_REQUIRED: &str = "Property of type array required";
pub const MSG_DATE_REQUIRED: &str = "Property cannot be converted to a date";

// Field kind names, reported by `FieldCoercion::kind`
pub const KIND_GENERIC: &str = "generic";
pub const KIND_STRING: &str = "string";
pub const KIND_BOOLEAN: &str = "boolean";
pub const KIND_NUMBER: &str = "number";
pub const KIND_DATE: &str = "date";
pub const KIND_LIST: &str = "list";
pub const KIND_LIST_WITH_DTO: &str = "listWithDTO";
pub const KIND_OBJECT_WITH_DTO: &str = "objectWithDTO";

// Date parsing, tried in order after RFC 3339 and RFC 2822
pub const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";
pub const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// Name given to types built directly from a spec
pub const ANONYMOUS_DTO_NAME: &str = "AnonymousDTO";
