//! Tests for DTO and DTO list construction

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use serde_json::{Value, json};

use super::*;
use crate::error::{Error, ErrorKind};
use crate::fields;
use crate::value::FieldValue;

static TEST_DTO: Lazy<DtoType> = Lazy::new(|| {
    DtoType::new(
        "TestDTO",
        MappingSpec::from_fields([
            ("string", fields::string()),
            ("withDefault", fields::generic().with_default("default value")),
            (
                "mappedValue",
                fields::generic()
                    .with_default(Value::Null)
                    .with_key("keyOfMappedValue"),
            ),
            (
                "callbackValue",
                fields::generic().with_callback(|raw| {
                    let prefix = raw.get("callbackValue").and_then(Value::as_str).unwrap_or("undefined");
                    Some(json!(format!("{prefix}test")))
                }),
            ),
            (
                "callbackValueUndefined",
                fields::generic().with_default("foo").with_callback(|_| None),
            ),
        ])
        .unwrap(),
    )
});

static LIST_ITEM_DTO: Lazy<DtoType> = Lazy::new(|| {
    DtoType::new(
        "ListItemDTO",
        MappingSpec::from_fields([
            ("string", fields::string()),
            ("withDefault", fields::generic().with_default("default value")),
            (
                "mappedValue",
                fields::generic()
                    .with_default(Value::Null)
                    .with_key("keyOfMappedValue"),
            ),
        ])
        .unwrap(),
    )
});

fn str_field<'a>(dto: &'a crate::Dto, name: &str) -> Option<&'a str> {
    dto.get(name).and_then(FieldValue::as_str)
}

fn three_items() -> Value {
    json!([{ "string": "test" }, { "string": "test2" }, { "string": "test3" }])
}

// Single object construction

#[test]
fn test_empty_mapping_is_rejected() {
    let result = construct_dto(&json!({ "a": 1 }), &MappingSpec::new());
    assert!(matches!(result, Err(Error::Mapping(_))));

    let result = DtoType::base("BaseDTO").construct(&json!({}));
    assert!(matches!(result, Err(Error::Mapping(_))));
}

#[test]
fn test_takes_valid_data() {
    let dto = TEST_DTO.construct(&json!({ "string": "foobar" })).unwrap();
    assert_eq!(str_field(&dto, "string"), Some("foobar"));
}

#[test]
fn test_handles_null_values() {
    let dto = TEST_DTO.construct(&json!({ "string": null })).unwrap();
    assert!(dto.get("string").unwrap().is_null());
}

#[test]
fn test_ignores_superfluous_data() {
    let dto = TEST_DTO
        .construct(&json!({ "string": "foobar", "string2": "foobar" }))
        .unwrap();
    assert!(!dto.contains_key("string2"));
    assert_eq!(
        dto.keys().collect::<Vec<_>>(),
        vec!["string", "withDefault", "mappedValue", "callbackValue", "callbackValueUndefined"]
    );
}

#[test]
fn test_handles_default_values() {
    let dto = TEST_DTO.construct(&json!({ "string": "foobar" })).unwrap();
    assert_eq!(str_field(&dto, "withDefault"), Some("default value"));

    let dto = TEST_DTO
        .construct(&json!({ "string": "foobar", "withDefault": "not default" }))
        .unwrap();
    assert_eq!(str_field(&dto, "withDefault"), Some("not default"));
}

#[test]
fn test_handles_values_with_mapped_keys() {
    let dto = TEST_DTO
        .construct(&json!({ "string": "foobar", "keyOfMappedValue": "test" }))
        .unwrap();
    assert_eq!(str_field(&dto, "mappedValue"), Some("test"));

    let dto = TEST_DTO
        .construct(&json!({ "string": "foobar", "mappedValue": "test" }))
        .unwrap();
    assert!(dto.get("mappedValue").unwrap().is_null());
}

#[test]
fn test_missing_data_names_source_key() {
    let error = TEST_DTO.construct(&json!({ "some": "foobar" })).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MissingProperty);
    assert!(error.to_string().contains("\"string\""));

    let renamed = DtoType::new(
        "RenamedDTO",
        MappingSpec::from_fields([("name", fields::string().with_key("user_name"))]).unwrap(),
    );
    let error = renamed.construct(&json!({ "name": "x" })).unwrap_err();
    assert!(error.to_string().contains("\"user_name\""));
}

#[test]
fn test_non_object_input_is_missing_data() {
    let error = TEST_DTO.construct(&json!([])).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MissingProperty);
}

#[test]
fn test_stores_raw_data() {
    let raw = json!({ "string": "foobar", "string2": "foobar" });
    let dto = TEST_DTO.construct(&raw).unwrap();
    assert_eq!(dto.raw(), &raw);
    assert_eq!(dto.raw().as_object().unwrap().len(), 2);
}

#[test]
fn test_uses_callback_for_init() {
    let dto = TEST_DTO
        .construct(&json!({ "string": "test", "callbackValue": "cbValue" }))
        .unwrap();
    assert_eq!(str_field(&dto, "callbackValue"), Some("cbValuetest"));
}

#[test]
fn test_uses_default_when_callback_has_no_value() {
    let dto = TEST_DTO
        .construct(&json!({ "string": "test", "callbackValueUndefined": "from input" }))
        .unwrap();
    assert_eq!(str_field(&dto, "callbackValueUndefined"), Some("from input"));

    let dto = TEST_DTO.construct(&json!({ "string": "test" })).unwrap();
    assert_eq!(str_field(&dto, "callbackValueUndefined"), Some("foo"));
}

#[test]
fn test_serializes_to_json() {
    let dto = TEST_DTO
        .construct(&json!({ "string": "foobar", "callbackValue": "cbValue" }))
        .unwrap();
    let text = serde_json::to_string(&dto).unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(&text).unwrap(),
        json!({
            "string": "foobar",
            "withDefault": "default value",
            "mappedValue": null,
            "callbackValue": "cbValuetest",
            "callbackValueUndefined": "foo"
        })
    );
}

#[test]
fn test_first_error_wins() {
    let spec = MappingSpec::from_fields([
        ("id", fields::number()),
        ("name", fields::string()),
    ])
    .unwrap();
    let error = construct_dto(&json!({ "id": "nope" }), &spec).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidProperty);
}

#[test]
fn test_nested_dtos_serialize_recursively() {
    let address = DtoType::new(
        "AddressDTO",
        MappingSpec::from_fields([
            ("city", fields::string()),
            ("zip", fields::string().with_key("zipcode")),
        ])
        .unwrap(),
    );
    let user = DtoType::new(
        "UserDTO",
        MappingSpec::from_fields([
            ("id", fields::number()),
            ("address", fields::object_with_dto(&address).unwrap()),
            ("previous", fields::list_with_dto(&address).unwrap().with_default(json!([]))),
            ("company", fields::object_with_dto(&address).unwrap().with_default(Value::Null)),
        ])
        .unwrap(),
    );

    let dto = user
        .construct(&json!({
            "id": 1,
            "address": { "city": "Bern", "zipcode": "3000", "street": "x" },
            "previous": [{ "city": "Basel", "zipcode": "4000" }]
        }))
        .unwrap();

    assert_eq!(
        serde_json::to_value(&dto).unwrap(),
        json!({
            "id": 1,
            "address": { "city": "Bern", "zip": "3000" },
            "previous": [{ "city": "Basel", "zip": "4000" }],
            "company": null
        })
    );

    let error = user
        .construct(&json!({ "id": 1, "address": { "city": "Bern" } }))
        .unwrap_err();
    assert!(error.to_string().contains("\"zipcode\""));
}

// Examples from the mapping contract

#[test]
fn test_example_extra_keys_ignored() {
    let spec = MappingSpec::from_fields([("id", fields::number()), ("name", fields::string())]).unwrap();
    let dto = construct_dto(&json!({ "id": 123, "name": "john_doe", "extra": "x" }), &spec).unwrap();
    assert_eq!(dto.to_plain(), json!({ "id": 123, "name": "john_doe" }));
}

#[test]
fn test_example_missing_required_key() {
    let spec = MappingSpec::from_fields([("id", fields::number())]).unwrap();
    let error = construct_dto(&json!({}), &spec).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MissingProperty);
}

#[test]
fn test_example_date_field() {
    let spec = MappingSpec::from_fields([("when", fields::date())]).unwrap();

    let error = construct_dto(&json!({ "when": true }), &spec).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidProperty);

    let dto = construct_dto(&json!({ "when": "1997-07-16T19:20:30Z" }), &spec).unwrap();
    assert_eq!(
        dto.get("when").and_then(FieldValue::as_date),
        Some(&Utc.with_ymd_and_hms(1997, 7, 16, 19, 20, 30).unwrap())
    );
}

// List construction

#[test]
fn test_list_requires_valid_item_type() {
    let result = construct_dto_list(&json!([]), &DtoType::base("BaseDTO"));
    assert!(matches!(result, Err(Error::InvalidArgument(_))));

    // the item type is checked before the input
    let result = construct_dto_list(&json!({}), &DtoType::base("BaseDTO"));
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_list_handles_data() {
    let list = LIST_ITEM_DTO.list_type().unwrap().construct(&three_items()).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(str_field(&list.items()[0], "string"), Some("test"));
    assert_eq!(str_field(&list.items()[1], "string"), Some("test2"));
    assert_eq!(str_field(&list.items()[2], "string"), Some("test3"));
    assert_eq!(list.raw(), &three_items());
}

#[test]
fn test_list_handles_empty_input() {
    let list = construct_dto_list(&json!([]), &LIST_ITEM_DTO).unwrap();
    assert!(list.is_empty());
}

#[test]
fn test_list_rejects_invalid_data() {
    let error = construct_dto_list(&json!({ "string": "a" }), &LIST_ITEM_DTO).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidProperty);

    let data = json!([{ "string": "test" }, { "notstring": "test2" }, { "string": 3 }]);
    let error = construct_dto_list(&data, &LIST_ITEM_DTO).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MissingProperty);
}

#[test]
fn test_list_map_passes_index() {
    let list = construct_dto_list(&three_items(), &LIST_ITEM_DTO).unwrap();
    let mapped = list.map(|dto, index| format!("{index}:{}", str_field(dto, "string").unwrap()));
    assert_eq!(mapped, vec!["0:test", "1:test2", "2:test3"]);

    let empty = construct_dto_list(&json!([]), &LIST_ITEM_DTO).unwrap();
    assert!(empty.map(|_, index| index).is_empty());
}

#[test]
fn test_list_read_only_helpers() {
    let list = construct_dto_list(&three_items(), &LIST_ITEM_DTO).unwrap();
    let second = list.get(1).unwrap().clone();

    let filtered = list.filter(|dto, _| str_field(dto, "string") != Some("test2"));
    assert_eq!(filtered.len(), 2);

    let joined = list.reduce(String::new(), |acc, dto, _| acc + str_field(dto, "string").unwrap());
    assert_eq!(joined, "testtest2test3");
    let reversed = list.reduce_right(Vec::new(), |mut acc, _, index| {
        acc.push(index);
        acc
    });
    assert_eq!(reversed, vec![2, 1, 0]);

    let mut visited = 0;
    list.for_each(|_, _| visited += 1);
    assert_eq!(visited, 3);

    assert_eq!(list.slice(1, 10).len(), 2);
    assert!(list.slice(5, 2).is_empty());
    assert_eq!(list.concat(list.slice(0, 1)).len(), 4);

    assert!(list.every(|dto, _| dto.contains_key("withDefault")));
    assert!(list.some(|dto, _| str_field(dto, "string") == Some("test3")));
    assert!(!list.some(|dto, _| str_field(dto, "string") == Some("missing")));

    assert_eq!(list.index_of(&second), Some(1));
    assert_eq!(list.last_index_of(&second), Some(1));
    assert_eq!(list.len(), 3);

    let rendered = list.map(|dto, _| dto.to_string());
    assert_eq!(list.join(" | "), rendered.join(" | "));
    assert_eq!(
        list.slice(0, 1)[0].to_string(),
        r#"{"string":"test","withDefault":"default value","mappedValue":null}"#
    );
    assert_eq!(construct_dto_list(&json!([]), &LIST_ITEM_DTO).unwrap().join(","), "");
}

#[test]
fn test_list_is_iterable() {
    let list = construct_dto_list(&three_items(), &LIST_ITEM_DTO).unwrap();
    assert_eq!(list.iter().count(), 3);
    // a fresh iterator starts over
    assert_eq!(list.iter().count(), 3);

    for dto in &list {
        assert!(dto.contains_key("string"));
    }
    assert_eq!(list.into_iter().count(), 3);
}

#[test]
fn test_list_serializes_to_json() {
    let list = construct_dto_list(&three_items(), &LIST_ITEM_DTO).unwrap();
    assert_eq!(
        serde_json::to_value(&list).unwrap(),
        json!([
            { "string": "test", "withDefault": "default value", "mappedValue": null },
            { "string": "test2", "withDefault": "default value", "mappedValue": null },
            { "string": "test3", "withDefault": "default value", "mappedValue": null }
        ])
    );
}

#[test]
fn test_sub_millisecond_dates_round_trip() {
    let spec = MappingSpec::from_fields([("when", fields::date())]).unwrap();
    let dto = construct_dto(&json!({ "when": "1997-07-16T19:20:30.123456Z" }), &spec).unwrap();

    let plain = dto.to_plain();
    assert_eq!(plain, json!({ "when": "1997-07-16T19:20:30.123Z" }));

    let again = construct_dto(&plain, &spec).unwrap();
    assert_eq!(again, dto);
}

// Properties

/// Millisecond timestamps, or RFC 3339 strings with up to nanosecond fractions
fn created_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0i64..4_000_000_000_000).prop_map(Value::from),
        (0i64..4_000_000_000, 0u32..1_000_000_000).prop_map(|(seconds, nanos)| {
            let date = DateTime::from_timestamp(seconds, nanos).unwrap();
            Value::from(date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }),
    ]
}

proptest! {
    #[test]
    fn prop_list_preserves_order_and_length(names in proptest::collection::vec("[a-z]{0,8}", 0..16)) {
        let raw = Value::Array(names.iter().map(|name| json!({ "string": name })).collect());
        let list = construct_dto_list(&raw, &LIST_ITEM_DTO).unwrap();

        prop_assert_eq!(list.len(), names.len());
        for (index, name) in names.iter().enumerate() {
            prop_assert_eq!(str_field(&list.items()[index], "string"), Some(name.as_str()));
            prop_assert_eq!(&list.items()[index], &LIST_ITEM_DTO.construct(&raw[index]).unwrap());
        }
    }

    #[test]
    fn prop_plain_form_round_trips(
        id in any::<i64>(),
        name in proptest::option::of("[ -~]{0,16}"),
        active in any::<bool>(),
        created in created_value(),
    ) {
        let spec = MappingSpec::from_fields([
            ("id", fields::number()),
            ("name", fields::string()),
            ("active", fields::boolean().with_key("is_active")),
            ("created", fields::date()),
        ])
        .unwrap();
        let raw = json!({
            "id": id,
            "name": name,
            "is_active": active,
            "created": created,
        });

        let dto = construct_dto(&raw, &spec).unwrap();
        prop_assert_eq!(dto.keys().collect::<Vec<_>>(), vec!["id", "name", "active", "created"]);

        // the plain form maps "active" under its own name, so rename for the second pass
        let mut plain = dto.to_plain();
        let active_value = plain.as_object_mut().unwrap().remove("active").unwrap();
        plain.as_object_mut().unwrap().insert("is_active".to_string(), active_value);

        let again = construct_dto(&plain, &spec).unwrap();
        prop_assert_eq!(again, dto);
    }

    #[test]
    fn prop_wrong_primitive_is_invalid(value in prop_oneof![
        any::<bool>().prop_map(Value::from),
        "[a-z]{1,8}".prop_map(Value::from),
        Just(json!([1, 2])),
        Just(json!({ "nested": true })),
    ]) {
        let spec = MappingSpec::from_fields([("count", fields::number())]).unwrap();
        let error = construct_dto(&json!({ "count": value }), &spec).unwrap_err();
        prop_assert_eq!(error.kind(), ErrorKind::InvalidProperty);
    }
}
