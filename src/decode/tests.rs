//! Decoder tests

use super::*;
use crate::catalog;
use crate::error::Error;
use crate::schema::{
    DefaultValue, EnumDescriptor, EnumVariant, FieldDescriptor, Registry, SchemaDescriptor,
    TypeTag,
};
use crate::temporal::Temporal;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

const STATE: EnumDescriptor = EnumDescriptor {
    id: "State",
    variants: &[
        EnumVariant::text("ACTIVE", "Active"),
        EnumVariant::text("PENDING", "Pending"),
    ],
};

const MODE: EnumDescriptor = EnumDescriptor {
    id: "Mode",
    variants: &[EnumVariant::int("ON", 1), EnumVariant::int("OFF", 0)],
};

static SCHEMAS: &[SchemaDescriptor] = &[
    SchemaDescriptor {
        id: "Point",
        fields: &[
            FieldDescriptor::required("at", TypeTag::DATETIME),
            FieldDescriptor::defaulted("reading", TypeTag::FLOAT, DefaultValue::Float(0.0)),
        ],
    },
    SchemaDescriptor {
        id: "Device",
        fields: &[
            FieldDescriptor::required("id", TypeTag::INTEGER),
            FieldDescriptor::required("label", TypeTag::STRING),
            FieldDescriptor::optional("state", TypeTag::Enum("State")),
            FieldDescriptor::optional("mode", TypeTag::Enum("Mode")),
            FieldDescriptor::optional("enabled", TypeTag::BOOLEAN),
            FieldDescriptor::optional("installed", TypeTag::DATE),
            FieldDescriptor::optional("points", TypeTag::Sequence(&TypeTag::Record("Point"))),
            FieldDescriptor::optional("latest", TypeTag::Record("Point")),
            FieldDescriptor::optional(
                "byState",
                TypeTag::Mapping(&TypeTag::Enum("State"), &TypeTag::FLOAT),
            ),
            FieldDescriptor::optional(
                "labels",
                TypeTag::Mapping(&TypeTag::STRING, &TypeTag::STRING),
            ),
        ],
    },
];

static ENUMS: &[EnumDescriptor] = &[STATE, MODE];

fn registry() -> Registry {
    Registry::new(SCHEMAS, ENUMS, &[]).unwrap()
}

fn decode(raw: Value) -> crate::error::Result<Decoded<Record>> {
    Decoder::new(&registry()).decode("Device", &raw)
}

fn midnight(y: i32, m: u32, d: u32) -> Temporal {
    Temporal::DateTime(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap())
}

// ============================================================================
// Enums
// ============================================================================

#[test_case(json!("ACTIVE"), "ACTIVE" ; "text by name")]
#[test_case(json!("Active"), "ACTIVE" ; "text by value")]
#[test_case(json!("PENDING"), "PENDING" ; "second variant by name")]
#[test_case(json!("Pending"), "PENDING" ; "second variant by value")]
fn test_text_enum_lookup(raw: Value, expected: &str) {
    let decoded = decode(json!({"id": 1, "label": "a", "state": raw})).unwrap();
    assert_eq!(
        decoded.value.enumeration("state").and_then(EnumValue::name),
        Some(expected)
    );
    assert!(decoded.report.is_clean());
}

#[test_case(json!("ON"), "ON" ; "int by name")]
#[test_case(json!(1), "ON" ; "int by value")]
#[test_case(json!(0), "OFF" ; "zero by value")]
#[test_case(json!("0"), "OFF" ; "quoted int by value")]
fn test_int_enum_lookup(raw: Value, expected: &str) {
    let decoded = decode(json!({"id": 1, "label": "a", "mode": raw})).unwrap();
    assert_eq!(
        decoded.value.enumeration("mode").and_then(EnumValue::name),
        Some(expected)
    );
}

#[test]
fn test_unknown_enum_keeps_siblings() {
    let decoded = decode(json!({
        "id": 7,
        "label": "roof",
        "state": "Decommissioned",
        "enabled": true
    }))
    .unwrap();

    let record = decoded.value;
    assert_eq!(
        record.enumeration("state"),
        Some(&EnumValue::Unknown(json!("Decommissioned")))
    );
    assert_eq!(record.integer("id"), Some(7));
    assert_eq!(record.str("label"), Some("roof"));
    assert_eq!(record.boolean("enabled"), Some(true));

    assert_eq!(
        decoded.report.unknown_enums,
        vec![UnknownEnum {
            path: "state".to_string(),
            enumeration: "State",
            raw: json!("Decommissioned"),
        }]
    );
}

#[test]
fn test_unknown_enum_of_wrong_kind() {
    let decoded = decode(json!({"id": 1, "label": "a", "mode": true})).unwrap();
    assert!(decoded.value.enumeration("mode").unwrap().is_unknown());
}

// ============================================================================
// Records and sequences
// ============================================================================

#[test]
fn test_decode_is_idempotent() {
    let raw = json!({
        "id": 3,
        "label": "garage",
        "points": [{"at": "2024-01-01 00:00:00", "reading": 1.5}],
        "latest": {"at": "2024-01-01 00:15:00", "reading": 2}
    });
    let first = decode(raw.clone()).unwrap();
    let second = decode(raw).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_sequence_preserves_length_and_order() {
    let points: Vec<Value> = (1..=5)
        .map(|day| json!({"at": format!("2024-01-0{day}"), "reading": day}))
        .collect();
    let decoded = decode(json!({"id": 1, "label": "a", "points": points})).unwrap();

    let readings: Vec<f64> = decoded
        .value
        .records("points")
        .iter()
        .filter_map(|p| p.float("reading"))
        .collect();
    assert_eq!(readings, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(
        decoded.value.records("points")[4].temporal("at"),
        Some(&midnight(2024, 1, 5))
    );
}

#[test]
fn test_empty_sequence_is_set() {
    let decoded = decode(json!({"id": 1, "label": "a", "points": []})).unwrap();
    assert!(decoded.value.is_set("points"));
    assert!(decoded.value.records("points").is_empty());
}

#[test]
fn test_optional_null_stays_unset() {
    let decoded = decode(json!({"id": 1, "label": "a", "latest": null, "state": null})).unwrap();
    assert!(!decoded.value.is_set("latest"));
    assert!(!decoded.value.is_set("state"));
    assert_eq!(decoded.value.len(), 2);
}

#[test]
fn test_null_reading_defaults_to_zero() {
    let decoded = decode(json!({
        "id": 1,
        "label": "a",
        "latest": {"at": "2024-02-01 12:00:00", "reading": null}
    }))
    .unwrap();
    assert_eq!(decoded.value.record("latest").and_then(|p| p.float("reading")), Some(0.0));
}

#[test]
fn test_integer_accepts_whole_float() {
    let decoded = decode(json!({"id": 42.0, "label": "a"})).unwrap();
    assert_eq!(decoded.value.integer("id"), Some(42));
}

// ============================================================================
// Failures
// ============================================================================

#[test_case(json!({"id": "1", "label": "a"}), "id" ; "string for integer")]
#[test_case(json!({"id": 1.5, "label": "a"}), "id" ; "fractional integer")]
#[test_case(json!({"id": 9_223_372_036_854_775_808_u64, "label": "a"}), "id" ; "integer above i64 range")]
#[test_case(json!({"id": 1e19, "label": "a"}), "id" ; "whole float above i64 range")]
#[test_case(json!({"id": 1, "label": 5}), "label" ; "number for string")]
#[test_case(json!({"id": 1, "label": "a", "enabled": "yes"}), "enabled" ; "string for boolean")]
#[test_case(json!({"id": 1, "label": "a", "points": {}}), "points" ; "object for sequence")]
#[test_case(json!({"id": 1, "label": "a", "points": [{"at": 5}]}), "points[0].at" ; "number for datetime")]
#[test_case(json!({"id": 1, "label": "a", "installed": "soon"}), "installed" ; "bad date")]
#[test_case(json!({"id": 1, "label": "a", "latest": []}), "latest" ; "array for record")]
fn test_kind_mismatch_is_fatal(raw: Value, expected_path: &str) {
    match decode(raw) {
        Err(Error::Decode { path, .. }) => assert_eq!(path, expected_path),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn test_missing_required_field() {
    let err = decode(json!({"id": 1})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to decode 'label': required string is missing or null"
    );
}

#[test]
fn test_missing_required_nested_record() {
    let err = decode(json!({"id": 1, "label": "a", "points": [{"reading": 1.0}]})).unwrap_err();
    assert!(matches!(err, Error::Decode { ref path, .. } if path == "points[0].at"));
}

#[test]
fn test_root_mismatch_path() {
    let err = decode(json!([1, 2])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to decode '$': expected record Device, found array"
    );
}

// ============================================================================
// Reporting
// ============================================================================

#[test]
fn test_unexpected_fields_are_reported() {
    let decoded = decode(json!({
        "id": 1,
        "label": "a",
        "firmware": "3.2",
        "latest": {"at": "2024-01-01", "quality": "good"}
    }))
    .unwrap();
    assert_eq!(
        decoded.report.unexpected_fields,
        vec!["latest.quality".to_string(), "firmware".to_string()]
    );
    assert_eq!(decoded.value.str("label"), Some("a"));
}

#[test]
fn test_mapping_with_enum_keys() {
    let decoded = decode(json!({
        "id": 1,
        "label": "a",
        "byState": {"ACTIVE": 3.5, "RETIRED": 1.0},
        "labels": {"north": "N"}
    }))
    .unwrap();

    let entries = decoded.value.get("byState").and_then(TypedValue::as_mapping).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].0,
        MapKey::Enum(EnumValue::Known {
            enumeration: "State",
            name: "ACTIVE",
            value: crate::schema::Literal::Str("Active"),
        })
    );
    assert_eq!(entries[0].1, TypedValue::Float(3.5));
    assert_eq!(entries[1].0, MapKey::Enum(EnumValue::Unknown(json!("RETIRED"))));
    assert_eq!(decoded.report.unknown_enums.len(), 1);

    let labels = decoded.value.get("labels").and_then(TypedValue::as_mapping).unwrap();
    assert_eq!(labels[0].0, MapKey::Text("north".to_string()));
}

#[test]
fn test_unknown_mapping_keys_stay_distinct() {
    let decoded = decode(json!({
        "id": 1,
        "label": "a",
        "byState": {"X": 1.0, "Y": 2.0}
    }))
    .unwrap();

    let entries = decoded.value.get("byState").and_then(TypedValue::as_mapping).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].0.to_string(), "Y");
    assert_eq!(decoded.report.unknown_enums.len(), 2);
    assert!(decoded.report.key_collisions.is_empty());
}

#[test]
fn test_to_json_renders_names_and_iso_dates() {
    let decoded = decode(json!({
        "id": 9,
        "label": "a",
        "state": "Active",
        "latest": {"at": "2024-01-01 06:30:00", "reading": 4},
        "points": [{"at": "2024-01-01 06:30:15.750", "reading": 1.5}]
    }))
    .unwrap();
    assert_eq!(
        decoded.value.to_json(),
        json!({
            "id": 9,
            "label": "a",
            "state": "ACTIVE",
            "latest": {"at": "2024-01-01T06:30:00", "reading": 4.0},
            "points": [{"at": "2024-01-01T06:30:15.750", "reading": 1.5}]
        })
    );
}

// ============================================================================
// Catalogue scenario
// ============================================================================

#[test]
fn test_energy_response() {
    let registry = catalog::registry().unwrap();
    let raw = json!({"energy": {
        "timeUnit": "DAY",
        "unit": "Wh",
        "measuredBy": "INVERTER",
        "values": [
            {"date": "2024-01-01 00:00:00", "value": 1234.5},
            {"date": "2024-01-02 00:00:00", "value": null}
        ]
    }});

    let mut decoded = Decoder::new(registry).decode("EnergyResponse", &raw).unwrap();
    assert!(decoded.report.is_clean());

    let Some(TypedValue::Record(energy)) = decoded.value.take("energy") else {
        panic!("energy envelope missing");
    };
    assert_eq!(
        energy.enumeration("timeUnit").and_then(EnumValue::name),
        Some("DAY")
    );
    assert_eq!(energy.enumeration("unit").and_then(EnumValue::name), Some("WATT_HOUR"));

    let values = energy.records("values");
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].float("value"), Some(1234.5));
    assert_eq!(values[1].float("value"), Some(0.0));
    assert_eq!(values[0].temporal("date"), Some(&midnight(2024, 1, 1)));
    assert_eq!(values[1].temporal("date"), Some(&midnight(2024, 1, 2)));
}
