//! Sink row tests

use super::*;
use crate::catalog::{self, TimeUnit};
use crate::decode::{Decoder, Record};
use chrono::NaiveDateTime;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn decode(schema: &str, raw: Value) -> Record {
    Decoder::new(catalog::registry().unwrap())
        .decode(schema, &raw)
        .unwrap()
        .value
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn hourly_energy() -> Record {
    decode(
        "EnergyData",
        json!({
            "timeUnit": "HOUR",
            "unit": "Wh",
            "values": [
                {"date": "2024-01-15 09:00:00", "value": 512.25},
                {"date": "2024-01-15 10:00:00", "value": null}
            ]
        }),
    )
}

#[test]
fn test_row_time_truncated_to_minute() {
    let row = Row::new("m", at("2024-01-15 09:41:37"));
    assert_eq!(row.time_string(), "2024-01-15T09:41Z");
    assert_eq!(row.time, at("2024-01-15 09:41:00"));
}

#[test]
fn test_hourly_energy_rows() {
    let rows = energy_rows("1234", TimeUnit::Hour, "hourly_energy_generated", &hourly_energy());
    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    assert_eq!(first.measurement, "hourly_energy_generated");
    assert_eq!(first.time_string(), "2024-01-15T09:00Z");
    assert_eq!(first.tags.get(SITE_TAG).map(String::as_str), Some("1234"));
    assert_eq!(first.fields.get("generated"), Some(&FieldValue::Float(512.25)));
    assert_eq!(first.fields.get("month"), Some(&FieldValue::Text("Jan 2024".into())));
    assert_eq!(first.fields.get("hour"), Some(&FieldValue::Integer(9)));

    assert_eq!(rows[1].fields.get("generated"), Some(&FieldValue::Float(0.0)));
    assert_eq!(rows[1].fields.get("hour"), Some(&FieldValue::Integer(10)));
}

#[test]
fn test_daily_energy_rows_have_no_hour() {
    let rows = energy_rows("1234", TimeUnit::Day, "daily_energy_generated", &hourly_energy());
    assert!(rows.iter().all(|row| !row.fields.contains_key("hour")));
}

#[test]
fn test_telemetry_rows() {
    let samples = vec![
        decode(
            "Telemetry",
            json!({
                "date": "2024-02-01 12:05:00",
                "totalActivePower": 2900.0,
                "totalEnergy": 1.0e6,
                "temperature": 44.5,
                "inverterMode": "MPPT",
                "operationMode": 1,
                "dcVoltage": 381.2,
                "L1Data": {"acCurrent": 12.3, "acVoltage": 239.1, "acFrequency": 50.0}
            }),
        ),
        decode(
            "Telemetry",
            json!({
                "date": "2024-02-01 12:10:00",
                "totalActivePower": 0,
                "totalEnergy": 1.0e6,
                "temperature": 30,
                "inverterMode": "SLEEPING",
                "operationMode": 1
            }),
        ),
    ];

    let rows = telemetry_rows("77", &samples);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].measurement, TELEMETRY_MEASUREMENT);
    assert_eq!(rows[0].fields.get("dcvoltage"), Some(&FieldValue::Float(381.2)));
    assert_eq!(rows[0].fields.get("acvoltage"), Some(&FieldValue::Float(239.1)));
    assert_eq!(rows[0].fields.get("month"), Some(&FieldValue::Text("Feb 2024".into())));

    assert_eq!(rows[1].fields.get("dcvoltage"), Some(&FieldValue::Float(0.0)));
    assert_eq!(rows[1].fields.get("temperature"), Some(&FieldValue::Float(30.0)));
    assert!(!rows[1].fields.contains_key("accurrent"));
}

#[test]
fn test_json_lines_sink() {
    let row = Row::new("daily", at("2024-01-01 00:00:00"))
        .tag(SITE_TAG, "1")
        .field("generated", 1234.5)
        .field("hour", 0_i64);

    let mut sink = JsonLinesSink::new(Vec::new());
    sink.write(&[row.clone(), row]).unwrap();
    let output = String::from_utf8(sink.into_inner()).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    let parsed: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(
        parsed,
        json!({
            "measurement": "daily",
            "time": "2024-01-01T00:00Z",
            "tags": {"site_number": "1"},
            "fields": {"generated": 1234.5, "hour": 0}
        })
    );
}

#[test]
fn test_line_protocol() {
    let row = Row::new("inverter telemetry", at("2024-01-01 00:01:00"))
        .tag("site number", "a,b")
        .field("temperature", 41.5)
        .field("count", 3_i64)
        .field("month", "Jan \"24\"")
        .field("ok", true);

    assert_eq!(
        to_line(&row).unwrap().unwrap(),
        "inverter\\ telemetry,site\\ number=a\\,b \
         count=3i,month=\"Jan \\\"24\\\"\",ok=true,temperature=41.5 \
         1704067260000000000"
    );
}

#[test]
fn test_line_protocol_sink_skips_empty_rows() {
    let rows = vec![
        Row::new("empty", at("2024-01-01 00:00:00")),
        Row::new("full", at("2024-01-01 00:00:00")).field("v", 1.0),
    ];
    let mut sink = LineProtocolSink::new(Vec::new());
    sink.write(&rows).unwrap();
    let output = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(output, "full v=1 1704067200000000000\n");
}
