//! Generic recursive decoder
//!
//! Walks a raw JSON value alongside a type tag. Shape mismatches abort the
//! whole decode; unknown enum values, unexpected keys and mapping-key
//! collisions are recorded in the [`DecodeReport`] and logged.

use super::types::{DecodeReport, Decoded, EnumValue, MapKey, Record, TypedValue, UnknownEnum};
use crate::error::{Error, Result};
use crate::schema::{
    DefaultValue, EnumDescriptor, Presence, PrimitiveKind, Registry, SchemaDescriptor, TypeTag,
};
use crate::temporal::{self, TemporalKind};
use serde_json::{Map, Value};
use tracing::warn;

/// Schema-driven decoder over a validated registry
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'r> {
    registry: &'r Registry,
}

impl<'r> Decoder<'r> {
    /// Create a decoder for the given registry
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Decode `raw` as an instance of the schema `schema_id`
    pub fn decode(&self, schema_id: &str, raw: &Value) -> Result<Decoded<Record>> {
        let schema = self.schema(schema_id, "")?;
        let mut report = DecodeReport::default();
        let value = self.decode_record(schema, raw, "", &mut report)?;
        Ok(Decoded { value, report })
    }

    /// Decode `raw` against an arbitrary type tag
    pub fn decode_value(&self, tag: &TypeTag, raw: &Value) -> Result<Decoded<TypedValue>> {
        let mut report = DecodeReport::default();
        let value = self.decode_tag(tag, raw, "", &mut report)?;
        Ok(Decoded { value, report })
    }

    fn schema(&self, id: &str, path: &str) -> Result<&'static SchemaDescriptor> {
        self.registry
            .schema(id)
            .ok_or_else(|| Error::decode(display_path(path), format!("unknown schema '{id}'")))
    }

    fn enumeration(&self, id: &str, path: &str) -> Result<&'static EnumDescriptor> {
        self.registry
            .enumeration(id)
            .ok_or_else(|| Error::decode(display_path(path), format!("unknown enum '{id}'")))
    }

    fn decode_record(
        &self,
        schema: &'static SchemaDescriptor,
        raw: &Value,
        path: &str,
        report: &mut DecodeReport,
    ) -> Result<Record> {
        let Value::Object(object) = raw else {
            return Err(mismatch(path, &format!("record {}", schema.id), raw));
        };

        let mut fields = Vec::with_capacity(schema.fields.len());
        for field in schema.fields {
            let field_path = child_path(path, field.name);
            match object.get(field.name) {
                None | Some(Value::Null) => match field.presence {
                    Presence::Required => {
                        return Err(Error::decode(
                            field_path,
                            format!("required {} is missing or null", field.tag),
                        ));
                    }
                    Presence::Optional => {}
                    Presence::Default(default) => fields.push((field.name, default_value(default))),
                },
                Some(value) => {
                    let decoded = self.decode_tag(&field.tag, value, &field_path, report)?;
                    fields.push((field.name, decoded));
                }
            }
        }

        self.report_unexpected(schema, object, path, report);
        Ok(Record::new(schema.id, fields))
    }

    fn report_unexpected(
        &self,
        schema: &SchemaDescriptor,
        object: &Map<String, Value>,
        path: &str,
        report: &mut DecodeReport,
    ) {
        for key in object.keys() {
            if schema.field(key).is_none() {
                let key_path = child_path(path, key);
                warn!(schema = schema.id, path = %key_path, "Unexpected field in response");
                report.unexpected_fields.push(key_path);
            }
        }
    }

    fn decode_tag(
        &self,
        tag: &TypeTag,
        raw: &Value,
        path: &str,
        report: &mut DecodeReport,
    ) -> Result<TypedValue> {
        match tag {
            TypeTag::Primitive(kind) => decode_primitive(*kind, raw, path),
            TypeTag::Temporal(kind) => decode_temporal(*kind, raw, path),
            TypeTag::Enum(id) => {
                let descriptor = self.enumeration(id, path)?;
                Ok(TypedValue::Enum(decode_enum(descriptor, raw, path, report)))
            }
            TypeTag::Record(id) => {
                let schema = self.schema(id, path)?;
                Ok(TypedValue::Record(self.decode_record(schema, raw, path, report)?))
            }
            TypeTag::Sequence(element) => {
                let Value::Array(items) = raw else {
                    return Err(mismatch(path, &tag.to_string(), raw));
                };
                let mut decoded = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{index}]");
                    decoded.push(self.decode_tag(element, item, &item_path, report)?);
                }
                Ok(TypedValue::Sequence(decoded))
            }
            TypeTag::Mapping(key_tag, value_tag) => {
                let Value::Object(object) = raw else {
                    return Err(mismatch(path, &tag.to_string(), raw));
                };
                let mut entries: Vec<(MapKey, TypedValue)> = Vec::with_capacity(object.len());
                for (key, value) in object {
                    let entry_path = child_path(path, key);
                    let decoded_key = self.decode_key(key_tag, key, &entry_path, report)?;
                    let decoded_value = self.decode_tag(value_tag, value, &entry_path, report)?;
                    // Keys come from distinct JSON object keys and enum keys match by
                    // name only, so no two entries can collide here today
                    insert_entry(&mut entries, decoded_key, decoded_value, &entry_path, report);
                }
                Ok(TypedValue::Mapping(entries))
            }
        }
    }

    /// Only enum keys are decoded, by variant name; everything else stays text
    fn decode_key(
        &self,
        tag: &TypeTag,
        key: &str,
        path: &str,
        report: &mut DecodeReport,
    ) -> Result<MapKey> {
        let TypeTag::Enum(id) = tag else {
            return Ok(MapKey::Text(key.to_string()));
        };
        let descriptor = self.enumeration(id, path)?;
        match descriptor.by_name(key) {
            Some(variant) => Ok(MapKey::Enum(EnumValue::Known {
                enumeration: descriptor.id,
                name: variant.name,
                value: variant.value,
            })),
            None => {
                let raw = Value::String(key.to_string());
                record_unknown(descriptor, &raw, path, report);
                Ok(MapKey::Enum(EnumValue::Unknown(raw)))
            }
        }
    }
}

/// Name first, then literal value, then the unknown sentinel
fn decode_enum(
    descriptor: &'static EnumDescriptor,
    raw: &Value,
    path: &str,
    report: &mut DecodeReport,
) -> EnumValue {
    let by_name = match raw {
        Value::String(name) => descriptor.by_name(name),
        _ => None,
    };
    match by_name.or_else(|| descriptor.by_value(raw)) {
        Some(variant) => EnumValue::Known {
            enumeration: descriptor.id,
            name: variant.name,
            value: variant.value,
        },
        None => {
            record_unknown(descriptor, raw, path, report);
            EnumValue::Unknown(raw.clone())
        }
    }
}

fn record_unknown(descriptor: &'static EnumDescriptor, raw: &Value, path: &str, report: &mut DecodeReport) {
    let path = display_path(path);
    warn!(enumeration = descriptor.id, path = %path, value = %raw, "Unknown enum value");
    report.unknown_enums.push(UnknownEnum {
        path,
        enumeration: descriptor.id,
        raw: raw.clone(),
    });
}

/// Last write wins; the overwrite is reported rather than silent
fn insert_entry(
    entries: &mut Vec<(MapKey, TypedValue)>,
    key: MapKey,
    value: TypedValue,
    path: &str,
    report: &mut DecodeReport,
) {
    if let Some(slot) = entries.iter_mut().find(|(existing, _)| *existing == key) {
        warn!(path = %path, key = %key, "Mapping key collision, keeping the later entry");
        report.key_collisions.push(path.to_string());
        slot.1 = value;
    } else {
        entries.push((key, value));
    }
}

fn decode_primitive(kind: PrimitiveKind, raw: &Value, path: &str) -> Result<TypedValue> {
    let decoded = match (kind, raw) {
        (PrimitiveKind::String, Value::String(s)) => Some(TypedValue::String(s.clone())),
        (PrimitiveKind::Boolean, Value::Bool(b)) => Some(TypedValue::Boolean(*b)),
        (PrimitiveKind::Float, Value::Number(n)) => n.as_f64().map(TypedValue::Float),
        (PrimitiveKind::Integer, Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral))
            .map(TypedValue::Integer),
        _ => None,
    };
    decoded.ok_or_else(|| mismatch(path, &kind.to_string(), raw))
}

/// 2^63, the first whole float past `i64::MAX`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Whole floats such as `3.0` are accepted for integer fields
fn integral(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= -I64_BOUND && f < I64_BOUND {
        Some(f as i64)
    } else {
        None
    }
}

fn decode_temporal(kind: TemporalKind, raw: &Value, path: &str) -> Result<TypedValue> {
    let Value::String(text) = raw else {
        return Err(mismatch(path, &kind.to_string(), raw));
    };
    temporal::parse(text, kind)
        .map(TypedValue::Temporal)
        .map_err(|e| Error::decode(display_path(path), e.to_string()))
}

fn default_value(default: DefaultValue) -> TypedValue {
    match default {
        DefaultValue::Integer(i) => TypedValue::Integer(i),
        DefaultValue::Float(f) => TypedValue::Float(f),
        DefaultValue::Boolean(b) => TypedValue::Boolean(b),
        DefaultValue::Text(s) => TypedValue::String(s.to_string()),
    }
}

fn mismatch(path: &str, expected: &str, raw: &Value) -> Error {
    Error::decode(
        display_path(path),
        format!("expected {expected}, found {}", json_kind(raw)),
    )
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        path.to_string()
    }
}
