//! Decoded value types
//!
//! The decoder turns raw JSON into this typed graph. Records keep their
//! fields in schema declaration order; unset optional fields are simply
//! absent.

use crate::schema::Literal;
use crate::temporal::Temporal;
use crate::types::JsonObject;
use chrono::NaiveDateTime;
use serde_json::Value;
use std::fmt;

/// Decoded enum field
#[derive(Debug, Clone, PartialEq)]
pub enum EnumValue {
    /// A declared variant
    Known {
        enumeration: &'static str,
        name: &'static str,
        value: Literal,
    },
    /// Sentinel for a value matching no variant name or literal
    Unknown(Value),
}

impl EnumValue {
    /// Variant name, if known
    pub fn name(&self) -> Option<&'static str> {
        match self {
            EnumValue::Known { name, .. } => Some(*name),
            EnumValue::Unknown(_) => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, EnumValue::Unknown(_))
    }

    fn to_json(&self) -> Value {
        match self {
            EnumValue::Known { name, .. } => Value::String((*name).to_string()),
            EnumValue::Unknown(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Known { name, .. } => f.write_str(name),
            EnumValue::Unknown(raw) => write!(f, "<unknown {raw}>"),
        }
    }
}

/// Decoded mapping key
#[derive(Debug, Clone, PartialEq)]
pub enum MapKey {
    Text(String),
    Enum(EnumValue),
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Text(s) => f.write_str(s),
            MapKey::Enum(EnumValue::Unknown(Value::String(s))) => f.write_str(s),
            MapKey::Enum(e) => write!(f, "{e}"),
        }
    }
}

/// A value conforming to a type tag
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Enum(EnumValue),
    Temporal(Temporal),
    Record(Record),
    Sequence(Vec<TypedValue>),
    /// Entries in source iteration order
    Mapping(Vec<(MapKey, TypedValue)>),
}

impl TypedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Float(f) => Some(*f),
            TypedValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            TypedValue::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_temporal(&self) -> Option<&Temporal> {
        match self {
            TypedValue::Temporal(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            TypedValue::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[TypedValue]> {
        match self {
            TypedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(MapKey, TypedValue)]> {
        match self {
            TypedValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            TypedValue::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Records of a sequence, skipping non-record elements
    pub fn into_records(self) -> Vec<Record> {
        match self {
            TypedValue::Sequence(items) => items.into_iter().filter_map(Self::into_record).collect(),
            _ => Vec::new(),
        }
    }

    /// Render back to JSON (temporals as ISO strings, enums as variant names)
    pub fn to_json(&self) -> Value {
        match self {
            TypedValue::String(s) => Value::String(s.clone()),
            TypedValue::Integer(i) => Value::from(*i),
            TypedValue::Float(f) => Value::from(*f),
            TypedValue::Boolean(b) => Value::Bool(*b),
            TypedValue::Enum(e) => e.to_json(),
            TypedValue::Temporal(t) => Value::String(t.to_string()),
            TypedValue::Record(r) => r.to_json(),
            TypedValue::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            TypedValue::Mapping(entries) => {
                let mut map = JsonObject::new();
                for (key, value) in entries {
                    map.insert(key.to_string(), value.to_json());
                }
                Value::Object(map)
            }
        }
    }
}

/// Instance of a record schema
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: &'static str,
    fields: Vec<(&'static str, TypedValue)>,
}

impl Record {
    pub(crate) fn new(schema: &'static str, fields: Vec<(&'static str, TypedValue)>) -> Self {
        Self { schema, fields }
    }

    /// Id of the schema this record was decoded with
    pub fn schema(&self) -> &'static str {
        self.schema
    }

    /// Field value, `None` when the field is unset
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &TypedValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Attach a value that the API does not return, such as the site a
    /// record was fetched for. Replaces an existing value of the same name.
    pub fn annotate(&mut self, name: &'static str, value: TypedValue) {
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Remove and return a field
    pub fn take(&mut self, name: &str) -> Option<TypedValue> {
        let index = self.fields.iter().position(|(field, _)| *field == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(TypedValue::as_str)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(TypedValue::as_i64)
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(TypedValue::as_f64)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(TypedValue::as_bool)
    }

    pub fn enumeration(&self, name: &str) -> Option<&EnumValue> {
        self.get(name).and_then(TypedValue::as_enum)
    }

    pub fn temporal(&self, name: &str) -> Option<&Temporal> {
        self.get(name).and_then(TypedValue::as_temporal)
    }

    /// Wall-clock datetime of a temporal field
    pub fn datetime(&self, name: &str) -> Option<NaiveDateTime> {
        self.temporal(name).and_then(Temporal::naive_datetime)
    }

    pub fn record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(TypedValue::as_record)
    }

    /// Records of a sequence-of-record field; empty when unset
    pub fn records(&self, name: &str) -> Vec<&Record> {
        self.get(name)
            .and_then(TypedValue::as_sequence)
            .map(|items| items.iter().filter_map(TypedValue::as_record).collect())
            .unwrap_or_default()
    }

    /// Text of a field that may be either a string or an integer id
    pub fn id(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            TypedValue::String(s) => Some(s.clone()),
            TypedValue::Integer(i) => Some(i.to_string()),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut map = JsonObject::new();
        for (name, value) in &self.fields {
            map.insert((*name).to_string(), value.to_json());
        }
        Value::Object(map)
    }
}

/// An enum value that matched no variant
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownEnum {
    pub path: String,
    pub enumeration: &'static str,
    pub raw: Value,
}

/// Non-fatal findings collected while decoding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    /// Paths of JSON keys with no schema field
    pub unexpected_fields: Vec<String>,
    /// Enum values replaced by the unknown sentinel
    pub unknown_enums: Vec<UnknownEnum>,
    /// Mapping paths where two source keys decoded to the same key
    pub key_collisions: Vec<String>,
}

impl DecodeReport {
    /// Whether decoding found nothing worth reporting
    pub fn is_clean(&self) -> bool {
        self.unexpected_fields.is_empty()
            && self.unknown_enums.is_empty()
            && self.key_collisions.is_empty()
    }
}

/// A decoded value together with its report
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub report: DecodeReport,
}

impl<T> Decoded<T> {
    /// Transform the value, keeping the report
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        Decoded {
            value: f(self.value),
            report: self.report,
        }
    }
}
