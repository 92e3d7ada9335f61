//! Schema descriptor types
//!
//! Every descriptor is plain `'static` data so the whole catalogue can be
//! declared in `const`/`static` items and shared read-only.

use crate::temporal::TemporalKind;
use serde_json::Value;
use std::fmt;

/// Scalar kind of a primitive field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Integer,
    Float,
    Boolean,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::String => write!(f, "string"),
            PrimitiveKind::Integer => write!(f, "integer"),
            PrimitiveKind::Float => write!(f, "float"),
            PrimitiveKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// Semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Primitive(PrimitiveKind),
    /// Reference to an [`EnumDescriptor`] by id
    Enum(&'static str),
    /// Reference to a [`SchemaDescriptor`] by id
    Record(&'static str),
    Sequence(&'static TypeTag),
    /// Key tag, value tag
    Mapping(&'static TypeTag, &'static TypeTag),
    Temporal(TemporalKind),
}

impl TypeTag {
    pub const STRING: TypeTag = TypeTag::Primitive(PrimitiveKind::String);
    pub const INTEGER: TypeTag = TypeTag::Primitive(PrimitiveKind::Integer);
    pub const FLOAT: TypeTag = TypeTag::Primitive(PrimitiveKind::Float);
    pub const BOOLEAN: TypeTag = TypeTag::Primitive(PrimitiveKind::Boolean);
    pub const DATE: TypeTag = TypeTag::Temporal(TemporalKind::Date);
    pub const TIME: TypeTag = TypeTag::Temporal(TemporalKind::Time);
    pub const DATETIME: TypeTag = TypeTag::Temporal(TemporalKind::DateTime);

    /// Record ids referenced anywhere inside this tag
    pub fn record_refs(&self) -> Vec<&'static str> {
        match self {
            TypeTag::Record(id) => vec![*id],
            TypeTag::Sequence(inner) => inner.record_refs(),
            TypeTag::Mapping(key, value) => {
                let mut refs = key.record_refs();
                refs.extend(value.record_refs());
                refs
            }
            _ => Vec::new(),
        }
    }

    /// Enum ids referenced anywhere inside this tag
    pub fn enum_refs(&self) -> Vec<&'static str> {
        match self {
            TypeTag::Enum(id) => vec![*id],
            TypeTag::Sequence(inner) => inner.enum_refs(),
            TypeTag::Mapping(key, value) => {
                let mut refs = key.enum_refs();
                refs.extend(value.enum_refs());
                refs
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Primitive(kind) => write!(f, "{kind}"),
            TypeTag::Enum(id) => write!(f, "enum {id}"),
            TypeTag::Record(id) => write!(f, "record {id}"),
            TypeTag::Sequence(inner) => write!(f, "sequence of {inner}"),
            TypeTag::Mapping(key, value) => write!(f, "mapping of {key} to {value}"),
            TypeTag::Temporal(kind) => write!(f, "{kind}"),
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Literal value carried by an enum variant on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Literal {
    Str(&'static str),
    Int(i64),
}

impl Literal {
    /// Whether a raw JSON value equals this literal
    pub fn matches(&self, raw: &Value) -> bool {
        match (self, raw) {
            (Literal::Str(s), Value::String(raw)) => *s == raw.as_str(),
            (Literal::Int(i), Value::Number(n)) => n.as_i64() == Some(*i),
            // Integer literals also arrive quoted in some payloads
            (Literal::Int(i), Value::String(raw)) => raw.trim().parse::<i64>().ok() == Some(*i),
            _ => false,
        }
    }

    /// JSON form of this literal
    pub fn to_json(&self) -> Value {
        match self {
            Literal::Str(s) => Value::String((*s).to_string()),
            Literal::Int(i) => Value::from(*i),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "{s}"),
            Literal::Int(i) => write!(f, "{i}"),
        }
    }
}

/// One named variant of an enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumVariant {
    pub name: &'static str,
    pub value: Literal,
}

impl EnumVariant {
    pub const fn text(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            value: Literal::Str(value),
        }
    }

    pub const fn int(name: &'static str, value: i64) -> Self {
        Self {
            name,
            value: Literal::Int(value),
        }
    }
}

/// Closed set of named variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub id: &'static str,
    pub variants: &'static [EnumVariant],
}

impl EnumDescriptor {
    /// Find a variant by its name
    pub fn by_name(&self, name: &str) -> Option<&'static EnumVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Find a variant by its associated literal
    pub fn by_value(&self, raw: &Value) -> Option<&'static EnumVariant> {
        self.variants.iter().find(|v| v.value.matches(raw))
    }
}

// ============================================================================
// Records
// ============================================================================

/// Value substituted for a null or absent defaulted field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(&'static str),
}

/// How a field behaves when the JSON key is absent or null
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence {
    /// Absent or null is a decode error
    Required,
    /// Absent or null leaves the field unset
    Optional,
    /// Absent or null yields the given value
    Default(DefaultValue),
}

/// One named field of a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub tag: TypeTag,
    pub presence: Presence,
}

impl FieldDescriptor {
    pub const fn required(name: &'static str, tag: TypeTag) -> Self {
        Self {
            name,
            tag,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, tag: TypeTag) -> Self {
        Self {
            name,
            tag,
            presence: Presence::Optional,
        }
    }

    pub const fn defaulted(name: &'static str, tag: TypeTag, default: DefaultValue) -> Self {
        Self {
            name,
            tag,
            presence: Presence::Default(default),
        }
    }
}

/// Ordered set of named, typed fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemaDescriptor {
    pub id: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl SchemaDescriptor {
    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}
