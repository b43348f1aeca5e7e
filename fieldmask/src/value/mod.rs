//! The value tree the engine walks.
//!
//! [`Value`] is a closed set of shapes. Rust types are lowered into it through
//! [`crate::Maskable`] and rebuilt from it after masking, so the engine itself
//! never needs to know the concrete type it is working on.
//!
//! | Shape | Variant | Engine behavior |
//! |-------|---------|-----------------|
//! | string, integer, float | `String`, `Int`, `Uint`, `Float` | dispatched by category |
//! | optional / pointer | `Optional` | absent stays absent, present recurses |
//! | boxed, type known at runtime | `Dynamic` | nil stays nil, otherwise recurses |
//! | growable / fixed sequence | `List`, `Array` | element by element, same directive |
//! | record | `Record` | field by field, each with its own directive |
//! | everything else | `Bool`, `Char`, `Unit`, `Opaque`, `Map` | copied unchanged |

use std::fmt;

mod opaque;
mod record;

pub use opaque::Opaque;
pub use record::{FieldDescriptor, FieldValues, Record, RecordSchema};

/// Declared width of a signed integer leaf.
///
/// The engine always masks through `i64`; the width is used to convert the
/// result back into the representation the leaf was declared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    Isize,
}

impl IntWidth {
    /// Converts `value` to this width with `as` semantics (wrapping).
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn narrow(self, value: i64) -> i64 {
        match self {
            Self::I8 => i64::from(value as i8),
            Self::I16 => i64::from(value as i16),
            Self::I32 => i64::from(value as i32),
            Self::I64 => value,
            Self::Isize => value as isize as i64,
        }
    }
}

/// Declared width of an unsigned integer leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UintWidth {
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl UintWidth {
    /// Converts `value` to this width with `as` semantics (wrapping).
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn narrow(self, value: u64) -> u64 {
        match self {
            Self::U8 => u64::from(value as u8),
            Self::U16 => u64::from(value as u16),
            Self::U32 => u64::from(value as u32),
            Self::U64 => value,
            Self::Usize => value as usize as u64,
        }
    }
}

/// Declared width of a floating-point leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

impl FloatWidth {
    /// Rounds `value` through `f32` when the leaf is single precision.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn narrow(self, value: f64) -> f64 {
        match self {
            Self::F32 => f64::from(value as f32),
            Self::F64 => value,
        }
    }
}

/// Discriminant of a [`Value`], used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    String,
    Int,
    Uint,
    Float,
    Bool,
    Char,
    Unit,
    Opaque,
    Optional,
    Dynamic,
    List,
    Array,
    Map,
    Record,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Unit => "unit",
            Self::Opaque => "opaque",
            Self::Optional => "optional",
            Self::Dynamic => "dynamic",
            Self::List => "list",
            Self::Array => "array",
            Self::Map => "map",
            Self::Record => "record",
        })
    }
}

/// A node of the value tree.
///
/// `Optional`, `Dynamic`, `List` and `Map` use `None` for the absent / nil
/// state. A `Vec` lowers to `List(Some(..))`; `List(None)` only appears as the
/// zero value of a list and rebuilds as an empty `Vec`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Int { value: i64, width: IntWidth },
    Uint { value: u64, width: UintWidth },
    Float { value: f64, width: FloatWidth },
    Bool(bool),
    Char(char),
    Unit,
    Opaque(Opaque),
    Optional(Option<Box<Value>>),
    Dynamic(Option<Box<Value>>),
    List(Option<Vec<Value>>),
    Array(Vec<Value>),
    Map(Option<Vec<(Value, Value)>>),
    Record(Record),
}

impl Value {
    /// A 64-bit signed integer leaf.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::Int {
            value,
            width: IntWidth::I64,
        }
    }

    /// A 64-bit unsigned integer leaf.
    #[must_use]
    pub fn uint(value: u64) -> Self {
        Self::Uint {
            value,
            width: UintWidth::U64,
        }
    }

    /// A double precision float leaf.
    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::Float {
            value,
            width: FloatWidth::F64,
        }
    }

    /// Returns the shape of this node.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::String(_) => ShapeKind::String,
            Self::Int { .. } => ShapeKind::Int,
            Self::Uint { .. } => ShapeKind::Uint,
            Self::Float { .. } => ShapeKind::Float,
            Self::Bool(_) => ShapeKind::Bool,
            Self::Char(_) => ShapeKind::Char,
            Self::Unit => ShapeKind::Unit,
            Self::Opaque(_) => ShapeKind::Opaque,
            Self::Optional(_) => ShapeKind::Optional,
            Self::Dynamic(_) => ShapeKind::Dynamic,
            Self::List(_) => ShapeKind::List,
            Self::Array(_) => ShapeKind::Array,
            Self::Map(_) => ShapeKind::Map,
            Self::Record(_) => ShapeKind::Record,
        }
    }

    /// Returns the zero value of this node's shape.
    ///
    /// Widths, array lengths and record schemas are preserved; everything that
    /// can be absent becomes absent.
    #[must_use]
    pub fn zeroed(&self) -> Self {
        match self {
            Self::String(_) => Self::String(String::new()),
            Self::Int { width, .. } => Self::Int {
                value: 0,
                width: *width,
            },
            Self::Uint { width, .. } => Self::Uint {
                value: 0,
                width: *width,
            },
            Self::Float { width, .. } => Self::Float {
                value: 0.0,
                width: *width,
            },
            Self::Bool(_) => Self::Bool(false),
            Self::Char(_) => Self::Char(char::default()),
            Self::Unit => Self::Unit,
            Self::Opaque(opaque) => Self::Opaque(opaque.zeroed()),
            Self::Optional(_) => Self::Optional(None),
            Self::Dynamic(_) => Self::Dynamic(None),
            Self::List(_) => Self::List(None),
            Self::Map(_) => Self::Map(None),
            Self::Array(items) => Self::Array(items.iter().map(Self::zeroed).collect()),
            Self::Record(record) => Self::Record(record.zeroed()),
        }
    }

    /// Returns the string payload of a `String` leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the record payload of a `Record` node.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{FloatWidth, IntWidth, ShapeKind, UintWidth, Value};

    #[test]
    fn int_narrowing_wraps_like_as() {
        assert_eq!(IntWidth::I8.narrow(300), 44);
        assert_eq!(IntWidth::I8.narrow(-129), 127);
        assert_eq!(IntWidth::I16.narrow(70_000), 4_464);
        assert_eq!(IntWidth::I64.narrow(i64::MAX), i64::MAX);
    }

    #[test]
    fn uint_narrowing_wraps_like_as() {
        assert_eq!(UintWidth::U8.narrow(256), 0);
        assert_eq!(UintWidth::U32.narrow(u64::MAX), u64::from(u32::MAX));
        assert_eq!(UintWidth::U64.narrow(u64::MAX), u64::MAX);
    }

    #[test]
    fn float_narrowing_rounds_through_f32() {
        assert_eq!(FloatWidth::F32.narrow(0.1), f64::from(0.1_f32));
        assert_eq!(FloatWidth::F64.narrow(0.1), 0.1);
    }

    #[test]
    fn zeroed_preserves_width() {
        let value = Value::Int {
            value: 57128,
            width: IntWidth::I32,
        };
        assert_eq!(
            value.zeroed(),
            Value::Int {
                value: 0,
                width: IntWidth::I32
            }
        );
    }

    #[test]
    fn zeroed_nils_containers() {
        assert_eq!(
            Value::Optional(Some(Box::new(Value::from("x")))).zeroed(),
            Value::Optional(None)
        );
        assert_eq!(
            Value::Dynamic(Some(Box::new(Value::int(1)))).zeroed(),
            Value::Dynamic(None)
        );
        assert_eq!(
            Value::List(Some(vec![Value::int(1)])).zeroed(),
            Value::List(None)
        );
        assert_eq!(
            Value::Map(Some(vec![(Value::from("k"), Value::from("v"))])).zeroed(),
            Value::Map(None)
        );
    }

    #[test]
    fn zeroed_array_keeps_length() {
        let value = Value::Array(vec![Value::from("a"), Value::from("b")]);
        assert_eq!(
            value.zeroed(),
            Value::Array(vec![Value::from(""), Value::from("")])
        );
    }

    #[test]
    fn zeroed_is_idempotent() {
        let value = Value::float(3.5);
        assert_eq!(value.zeroed(), value.zeroed().zeroed());
    }

    #[test]
    fn kind_names_are_lowercase() {
        assert_eq!(Value::Unit.kind(), ShapeKind::Unit);
        assert_eq!(Value::uint(1).kind().to_string(), "uint");
        assert_eq!(Value::List(None).kind().to_string(), "list");
    }
}
