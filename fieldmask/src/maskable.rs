//! Bridge between Rust types and the [`Value`] tree.
//!
//! - [`Maskable`]: lowers a type to a [`Value`] and rebuilds it afterwards
//! - [`Dynamic`]: a slot whose concrete type is only known at runtime
//!
//! ## Provided implementations
//!
//! | Rust type | Shape |
//! |-----------|-------|
//! | `String` | `String` |
//! | `i8`..`i64`, `isize` | `Int` with matching width |
//! | `u8`..`u64`, `usize` | `Uint` with matching width |
//! | `f32`, `f64` | `Float` with matching width |
//! | `bool`, `char`, `()`, `PhantomData<T>` | passed through |
//! | `Option<T>` | `Optional` |
//! | `Box<T>` | same shape as `T` |
//! | `Vec<T>` | `List` |
//! | `[T; N]` | `Array` |
//! | `HashMap<K, V>`, `BTreeMap<K, V>` | `Map` |
//! | [`Dynamic`] | `Dynamic` |
//! | [`Value`] | itself |
//!
//! Structs get an implementation from `#[derive(Mask)]`.

use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};

use crate::{
    error::MaskError,
    value::{FloatWidth, IntWidth, UintWidth, Value},
};

/// A type that can be lowered into a [`Value`] tree and rebuilt from one.
///
/// `from_value(to_value(x))` must reproduce `x`. Masking only ever changes
/// leaves, so a masked tree always rebuilds into the same type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be masked",
    label = "this type does not implement `Maskable`",
    note = "use `#[derive(Mask)]` on the type definition",
    note = "or mark the field `#[mask(opaque)]` to carry it through unchanged"
)]
pub trait Maskable: Sized {
    /// Lowers `self` into a fresh value tree.
    fn to_value(&self) -> Value;

    /// Rebuilds `Self` from a value tree.
    fn from_value(value: Value) -> Result<Self, MaskError>;
}

impl Maskable for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        match value {
            Value::String(value) => Ok(value),
            other => Err(MaskError::unexpected_shape("string", other.kind())),
        }
    }
}

macro_rules! impl_maskable_int {
    ($ty:ty, $width:ident, $widen:expr) => {
        impl Maskable for $ty {
            fn to_value(&self) -> Value {
                Value::Int {
                    value: $widen(*self),
                    width: IntWidth::$width,
                }
            }

            fn from_value(value: Value) -> Result<Self, MaskError> {
                match value {
                    Value::Int { value, .. } => {
                        let narrowed = IntWidth::$width.narrow(value);
                        <$ty>::try_from(narrowed).map_err(|_| MaskError::UnexpectedShape {
                            expected: stringify!($ty).to_string(),
                            found: narrowed.to_string(),
                        })
                    }
                    other => Err(MaskError::unexpected_shape(stringify!($ty), other.kind())),
                }
            }
        }
    };
}

macro_rules! impl_maskable_uint {
    ($ty:ty, $width:ident, $widen:expr) => {
        impl Maskable for $ty {
            fn to_value(&self) -> Value {
                Value::Uint {
                    value: $widen(*self),
                    width: UintWidth::$width,
                }
            }

            fn from_value(value: Value) -> Result<Self, MaskError> {
                match value {
                    Value::Uint { value, .. } => {
                        let narrowed = UintWidth::$width.narrow(value);
                        <$ty>::try_from(narrowed).map_err(|_| MaskError::UnexpectedShape {
                            expected: stringify!($ty).to_string(),
                            found: narrowed.to_string(),
                        })
                    }
                    other => Err(MaskError::unexpected_shape(stringify!($ty), other.kind())),
                }
            }
        }
    };
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn widen_isize(value: isize) -> i64 {
    value as i64
}

#[allow(clippy::cast_possible_truncation)]
fn widen_usize(value: usize) -> u64 {
    value as u64
}

impl_maskable_int!(i8, I8, i64::from);
impl_maskable_int!(i16, I16, i64::from);
impl_maskable_int!(i32, I32, i64::from);
impl_maskable_int!(i64, I64, i64::from);
impl_maskable_int!(isize, Isize, widen_isize);
impl_maskable_uint!(u8, U8, u64::from);
impl_maskable_uint!(u16, U16, u64::from);
impl_maskable_uint!(u32, U32, u64::from);
impl_maskable_uint!(u64, U64, u64::from);
impl_maskable_uint!(usize, Usize, widen_usize);

impl Maskable for f64 {
    fn to_value(&self) -> Value {
        Value::float(*self)
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        match value {
            Value::Float { value, .. } => Ok(value),
            other => Err(MaskError::unexpected_shape("f64", other.kind())),
        }
    }
}

impl Maskable for f32 {
    fn to_value(&self) -> Value {
        Value::Float {
            value: f64::from(*self),
            width: FloatWidth::F32,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Result<Self, MaskError> {
        match value {
            Value::Float { value, .. } => Ok(value as f32),
            other => Err(MaskError::unexpected_shape("f32", other.kind())),
        }
    }
}

impl Maskable for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        match value {
            Value::Bool(value) => Ok(value),
            other => Err(MaskError::unexpected_shape("bool", other.kind())),
        }
    }
}

impl Maskable for char {
    fn to_value(&self) -> Value {
        Value::Char(*self)
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        match value {
            Value::Char(value) => Ok(value),
            other => Err(MaskError::unexpected_shape("char", other.kind())),
        }
    }
}

impl Maskable for () {
    fn to_value(&self) -> Value {
        Value::Unit
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        match value {
            Value::Unit => Ok(()),
            other => Err(MaskError::unexpected_shape("unit", other.kind())),
        }
    }
}

impl<T> Maskable for PhantomData<T> {
    fn to_value(&self) -> Value {
        Value::Unit
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        match value {
            Value::Unit => Ok(PhantomData),
            other => Err(MaskError::unexpected_shape("unit", other.kind())),
        }
    }
}

impl<T> Maskable for Option<T>
where
    T: Maskable,
{
    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|value| Box::new(value.to_value())))
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        match value {
            Value::Optional(inner) => inner.map(|value| T::from_value(*value)).transpose(),
            other => Err(MaskError::unexpected_shape("optional", other.kind())),
        }
    }
}

impl<T> Maskable for Box<T>
where
    T: Maskable,
{
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        T::from_value(value).map(Box::new)
    }
}

impl<T> Maskable for Vec<T>
where
    T: Maskable,
{
    fn to_value(&self) -> Value {
        Value::List(Some(self.iter().map(Maskable::to_value).collect()))
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        match value {
            Value::List(None) => Ok(Vec::new()),
            Value::List(Some(items)) => items.into_iter().map(T::from_value).collect(),
            other => Err(MaskError::unexpected_shape("list", other.kind())),
        }
    }
}

impl<T, const N: usize> Maskable for [T; N]
where
    T: Maskable,
{
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Maskable::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        let Value::Array(items) = value else {
            return Err(MaskError::unexpected_shape("array", value.kind()));
        };
        let items = items
            .into_iter()
            .map(T::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        items
            .try_into()
            .map_err(|items: Vec<T>| MaskError::UnexpectedShape {
                expected: format!("array of {N}"),
                found: format!("array of {}", items.len()),
            })
    }
}

fn map_entries<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Value
where
    K: Maskable + 'a,
    V: Maskable + 'a,
{
    Value::Map(Some(
        entries
            .map(|(key, value)| (key.to_value(), value.to_value()))
            .collect(),
    ))
}

fn rebuild_entries<K, V, M>(value: Value) -> Result<M, MaskError>
where
    K: Maskable,
    V: Maskable,
    M: Default + FromIterator<(K, V)>,
{
    match value {
        Value::Map(None) => Ok(M::default()),
        Value::Map(Some(entries)) => entries
            .into_iter()
            .map(|(key, value)| Ok::<_, MaskError>((K::from_value(key)?, V::from_value(value)?)))
            .collect(),
        other => Err(MaskError::unexpected_shape("map", other.kind())),
    }
}

impl<K, V, S> Maskable for HashMap<K, V, S>
where
    K: Maskable + Hash + Eq,
    V: Maskable,
    S: BuildHasher + Default,
{
    fn to_value(&self) -> Value {
        map_entries(self.iter())
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        rebuild_entries(value)
    }
}

impl<K, V> Maskable for BTreeMap<K, V>
where
    K: Maskable + Ord,
    V: Maskable,
{
    fn to_value(&self) -> Value {
        map_entries(self.iter())
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        rebuild_entries(value)
    }
}

// =============================================================================
// Dynamic - a slot whose concrete type is decided at runtime
// =============================================================================

/// A possibly-nil slot holding a value of any [`Maskable`] type.
///
/// The engine decides how to mask the contents from the value it finds, not
/// from the declared field type. A nil slot stays nil.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dynamic(Option<Box<Value>>);

impl Dynamic {
    /// Stores `value` in the slot.
    pub fn new<T>(value: &T) -> Self
    where
        T: Maskable,
    {
        Self(Some(Box::new(value.to_value())))
    }

    /// An empty slot.
    #[must_use]
    pub fn nil() -> Self {
        Self(None)
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    /// The stored value tree, if any.
    pub fn value(&self) -> Option<&Value> {
        self.0.as_deref()
    }

    /// Rebuilds the stored value as a `T`. Returns `Ok(None)` for a nil slot.
    pub fn downcast<T>(&self) -> Result<Option<T>, MaskError>
    where
        T: Maskable,
    {
        self.0
            .as_deref()
            .map(|value| T::from_value(value.clone()))
            .transpose()
    }
}

impl From<Value> for Dynamic {
    fn from(value: Value) -> Self {
        Self(Some(Box::new(value)))
    }
}

impl Maskable for Dynamic {
    fn to_value(&self) -> Value {
        Value::Dynamic(self.0.clone())
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        match value {
            Value::Dynamic(inner) => Ok(Self(inner)),
            other => Err(MaskError::unexpected_shape("dynamic", other.kind())),
        }
    }
}

impl Maskable for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self, MaskError> {
        Ok(value)
    }
}
