use std::{
    any::{self, Any},
    fmt,
    sync::Arc,
};

use crate::{error::MaskError, value::Value};

type Shared = Arc<dyn Any + Send + Sync>;

/// A value the engine carries through without looking inside.
///
/// Used for field types that do not implement [`crate::Maskable`] (timestamps,
/// decimals, handles from other crates) via `#[mask(opaque)]`. Masking copies
/// it unchanged; the `zero` transformation replaces it with `T::default()`.
#[derive(Clone)]
pub struct Opaque {
    value: Shared,
    type_name: &'static str,
    zero: fn() -> Shared,
}

fn default_of<T>() -> Shared
where
    T: Any + Default + Send + Sync,
{
    Arc::new(T::default())
}

impl Opaque {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Default + Send + Sync,
    {
        Self {
            value: Arc::new(value),
            type_name: any::type_name::<T>(),
            zero: default_of::<T>,
        }
    }

    /// Name of the carried type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns a clone of the carried value if it is a `T`.
    pub fn downcast<T>(&self) -> Option<T>
    where
        T: Any + Clone,
    {
        self.value.downcast_ref::<T>().cloned()
    }

    /// Rebuilds a `T` from an opaque [`Value`].
    pub fn extract<T>(value: Value) -> Result<T, MaskError>
    where
        T: Any + Clone,
    {
        match value {
            Value::Opaque(opaque) => {
                opaque
                    .downcast::<T>()
                    .ok_or_else(|| MaskError::UnexpectedShape {
                        expected: format!("opaque `{}`", any::type_name::<T>()),
                        found: format!("opaque `{}`", opaque.type_name),
                    })
            }
            other => Err(MaskError::unexpected_shape(
                format!("opaque `{}`", any::type_name::<T>()),
                other.kind(),
            )),
        }
    }

    pub(crate) fn zeroed(&self) -> Self {
        Self {
            value: (self.zero)(),
            type_name: self.type_name,
            zero: self.zero,
        }
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Opaque").field(&self.type_name).finish()
    }
}

/// Two opaque values are equal when they share the same allocation.
impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Opaque;
    use crate::value::Value;

    #[test]
    fn downcast_returns_original() {
        let opaque = Opaque::new(Duration::from_secs(5));
        assert_eq!(opaque.downcast::<Duration>(), Some(Duration::from_secs(5)));
        assert_eq!(opaque.downcast::<String>(), None);
    }

    #[test]
    fn zeroed_uses_default() {
        let opaque = Opaque::new(Duration::from_secs(5));
        assert_eq!(opaque.zeroed().downcast::<Duration>(), Some(Duration::ZERO));
    }

    #[test]
    fn clones_compare_equal() {
        let opaque = Opaque::new(3_u8);
        assert_eq!(opaque.clone(), opaque);
        assert_ne!(Opaque::new(3_u8), opaque);
    }

    #[test]
    fn extract_reports_type_names() {
        let err = Opaque::extract::<String>(Value::Opaque(Opaque::new(1_u32))).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("String"));
        assert!(message.ends_with("found opaque `u32`"));
    }
}
