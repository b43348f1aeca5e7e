//! The process-wide default engine and the free functions that use it.
//!
//! The default engine is built on first use from [`Engine::with_builtins`] and
//! never changes afterwards. Callers that need their own transformations build
//! an [`Engine`] and call its methods instead.

use std::sync::LazyLock;

use crate::{
    engine::{AnyOutcome, Engine},
    error::MaskError,
    maskable::Maskable,
    value::Value,
};

static DEFAULT_ENGINE: LazyLock<Engine> = LazyLock::new(Engine::with_builtins);

/// The shared engine holding `zero`, `char`, `rand` and `hash`.
pub fn default_engine() -> &'static Engine {
    &DEFAULT_ENGINE
}

/// Returns a masked copy of `value` using the default engine.
///
/// ```
/// use fieldmask::Mask;
///
/// #[derive(Clone, Debug, Mask)]
/// pub struct Login {
///     pub user: String,
///     #[mask("char,-1")]
///     pub password: String,
/// }
///
/// let login = Login { user: "ada".into(), password: "hunter2".into() };
/// let masked = fieldmask::mask(&login)?;
/// assert_eq!(masked.user, "ada");
/// assert_eq!(masked.password, "*******");
/// assert_eq!(login.password, "hunter2");
/// # Ok::<(), fieldmask::MaskError>(())
/// ```
pub fn mask<T>(value: &T) -> Result<T, MaskError>
where
    T: Maskable,
{
    default_engine().mask(value)
}

/// Masks a string under `directive` using the default engine.
pub fn mask_string(value: &str, directive: &str) -> Result<String, MaskError> {
    default_engine().mask_string(value, directive)
}

/// Masks a signed integer under `directive` using the default engine.
pub fn mask_int(value: i64, directive: &str) -> Result<i64, MaskError> {
    default_engine().mask_int(value, directive)
}

/// Masks an unsigned integer under `directive` using the default engine.
pub fn mask_uint(value: u64, directive: &str) -> Result<u64, MaskError> {
    default_engine().mask_uint(value, directive)
}

/// Masks a float under `directive` using the default engine.
pub fn mask_float(value: f64, directive: &str) -> Result<f64, MaskError> {
    default_engine().mask_float(value, directive)
}

/// Applies an untyped transformation from the default engine to `value`.
pub fn mask_any(value: &Value, directive: &str) -> Result<AnyOutcome, MaskError> {
    default_engine().mask_any(value, directive)
}
