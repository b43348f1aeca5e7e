//! The masking engine.
//!
//! - **`dispatch`**: per-category entry points (`mask_string`, `mask_int`, ..)
//! - **`traverse`**: the recursive walk over a [`Value`] tree
//!
//! An [`Engine`] owns its registry. Registration consumes and returns the
//! engine, so tables are fully built before the engine can be shared; once
//! shared it is only ever read, from any number of threads.

mod dispatch;
mod traverse;

pub use dispatch::AnyOutcome;

use crate::{
    directive::Directive,
    error::MaskError,
    maskable::Maskable,
    registry::{Category, Registry, Transformation},
    value::Value,
};

/// A set of registered transformations plus the traversal that applies them.
///
/// ```
/// use fieldmask::{Engine, MaskError};
///
/// let engine = Engine::new()
///     .register_string("upper", |value, _| Ok(value.to_uppercase()));
/// assert_eq!(engine.mask_string("abc", "upper")?, "ABC");
/// # Ok::<(), MaskError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    registry: Registry,
}

impl Engine {
    /// An engine with no transformations registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `transformation` under `name` in its category.
    #[must_use]
    pub fn register(mut self, name: impl Into<String>, transformation: Transformation) -> Self {
        self.registry.register(name, transformation);
        self
    }

    #[must_use]
    pub fn register_string<F>(self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&str, &[&str]) -> Result<String, MaskError> + Send + Sync + 'static,
    {
        self.register(name, Transformation::string(function))
    }

    #[must_use]
    pub fn register_int<F>(self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(i64, &[&str]) -> Result<i64, MaskError> + Send + Sync + 'static,
    {
        self.register(name, Transformation::int(function))
    }

    #[must_use]
    pub fn register_uint<F>(self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(u64, &[&str]) -> Result<u64, MaskError> + Send + Sync + 'static,
    {
        self.register(name, Transformation::uint(function))
    }

    #[must_use]
    pub fn register_float<F>(self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(f64, &[&str]) -> Result<f64, MaskError> + Send + Sync + 'static,
    {
        self.register(name, Transformation::float(function))
    }

    #[must_use]
    pub fn register_any<F>(self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&Value, &[&str]) -> Result<Value, MaskError> + Send + Sync + 'static,
    {
        self.register(name, Transformation::any(function))
    }

    /// Returns the transformation registered under `name` in `category`.
    pub fn lookup(&self, category: Category, name: &str) -> Option<Transformation> {
        self.registry.lookup(category, name)
    }

    /// Returns a masked copy of `value`, leaving `value` untouched.
    ///
    /// Each record field is masked according to its own directive; values
    /// outside any record pass through unchanged.
    pub fn mask<T>(&self, value: &T) -> Result<T, MaskError>
    where
        T: Maskable,
    {
        let masked = self.traverse(&value.to_value(), &Directive::none())?;
        T::from_value(masked)
    }

    /// Masks a value tree under `directive`, returning a fresh tree.
    pub fn mask_value<'d>(
        &self,
        value: &Value,
        directive: impl Into<Directive<'d>>,
    ) -> Result<Value, MaskError> {
        self.traverse(value, &directive.into())
    }
}

#[cfg(test)]
mod tests {
    use super::Engine;
    use crate::{registry::Category, value::Value};

    #[test]
    fn new_engine_is_empty() {
        let engine = Engine::new();
        for category in [
            Category::String,
            Category::Int,
            Category::Uint,
            Category::Float,
            Category::Any,
        ] {
            assert!(engine.lookup(category, "zero").is_none());
        }
    }

    #[test]
    fn registration_chains() {
        let engine = Engine::new()
            .register_string("upper", |value, _| Ok(value.to_uppercase()))
            .register_int("inc", |value, _| Ok(value + 1))
            .register_uint("inc", |value, _| Ok(value + 1))
            .register_float("half", |value, _| Ok(value / 2.0))
            .register_any("unit", |_, _| Ok(Value::Unit));
        assert!(engine.lookup(Category::String, "upper").is_some());
        assert!(engine.lookup(Category::Int, "inc").is_some());
        assert!(engine.lookup(Category::Uint, "inc").is_some());
        assert!(engine.lookup(Category::Float, "half").is_some());
        assert!(engine.lookup(Category::Any, "unit").is_some());
        assert!(engine.lookup(Category::Any, "upper").is_none());
    }

    #[test]
    fn engines_are_independent() {
        let base = Engine::new();
        let extended = base
            .clone()
            .register_string("upper", |value, _| Ok(value.to_uppercase()));
        assert!(base.lookup(Category::String, "upper").is_none());
        assert!(extended.lookup(Category::String, "upper").is_some());
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
