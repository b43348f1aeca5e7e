//! Category dispatch.
//!
//! Each typed entry point resolves a directive in three steps:
//!
//! 1. no transformation named: the value is returned unchanged;
//! 2. the name is registered in this category: its result is returned as is;
//! 3. otherwise the untyped (`any`) table is consulted. A hit must come back as
//!    the same category, or the call fails with [`MaskError::TypeMismatch`]. A
//!    miss returns the value unchanged.

use super::Engine;
use crate::{
    directive::Directive,
    error::MaskError,
    registry::Category,
    value::Value,
};

/// Result of untyped dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct AnyOutcome {
    /// `false` when no directive was given or no untyped transformation has
    /// that name; `value` is then the input, unchanged.
    pub hit: bool,
    pub value: Value,
}

impl Engine {
    /// Masks a string under `directive`.
    pub fn mask_string<'d>(
        &self,
        value: &str,
        directive: impl Into<Directive<'d>>,
    ) -> Result<String, MaskError> {
        self.dispatch_string(value, &directive.into())
    }

    /// Masks a signed integer under `directive`.
    pub fn mask_int<'d>(
        &self,
        value: i64,
        directive: impl Into<Directive<'d>>,
    ) -> Result<i64, MaskError> {
        self.dispatch_int(value, &directive.into())
    }

    /// Masks an unsigned integer under `directive`.
    pub fn mask_uint<'d>(
        &self,
        value: u64,
        directive: impl Into<Directive<'d>>,
    ) -> Result<u64, MaskError> {
        self.dispatch_uint(value, &directive.into())
    }

    /// Masks a float under `directive`.
    pub fn mask_float<'d>(
        &self,
        value: f64,
        directive: impl Into<Directive<'d>>,
    ) -> Result<f64, MaskError> {
        self.dispatch_float(value, &directive.into())
    }

    /// Applies an untyped transformation to `value`.
    pub fn mask_any<'d>(
        &self,
        value: &Value,
        directive: impl Into<Directive<'d>>,
    ) -> Result<AnyOutcome, MaskError> {
        self.dispatch_any(value, &directive.into())
    }

    pub(crate) fn dispatch_string(
        &self,
        value: &str,
        directive: &Directive<'_>,
    ) -> Result<String, MaskError> {
        let Some(name) = directive.name() else {
            return Ok(value.to_string());
        };
        if let Some(mask) = self.registry.strings.get(name) {
            return mask(value, directive.args());
        }
        let fallback = self.fallback(
            Value::from(value),
            directive,
            Category::String,
            |value| match value {
                Value::String(value) => Ok(value),
                other => Err(other),
            },
        )?;
        Ok(fallback.unwrap_or_else(|| value.to_string()))
    }

    pub(crate) fn dispatch_int(
        &self,
        value: i64,
        directive: &Directive<'_>,
    ) -> Result<i64, MaskError> {
        let Some(name) = directive.name() else {
            return Ok(value);
        };
        if let Some(mask) = self.registry.ints.get(name) {
            return mask(value, directive.args());
        }
        let fallback = self.fallback(Value::int(value), directive, Category::Int, |value| {
            match value {
                Value::Int { value, .. } => Ok(value),
                other => Err(other),
            }
        })?;
        Ok(fallback.unwrap_or(value))
    }

    pub(crate) fn dispatch_uint(
        &self,
        value: u64,
        directive: &Directive<'_>,
    ) -> Result<u64, MaskError> {
        let Some(name) = directive.name() else {
            return Ok(value);
        };
        if let Some(mask) = self.registry.uints.get(name) {
            return mask(value, directive.args());
        }
        let fallback = self.fallback(Value::uint(value), directive, Category::Uint, |value| {
            match value {
                Value::Uint { value, .. } => Ok(value),
                other => Err(other),
            }
        })?;
        Ok(fallback.unwrap_or(value))
    }

    pub(crate) fn dispatch_float(
        &self,
        value: f64,
        directive: &Directive<'_>,
    ) -> Result<f64, MaskError> {
        let Some(name) = directive.name() else {
            return Ok(value);
        };
        if let Some(mask) = self.registry.floats.get(name) {
            return mask(value, directive.args());
        }
        let fallback = self.fallback(Value::float(value), directive, Category::Float, |value| {
            match value {
                Value::Float { value, .. } => Ok(value),
                other => Err(other),
            }
        })?;
        Ok(fallback.unwrap_or(value))
    }

    pub(crate) fn dispatch_any(
        &self,
        value: &Value,
        directive: &Directive<'_>,
    ) -> Result<AnyOutcome, MaskError> {
        let mask = directive
            .name()
            .and_then(|name| self.registry.anys.get(name));
        match mask {
            Some(mask) => Ok(AnyOutcome {
                hit: true,
                value: mask(value, directive.args())?,
            }),
            None => Ok(AnyOutcome {
                hit: false,
                value: value.clone(),
            }),
        }
    }

    /// Runs the untyped table for a typed call site and narrows the result.
    ///
    /// Returns `Ok(None)` on a miss.
    fn fallback<T>(
        &self,
        canonical: Value,
        directive: &Directive<'_>,
        expected: Category,
        narrow: impl FnOnce(Value) -> Result<T, Value>,
    ) -> Result<Option<T>, MaskError> {
        let outcome = self.dispatch_any(&canonical, directive)?;
        if !outcome.hit {
            return Ok(None);
        }
        narrow(outcome.value)
            .map(Some)
            .map_err(|found| MaskError::TypeMismatch {
                name: directive.name().unwrap_or_default().to_string(),
                expected,
                found: found.kind(),
            })
    }
}
