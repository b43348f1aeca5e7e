//! Errors raised while masking.
//!
//! Every failure aborts the traversal that raised it: the engine never returns
//! a partially masked value. A directive naming a transformation that is not
//! registered is *not* an error; the value passes through unchanged.

use thiserror::Error;

use crate::{registry::Category, value::ShapeKind};

/// Failure modes of masking.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MaskError {
    /// A numeric directive argument failed to parse.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// The offending token as written in the directive.
        argument: String,
        /// Parser message.
        reason: String,
    },
    /// The fill character argument was not exactly one character.
    #[error("fill character must be exactly one character, got `{0}`")]
    InvalidFillChar(String),
    /// The digest algorithm argument is not one of `md5`, `sha1`, `sha256`.
    #[error("{0} algorithm not supported")]
    UnsupportedAlgorithm(String),
    /// Random bounds leave no value to draw from.
    #[error("empty range: max `{max}` must be greater than min `{min}`")]
    EmptyRange {
        /// Lower bound as written.
        min: String,
        /// Upper bound as written.
        max: String,
    },
    /// An untyped transformation returned a value the call site cannot use.
    #[error("transformation `{name}` returned {found} where {expected} was expected")]
    TypeMismatch {
        /// Name of the untyped transformation.
        name: String,
        /// Category of the typed call site.
        expected: Category,
        /// Shape that was actually returned.
        found: ShapeKind,
    },
    /// A masked value could not be rebuilt into the requested Rust type.
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        /// What the target type needed.
        expected: String,
        /// What the value tree held.
        found: String,
    },
    /// Raised by user-registered transformations.
    #[error("{0}")]
    Custom(String),
}

impl MaskError {
    /// Builds a [`MaskError::Custom`] from any displayable message.
    pub fn custom(message: impl std::fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }

    pub(crate) fn invalid_argument(argument: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidArgument {
            argument: argument.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unexpected_shape(expected: impl Into<String>, found: ShapeKind) -> Self {
        Self::UnexpectedShape {
            expected: expected.into(),
            found: found.to_string(),
        }
    }
}
