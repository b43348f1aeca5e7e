//! Parsing of field directives.
//!
//! A directive is the raw string attached to a field, e.g. `"char,3,-"`. It is
//! split on `,` into a transformation name followed by positional arguments.
//! There is no trimming and no escaping: an argument cannot contain a comma.

/// Separator between the transformation name and its arguments.
pub const DELIMITER: char = ',';

/// A parsed directive borrowing from its source string.
///
/// An empty source yields a single empty token, which reads as "no directive":
/// [`Directive::name`] returns `None` and every dispatch passes the value
/// through unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Directive<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> Directive<'a> {
    /// Splits `raw` on [`DELIMITER`].
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        Self {
            tokens: raw.split(DELIMITER).collect(),
        }
    }

    /// A directive with no tokens at all.
    #[must_use]
    pub fn none() -> Self {
        Self { tokens: Vec::new() }
    }

    /// The transformation name, or `None` when the directive is empty.
    pub fn name(&self) -> Option<&'a str> {
        match self.tokens.first() {
            Some(&name) if !name.is_empty() => Some(name),
            _ => None,
        }
    }

    /// Positional arguments following the name.
    pub fn args(&self) -> &[&'a str] {
        self.tokens.get(1..).unwrap_or_default()
    }

    /// All tokens, name included.
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    /// Returns `true` when no transformation is named.
    pub fn is_empty(&self) -> bool {
        self.name().is_none()
    }
}

impl<'a> From<&'a str> for Directive<'a> {
    fn from(raw: &'a str) -> Self {
        Self::parse(raw)
    }
}

impl<'a> From<&'a String> for Directive<'a> {
    fn from(raw: &'a String) -> Self {
        Self::parse(raw)
    }
}

impl<'a> From<&Directive<'a>> for Directive<'a> {
    fn from(directive: &Directive<'a>) -> Self {
        directive.clone()
    }
}
