//! Named transformations, one namespace per value category.
//!
//! The same name may be bound to unrelated functions in different categories:
//! `rand` for strings produces letters, `rand` for integers draws a number.
//! Registering a name again replaces the previous entry. There is no removal.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::{error::MaskError, value::Value};

/// Masks a string leaf.
pub type StringMaskFn = Arc<dyn Fn(&str, &[&str]) -> Result<String, MaskError> + Send + Sync>;
/// Masks a signed integer leaf, widened to `i64`.
pub type IntMaskFn = Arc<dyn Fn(i64, &[&str]) -> Result<i64, MaskError> + Send + Sync>;
/// Masks an unsigned integer leaf, widened to `u64`.
pub type UintMaskFn = Arc<dyn Fn(u64, &[&str]) -> Result<u64, MaskError> + Send + Sync>;
/// Masks a float leaf, widened to `f64`.
pub type FloatMaskFn = Arc<dyn Fn(f64, &[&str]) -> Result<f64, MaskError> + Send + Sync>;
/// Masks a value of any shape.
pub type AnyMaskFn = Arc<dyn Fn(&Value, &[&str]) -> Result<Value, MaskError> + Send + Sync>;

/// The value category a transformation is registered under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    String,
    Int,
    Uint,
    Float,
    Any,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Any => "any",
        })
    }
}

/// A registered transformation of any category.
#[derive(Clone)]
pub enum Transformation {
    String(StringMaskFn),
    Int(IntMaskFn),
    Uint(UintMaskFn),
    Float(FloatMaskFn),
    Any(AnyMaskFn),
}

impl Transformation {
    pub fn string<F>(function: F) -> Self
    where
        F: Fn(&str, &[&str]) -> Result<String, MaskError> + Send + Sync + 'static,
    {
        Self::String(Arc::new(function))
    }

    pub fn int<F>(function: F) -> Self
    where
        F: Fn(i64, &[&str]) -> Result<i64, MaskError> + Send + Sync + 'static,
    {
        Self::Int(Arc::new(function))
    }

    pub fn uint<F>(function: F) -> Self
    where
        F: Fn(u64, &[&str]) -> Result<u64, MaskError> + Send + Sync + 'static,
    {
        Self::Uint(Arc::new(function))
    }

    pub fn float<F>(function: F) -> Self
    where
        F: Fn(f64, &[&str]) -> Result<f64, MaskError> + Send + Sync + 'static,
    {
        Self::Float(Arc::new(function))
    }

    pub fn any<F>(function: F) -> Self
    where
        F: Fn(&Value, &[&str]) -> Result<Value, MaskError> + Send + Sync + 'static,
    {
        Self::Any(Arc::new(function))
    }

    pub fn category(&self) -> Category {
        match self {
            Self::String(_) => Category::String,
            Self::Int(_) => Category::Int,
            Self::Uint(_) => Category::Uint,
            Self::Float(_) => Category::Float,
            Self::Any(_) => Category::Any,
        }
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transformation")
            .field(&self.category())
            .finish()
    }
}

/// Name → function map for one category.
pub(crate) struct Table<F> {
    entries: HashMap<String, F>,
}

impl<F> Default for Table<F> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<F: Clone> Clone for Table<F> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<F> Table<F> {
    pub(crate) fn insert(&mut self, name: impl Into<String>, function: F) {
        self.entries.insert(name.into(), function);
    }

    pub(crate) fn get(&self, name: &str) -> Option<&F> {
        self.entries.get(name)
    }

    fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// The five per-category tables owned by an engine.
#[derive(Clone, Default)]
pub(crate) struct Registry {
    pub(crate) strings: Table<StringMaskFn>,
    pub(crate) ints: Table<IntMaskFn>,
    pub(crate) uints: Table<UintMaskFn>,
    pub(crate) floats: Table<FloatMaskFn>,
    pub(crate) anys: Table<AnyMaskFn>,
}

impl Registry {
    pub(crate) fn register(&mut self, name: impl Into<String>, transformation: Transformation) {
        match transformation {
            Transformation::String(function) => self.strings.insert(name, function),
            Transformation::Int(function) => self.ints.insert(name, function),
            Transformation::Uint(function) => self.uints.insert(name, function),
            Transformation::Float(function) => self.floats.insert(name, function),
            Transformation::Any(function) => self.anys.insert(name, function),
        }
    }

    pub(crate) fn lookup(&self, category: Category, name: &str) -> Option<Transformation> {
        match category {
            Category::String => self.strings.get(name).cloned().map(Transformation::String),
            Category::Int => self.ints.get(name).cloned().map(Transformation::Int),
            Category::Uint => self.uints.get(name).cloned().map(Transformation::Uint),
            Category::Float => self.floats.get(name).cloned().map(Transformation::Float),
            Category::Any => self.anys.get(name).cloned().map(Transformation::Any),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("string", &self.strings.names())
            .field("int", &self.ints.names())
            .field("uint", &self.uints.names())
            .field("float", &self.floats.names())
            .field("any", &self.anys.names())
            .finish()
    }
}
