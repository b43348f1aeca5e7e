//! Recursive traversal of a [`Value`] tree.
//!
//! The input is only ever borrowed; every node of the output is freshly built.
//! The first transformation error aborts the walk.

use super::Engine;
use crate::{
    directive::Directive,
    error::MaskError,
    value::{Record, Value},
};

impl Engine {
    pub(crate) fn traverse(
        &self,
        value: &Value,
        directive: &Directive<'_>,
    ) -> Result<Value, MaskError> {
        match value {
            Value::String(_) | Value::Int { .. } | Value::Uint { .. } | Value::Float { .. } => {
                self.mask_leaf(value, directive)
            }
            Value::Optional(inner) => Ok(Value::Optional(self.traverse_boxed(inner, directive)?)),
            Value::Dynamic(inner) => Ok(Value::Dynamic(self.traverse_boxed(inner, directive)?)),
            Value::Record(record) => self.traverse_record(record).map(Value::Record),
            Value::List(None) => Ok(Value::List(None)),
            Value::List(Some(items)) => Ok(Value::List(Some(self.traverse_items(items, directive)?))),
            Value::Array(items) => Ok(Value::Array(self.traverse_items(items, directive)?)),
            Value::Bool(_) | Value::Char(_) | Value::Unit | Value::Opaque(_) | Value::Map(_) => {
                Ok(value.clone())
            }
        }
    }

    fn traverse_boxed(
        &self,
        inner: &Option<Box<Value>>,
        directive: &Directive<'_>,
    ) -> Result<Option<Box<Value>>, MaskError> {
        inner
            .as_deref()
            .map(|value| self.traverse(value, directive).map(Box::new))
            .transpose()
    }

    /// Every element shares the sequence's directive.
    fn traverse_items(
        &self,
        items: &[Value],
        directive: &Directive<'_>,
    ) -> Result<Vec<Value>, MaskError> {
        items
            .iter()
            .map(|item| self.traverse(item, directive))
            .collect()
    }

    /// Records ignore the directive they are reached with; each field uses
    /// its own.
    fn traverse_record(&self, record: &Record) -> Result<Record, MaskError> {
        let values = record
            .fields()
            .map(|(field, value)| {
                if !field.visible {
                    return Ok(value.zeroed());
                }
                let directive = field.directive();
                match value {
                    Value::String(value) => {
                        self.dispatch_string(value, &directive).map(Value::String)
                    }
                    other => self.traverse(other, &directive),
                }
            })
            .collect::<Result<Vec<_>, MaskError>>()?;
        Ok(record.with_values(values))
    }

    /// Routes a scalar leaf through its category and converts the result back
    /// to the leaf's declared width.
    fn mask_leaf(&self, value: &Value, directive: &Directive<'_>) -> Result<Value, MaskError> {
        if directive.name().is_none() {
            return Ok(value.clone());
        }
        Ok(match *value {
            Value::String(ref value) => Value::String(self.dispatch_string(value, directive)?),
            Value::Int { value, width } => Value::Int {
                value: width.narrow(self.dispatch_int(value, directive)?),
                width,
            },
            Value::Uint { value, width } => Value::Uint {
                value: width.narrow(self.dispatch_uint(value, directive)?),
                width,
            },
            Value::Float { value, width } => Value::Float {
                value: width.narrow(self.dispatch_float(value, directive)?),
                width,
            },
            ref other => other.clone(),
        })
    }
}
