//! Records and the field metadata that drives them.
//!
//! A [`RecordSchema`] is the engine's only view of a record type: for each
//! field it supplies a name, the raw directive string and whether the field is
//! visible outside its defining module. `#[derive(Mask)]` emits one schema per
//! struct as a `static`; schemas can also be written by hand.

use crate::{directive::Directive, error::MaskError, value::Value};

/// Metadata for a single record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name (`"0"`, `"1"`, .. for tuple structs).
    pub name: &'static str,
    /// Raw directive string, empty when the field carries none.
    pub directive: &'static str,
    /// `false` for non-`pub` fields, which are reset to their zero value.
    pub visible: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, directive: &'static str, visible: bool) -> Self {
        Self {
            name,
            directive,
            visible,
        }
    }

    /// Parses the field's directive.
    pub fn directive(&self) -> Directive<'static> {
        Directive::parse(self.directive)
    }
}

/// Field layout of a record type, in declaration order.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordSchema {
    /// Type name, used in error messages and to check rebuilds.
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl RecordSchema {
    /// Looks a field up by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A record value: a schema plus one [`Value`] per field.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    schema: &'static RecordSchema,
    values: Vec<Value>,
}

impl Record {
    /// Builds a record, checking that `values` matches the schema's arity.
    pub fn new(schema: &'static RecordSchema, values: Vec<Value>) -> Result<Self, MaskError> {
        if values.len() != schema.fields.len() {
            return Err(MaskError::UnexpectedShape {
                expected: format!("{} fields for `{}`", schema.fields.len(), schema.name),
                found: format!("{} values", values.len()),
            });
        }
        Ok(Self { schema, values })
    }

    /// Constructor used by `#[derive(Mask)]`, which always emits matching arity.
    #[doc(hidden)]
    #[must_use]
    pub fn from_derive(schema: &'static RecordSchema, values: Vec<Value>) -> Self {
        debug_assert_eq!(values.len(), schema.fields.len());
        Self { schema, values }
    }

    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    /// Field values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterates descriptors alongside their values.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldDescriptor, &Value)> {
        self.schema.fields.iter().zip(&self.values)
    }

    /// Returns the value of the named field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields()
            .find(|(field, _)| field.name == name)
            .map(|(_, value)| value)
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub(crate) fn with_values(&self, values: Vec<Value>) -> Self {
        Self {
            schema: self.schema,
            values,
        }
    }

    pub(crate) fn zeroed(&self) -> Self {
        self.with_values(self.values.iter().map(Value::zeroed).collect())
    }

    /// Unpacks a record value for rebuilding a derived struct.
    #[doc(hidden)]
    pub fn unpack(
        value: Value,
        schema: &'static RecordSchema,
    ) -> Result<FieldValues, MaskError> {
        match value {
            Value::Record(record) if record.schema == schema => Ok(FieldValues {
                name: schema.name,
                values: record.values.into_iter(),
            }),
            Value::Record(record) => Err(MaskError::UnexpectedShape {
                expected: format!("record `{}`", schema.name),
                found: format!("record `{}`", record.schema.name),
            }),
            other => Err(MaskError::unexpected_shape(
                format!("record `{}`", schema.name),
                other.kind(),
            )),
        }
    }
}

/// Field values of a record, handed out in declaration order.
#[doc(hidden)]
#[derive(Debug)]
pub struct FieldValues {
    name: &'static str,
    values: std::vec::IntoIter<Value>,
}

impl FieldValues {
    pub fn next_value(&mut self) -> Result<Value, MaskError> {
        self.values.next().ok_or_else(|| MaskError::UnexpectedShape {
            expected: format!("another field for `{}`", self.name),
            found: "end of record".to_string(),
        })
    }
}
