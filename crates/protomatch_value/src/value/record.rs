//! Schema-typed records.
//!
//! A record stores one optional override per declared field. Reading a field
//! resolves override-or-default: an unset field reads as its declared
//! default, recursively (an unset nested record reads as a fully unset record
//! of its declared type). This holds for oneof members too, so reading the
//! unset side of a oneof yields a default instance rather than an error.
//!
//! Records are immutable once built. Setters return a new record that shares
//! the untouched field values with the original.

#![expect(
    clippy::disallowed_types,
    reason = "Arc<RecordSchema> is shared with the registry"
)]

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{Heap, Value};
use crate::schema::{FieldKind, RecordSchema, ScalarKind, SharedRegistry};
use crate::{Name, ValueError};

/// Record instance: schema, registry handle, and per-field overrides.
#[derive(Clone)]
pub struct RecordValue {
    schema: Arc<RecordSchema>,
    registry: SharedRegistry,
    /// Overrides in schema declaration order; `None` means unset.
    fields: Heap<Vec<Option<Value>>>,
}

impl RecordValue {
    /// A record with every field unset.
    pub(crate) fn empty(schema: Arc<RecordSchema>, registry: SharedRegistry) -> Self {
        let fields = vec![None; schema.fields().len()];
        RecordValue {
            schema,
            registry,
            fields: Heap::new(fields),
        }
    }

    /// The record's type name.
    #[inline]
    pub fn type_name(&self) -> &Name {
        self.schema.name()
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    fn index_of(&self, field: &str) -> Result<usize, ValueError> {
        self.schema
            .field_index(field)
            .ok_or_else(|| self.schema.unknown_field(field))
    }

    /// Read a field, resolving unset fields to their declared default.
    ///
    /// Fails only when `field` is not declared on this record's schema.
    pub fn get_field(&self, field: &str) -> Result<Value, ValueError> {
        let index = self.index_of(field)?;
        self.field_at(index)
    }

    fn field_at(&self, index: usize) -> Result<Value, ValueError> {
        match &self.fields[index] {
            Some(value) => Ok(value.clone()),
            None => self.default_at(index),
        }
    }

    fn default_at(&self, index: usize) -> Result<Value, ValueError> {
        self.registry.default_value(&self.schema.fields()[index].kind)
    }

    /// Returns `true` if the field has been explicitly set.
    pub fn has_field(&self, field: &str) -> Result<bool, ValueError> {
        let index = self.index_of(field)?;
        Ok(self.fields[index].is_some())
    }

    /// Which member of a oneof group is set, if any.
    pub fn which_oneof(&self, group: &str) -> Result<Option<&Name>, ValueError> {
        let members = self
            .schema
            .oneof_members(group)
            .ok_or_else(|| ValueError::UnknownOneof {
                type_name: self.type_name().clone(),
                group: Name::new(group),
            })?;
        Ok(members
            .iter()
            .find(|&&index| self.fields[index].is_some())
            .map(|&index| &self.schema.fields()[index].name))
    }

    /// Explicitly set fields in declaration order.
    pub fn set_fields(&self) -> impl Iterator<Item = (&Name, &Value)> + '_ {
        self.schema
            .fields()
            .iter()
            .zip(self.fields.iter())
            .filter_map(|(decl, slot)| slot.as_ref().map(|value| (&decl.name, value)))
    }

    /// Return a copy with `field` set to `value`.
    ///
    /// The value must conform to the field's declared kind. Setting a oneof
    /// member clears any sibling in the same group.
    pub fn with_field(&self, field: &str, value: Value) -> Result<Self, ValueError> {
        let index = self.index_of(field)?;
        let decl = &self.schema.fields()[index];
        if !value.conforms_to(&decl.kind) {
            return Err(ValueError::KindMismatch {
                type_name: self.type_name().clone(),
                field: decl.name.clone(),
                expected: decl.kind.to_string(),
                got: value.describe_kind(),
            });
        }

        let mut fields: Vec<Option<Value>> = self.fields.to_vec();
        if let Some(group) = &decl.oneof {
            if let Some(members) = self.schema.oneof_members(group) {
                for &sibling in members {
                    fields[sibling] = None;
                }
            }
        }
        fields[index] = Some(value);
        Ok(self.with_storage(fields))
    }

    /// Return a copy with `field` unset.
    pub fn clear_field(&self, field: &str) -> Result<Self, ValueError> {
        let index = self.index_of(field)?;
        let mut fields: Vec<Option<Value>> = self.fields.to_vec();
        fields[index] = None;
        Ok(self.with_storage(fields))
    }

    fn with_storage(&self, fields: Vec<Option<Value>>) -> Self {
        RecordValue {
            schema: Arc::clone(&self.schema),
            registry: self.registry.clone(),
            fields: Heap::new(fields),
        }
    }

    /// Structural equality with defaulting.
    ///
    /// Two unset slots are equal without resolving the default, which keeps
    /// comparison finite for self-referential record types.
    pub(super) fn equals(&self, other: &RecordValue) -> bool {
        if self.type_name() != other.type_name()
            || self.schema.fields().len() != other.schema.fields().len()
        {
            return false;
        }
        for (index, decl) in self.schema.fields().iter().enumerate() {
            let Some(other_index) = other.schema.field_index(&decl.name) else {
                return false;
            };
            let same = match (&self.fields[index], &other.fields[other_index]) {
                (None, None) => true,
                (Some(a), Some(b)) => a.equals(b),
                (Some(set), None) => other
                    .default_at(other_index)
                    .is_ok_and(|default| set.equals(&default)),
                (None, Some(set)) => self
                    .default_at(index)
                    .is_ok_and(|default| default.equals(set)),
            };
            if !same {
                return false;
            }
        }
        true
    }

    /// Hash consistent with `equals`: only fields that differ from their
    /// default contribute.
    pub(super) fn hash_into<H: Hasher>(&self, state: &mut H) {
        self.type_name().hash(state);
        for (index, (decl, slot)) in self.schema.fields().iter().zip(self.fields.iter()).enumerate()
        {
            let Some(value) = slot else { continue };
            if self
                .default_at(index)
                .is_ok_and(|default| default.equals(value))
            {
                continue;
            }
            decl.name.hash(state);
            value.hash(state);
        }
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.type_name());
        for (name, value) in self.set_fields() {
            s.field(name, value);
        }
        s.finish_non_exhaustive()
    }
}

/// Renders set fields keyword-style: `TestMessage(int_scalar=10)`.
impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name())?;
        for (i, (name, value)) in self.set_fields().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}

/// Keyword-style record construction.
///
/// ```text
/// let msg = registry
///     .record("TestMessage")?
///     .set("int_scalar", Value::Int(10))?
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct RecordBuilder {
    record: RecordValue,
}

impl RecordBuilder {
    pub(crate) fn new(record: RecordValue) -> Self {
        RecordBuilder { record }
    }

    /// Set a field, validating its kind and oneof exclusivity.
    pub fn set(self, field: &str, value: impl Into<Value>) -> Result<Self, ValueError> {
        Ok(RecordBuilder {
            record: self.record.with_field(field, value.into())?,
        })
    }

    /// Set an enum field by variant name.
    pub fn set_enum(self, field: &str, variant: &str) -> Result<Self, ValueError> {
        let value = match self.record.schema().field(field).map(|decl| &decl.kind) {
            Some(FieldKind::Scalar(ScalarKind::Enum(enum_name))) => {
                self.record.registry().enum_value(enum_name, variant)?
            }
            Some(_) => {
                return Err(ValueError::KindMismatch {
                    type_name: self.record.type_name().clone(),
                    field: Name::new(field),
                    expected: "enum".to_string(),
                    got: "enum variant name".to_string(),
                })
            }
            None => return Err(self.record.schema().unknown_field(field)),
        };
        self.set(field, value)
    }

    pub fn build(self) -> RecordValue {
        self.record
    }

    /// Finish and wrap in `Value::Record`.
    pub fn into_value(self) -> Value {
        Value::Record(self.record)
    }
}
