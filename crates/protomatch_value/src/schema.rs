//! Schema declarations for record and enum types.
//!
//! The registry is the schema provider the value model reads through: for
//! each record type it knows the declared fields, each field's kind, and
//! oneof group membership. Defaults are derived from field kinds, so the
//! registry is all a record needs to answer any field read.
//!
//! Types are collected into a [`SchemaRegistry`] and sealed with
//! [`SchemaRegistry::build`], which checks cross references (records may be
//! self-referential, so references can only be resolved once every type is
//! known) and hands back a [`SharedRegistry`].

#![expect(
    clippy::disallowed_types,
    reason = "Arc shares immutable schemas between the registry and records"
)]

use rustc_hash::FxHashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::value::{MapKey, RecordBuilder, RecordValue, Value};
use crate::{Name, SchemaError, ValueError};

// Field kinds

/// Kind of a scalar field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Int,
    Float,
    Bool,
    Str,
    Bytes,
    /// Enum scalar, naming the registered enum type.
    Enum(Name),
}

/// Kind of a mapping key. Only integral, boolean, and string keys are allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapKeyKind {
    Int,
    Bool,
    Str,
}

/// Declared kind of a record field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// Nested record, naming the registered record type.
    Record(Name),
    /// Repeated field.
    Sequence(Box<FieldKind>),
    /// Map field.
    Mapping(MapKeyKind, Box<FieldKind>),
}

impl FieldKind {
    pub fn int() -> Self {
        FieldKind::Scalar(ScalarKind::Int)
    }

    pub fn float() -> Self {
        FieldKind::Scalar(ScalarKind::Float)
    }

    pub fn bool() -> Self {
        FieldKind::Scalar(ScalarKind::Bool)
    }

    pub fn string() -> Self {
        FieldKind::Scalar(ScalarKind::Str)
    }

    pub fn bytes() -> Self {
        FieldKind::Scalar(ScalarKind::Bytes)
    }

    pub fn enumeration(enum_name: impl Into<Name>) -> Self {
        FieldKind::Scalar(ScalarKind::Enum(enum_name.into()))
    }

    pub fn record(type_name: impl Into<Name>) -> Self {
        FieldKind::Record(type_name.into())
    }

    pub fn sequence(element: FieldKind) -> Self {
        FieldKind::Sequence(Box::new(element))
    }

    pub fn mapping(key: MapKeyKind, value: FieldKind) -> Self {
        FieldKind::Mapping(key, Box::new(value))
    }
}

impl fmt::Display for MapKeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MapKeyKind::Int => "int",
            MapKeyKind::Bool => "bool",
            MapKeyKind::Str => "str",
        })
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(ScalarKind::Int) => write!(f, "int"),
            FieldKind::Scalar(ScalarKind::Float) => write!(f, "float"),
            FieldKind::Scalar(ScalarKind::Bool) => write!(f, "bool"),
            FieldKind::Scalar(ScalarKind::Str) => write!(f, "str"),
            FieldKind::Scalar(ScalarKind::Bytes) => write!(f, "bytes"),
            FieldKind::Scalar(ScalarKind::Enum(name)) => write!(f, "enum {name}"),
            FieldKind::Record(name) => write!(f, "record {name}"),
            FieldKind::Sequence(element) => write!(f, "sequence<{element}>"),
            FieldKind::Mapping(key, value) => write!(f, "map<{key}, {value}>"),
        }
    }
}

// Declarations

/// A declared record field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: Name,
    pub kind: FieldKind,
    /// The oneof group this field belongs to, if any.
    pub oneof: Option<Name>,
}

impl FieldDecl {
    pub fn new(name: impl Into<Name>, kind: FieldKind) -> Self {
        FieldDecl {
            name: name.into(),
            kind,
            oneof: None,
        }
    }

    /// Place this field in a oneof group.
    #[must_use]
    pub fn in_oneof(mut self, group: impl Into<Name>) -> Self {
        self.oneof = Some(group.into());
        self
    }
}

/// Schema of a record type with O(1) field lookup by name.
#[derive(Clone, Debug)]
pub struct RecordSchema {
    name: Name,
    /// Fields in declaration order.
    fields: Vec<FieldDecl>,
    /// Map from field name to index in `fields`.
    field_indices: FxHashMap<Name, usize>,
    /// Oneof groups in declaration order, with member field indices.
    oneofs: Vec<(Name, Vec<usize>)>,
}

impl RecordSchema {
    /// Create a record schema. Field names must be unique.
    pub fn new(name: impl Into<Name>, fields: Vec<FieldDecl>) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut field_indices = FxHashMap::default();
        let mut oneofs: Vec<(Name, Vec<usize>)> = Vec::new();

        for (index, field) in fields.iter().enumerate() {
            if field_indices.insert(field.name.clone(), index).is_some() {
                return Err(SchemaError::DuplicateField {
                    type_name: name,
                    field: field.name.clone(),
                });
            }
            if let Some(group) = &field.oneof {
                match oneofs.iter_mut().find(|(g, _)| g == group) {
                    Some((_, members)) => members.push(index),
                    None => oneofs.push((group.clone(), vec![index])),
                }
            }
        }

        Ok(RecordSchema {
            name,
            fields,
            field_indices,
            oneofs,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Index of a declared field.
    #[inline]
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.field_indices.get(field).copied()
    }

    pub fn field(&self, field: &str) -> Option<&FieldDecl> {
        self.field_index(field).map(|index| &self.fields[index])
    }

    /// Member field indices of a oneof group.
    pub fn oneof_members(&self, group: &str) -> Option<&[usize]> {
        self.oneofs
            .iter()
            .find(|(g, _)| g.as_str() == group)
            .map(|(_, members)| members.as_slice())
    }

    /// Oneof group names in declaration order.
    pub fn oneof_groups(&self) -> impl Iterator<Item = &Name> + '_ {
        self.oneofs.iter().map(|(group, _)| group)
    }

    pub(crate) fn unknown_field(&self, field: &str) -> ValueError {
        ValueError::UnknownField {
            type_name: self.name.clone(),
            field: Name::new(field),
        }
    }
}

/// Schema of an enum type. The first variant is the default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumSchema {
    name: Name,
    variants: Vec<(Name, i32)>,
}

impl EnumSchema {
    pub fn new<N: Into<Name>>(
        name: impl Into<Name>,
        variants: impl IntoIterator<Item = (N, i32)>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut declared: Vec<(Name, i32)> = Vec::new();
        for (variant, number) in variants {
            let variant = variant.into();
            if declared.iter().any(|(v, _)| *v == variant) {
                return Err(SchemaError::DuplicateVariant {
                    enum_name: name,
                    variant,
                });
            }
            declared.push((variant, number));
        }
        if declared.is_empty() {
            return Err(SchemaError::EmptyEnum(name));
        }
        Ok(EnumSchema {
            name,
            variants: declared,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn variants(&self) -> &[(Name, i32)] {
        &self.variants
    }

    /// Look up a variant's number by name.
    pub fn number_of(&self, variant: &str) -> Option<i32> {
        self.variants
            .iter()
            .find(|(v, _)| v.as_str() == variant)
            .map(|(_, number)| *number)
    }
}

// Registry

/// Collection of record and enum schemas.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    records: FxHashMap<Name, Arc<RecordSchema>>,
    enums: FxHashMap<Name, Arc<EnumSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record type. Type names are shared between records and enums.
    pub fn add_record(&mut self, schema: RecordSchema) -> Result<&mut Self, SchemaError> {
        let name = schema.name().clone();
        if self.is_declared(&name) {
            return Err(SchemaError::DuplicateType(name));
        }
        self.records.insert(name, Arc::new(schema));
        Ok(self)
    }

    /// Register an enum type.
    pub fn add_enum(&mut self, schema: EnumSchema) -> Result<&mut Self, SchemaError> {
        let name = schema.name().clone();
        if self.is_declared(&name) {
            return Err(SchemaError::DuplicateType(name));
        }
        self.enums.insert(name, Arc::new(schema));
        Ok(self)
    }

    fn is_declared(&self, name: &str) -> bool {
        self.records.contains_key(name) || self.enums.contains_key(name)
    }

    /// Seal the registry after checking that every referenced type exists.
    pub fn build(self) -> Result<SharedRegistry, SchemaError> {
        // Sorted so the reported error does not depend on hash order.
        let mut records: Vec<&Arc<RecordSchema>> = self.records.values().collect();
        records.sort_by(|a, b| a.name().cmp(b.name()));

        for record in records {
            for field in record.fields() {
                let missing = match innermost(&field.kind) {
                    FieldKind::Record(name) if !self.records.contains_key(name.as_str()) => {
                        Some(name)
                    }
                    FieldKind::Scalar(ScalarKind::Enum(name))
                        if !self.enums.contains_key(name.as_str()) =>
                    {
                        Some(name)
                    }
                    _ => None,
                };
                if let Some(referenced) = missing {
                    return Err(SchemaError::UnknownReference {
                        type_name: record.name().clone(),
                        field: field.name.clone(),
                        referenced: referenced.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            records = self.records.len(),
            enums = self.enums.len(),
            "schema registry sealed"
        );
        Ok(SharedRegistry(Arc::new(self)))
    }

    pub fn record_schema(&self, type_name: &str) -> Option<&Arc<RecordSchema>> {
        self.records.get(type_name)
    }

    pub fn enum_schema(&self, enum_name: &str) -> Option<&Arc<EnumSchema>> {
        self.enums.get(enum_name)
    }
}

/// Strip sequence/mapping wrappers down to the element kind.
fn innermost(kind: &FieldKind) -> &FieldKind {
    match kind {
        FieldKind::Sequence(element) | FieldKind::Mapping(_, element) => innermost(element),
        other => other,
    }
}

/// Sealed, shareable schema registry.
///
/// Records keep a handle to the registry they were built from, so unset
/// nested record fields can be defaulted on read.
#[derive(Clone, Debug)]
pub struct SharedRegistry(Arc<SchemaRegistry>);

impl Deref for SharedRegistry {
    type Target = SchemaRegistry;

    #[inline]
    fn deref(&self) -> &SchemaRegistry {
        &self.0
    }
}

impl SharedRegistry {
    /// Start building a record of the given type.
    pub fn record(&self, type_name: &str) -> Result<RecordBuilder, ValueError> {
        self.default_record(type_name).map(RecordBuilder::new)
    }

    /// A record of the given type with every field unset.
    pub fn default_record(&self, type_name: &str) -> Result<RecordValue, ValueError> {
        let schema = self
            .record_schema(type_name)
            .ok_or_else(|| ValueError::UnknownType(Name::new(type_name)))?;
        Ok(RecordValue::empty(Arc::clone(schema), self.clone()))
    }

    /// An enum scalar for a declared variant.
    pub fn enum_value(&self, enum_name: &str, variant: &str) -> Result<Value, ValueError> {
        let schema = self
            .enum_schema(enum_name)
            .ok_or_else(|| ValueError::UnknownType(Name::new(enum_name)))?;
        let number = schema
            .number_of(variant)
            .ok_or_else(|| ValueError::UnknownEnumVariant {
                enum_name: schema.name().clone(),
                variant: Name::new(variant),
            })?;
        Ok(Value::enumeration(schema.name().clone(), Name::new(variant), number))
    }

    /// The declared default of a field kind.
    ///
    /// Scalars default to their zero value, enums to their first variant,
    /// sequences and mappings to empty, records to a fully unset record.
    pub fn default_value(&self, kind: &FieldKind) -> Result<Value, ValueError> {
        Ok(match kind {
            FieldKind::Scalar(scalar) => match scalar {
                ScalarKind::Int => Value::Int(0),
                ScalarKind::Float => Value::Float(0.0),
                ScalarKind::Bool => Value::Bool(false),
                ScalarKind::Str => Value::string(""),
                ScalarKind::Bytes => Value::bytes(Vec::new()),
                ScalarKind::Enum(enum_name) => {
                    let schema = self
                        .enum_schema(enum_name)
                        .ok_or_else(|| ValueError::UnknownType(enum_name.clone()))?;
                    let (variant, number) = &schema.variants()[0];
                    Value::enumeration(schema.name().clone(), variant.clone(), *number)
                }
            },
            FieldKind::Record(type_name) => Value::Record(self.default_record(type_name)?),
            FieldKind::Sequence(_) => Value::sequence(Vec::new()),
            FieldKind::Mapping(..) => Value::mapping(std::iter::empty::<(MapKey, Value)>()),
        })
    }
}
