//! Error types for the value model and schema registry.
//!
//! `ValueError` covers failures reading or writing a record through its
//! schema. `SchemaError` covers failures while sealing a `SchemaRegistry`.
//! Field absence is never an error: unset fields read as their default.

use crate::Name;

/// Failure while reading or writing a structured value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// A field name that is not declared on the record's schema.
    #[error("no field `{field}` on record type `{type_name}`")]
    UnknownField { type_name: Name, field: Name },

    /// A oneof group name that is not declared on the record's schema.
    #[error("no oneof group `{group}` on record type `{type_name}`")]
    UnknownOneof { type_name: Name, group: Name },

    /// A record or enum type that is not registered.
    #[error("unknown type `{0}`")]
    UnknownType(Name),

    /// An enum variant name that the enum does not declare.
    #[error("enum `{enum_name}` has no variant `{variant}`")]
    UnknownEnumVariant { enum_name: Name, variant: Name },

    /// A value whose shape does not conform to the field declaration.
    #[error("field `{type_name}.{field}` expects {expected}, got {got}")]
    KindMismatch {
        type_name: Name,
        field: Name,
        expected: String,
        got: String,
    },
}

/// Failure while building a schema registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("type `{0}` is declared more than once")]
    DuplicateType(Name),

    #[error("field `{field}` is declared more than once on `{type_name}`")]
    DuplicateField { type_name: Name, field: Name },

    #[error("enum `{0}` declares no variants")]
    EmptyEnum(Name),

    #[error("variant `{variant}` is declared more than once on enum `{enum_name}`")]
    DuplicateVariant { enum_name: Name, variant: Name },

    /// A field refers to a record or enum type nobody registered.
    #[error("field `{type_name}.{field}` refers to unknown type `{referenced}`")]
    UnknownReference {
        type_name: Name,
        field: Name,
        referenced: Name,
    },
}
