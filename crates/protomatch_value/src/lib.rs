//! Protomatch Value - structured value model for the protomatch engine.
//!
//! This crate provides:
//! - Runtime value types (`Value`, `RecordValue`, `MapKey`, `EnumValue`, `Heap`)
//! - The schema provider (`SchemaRegistry`, `RecordSchema`, `EnumSchema`,
//!   `FieldKind`) and its sealed handle `SharedRegistry`
//! - Keyword-style record construction (`RecordBuilder`)
//! - Error types (`ValueError`, `SchemaError`)
//!
//! # Defaulting
//!
//! Records never expose absence. Every declared field reads as either its set
//! value or its declared default, so the match engine above this crate does
//! not need a notion of "field missing".
//!
//! # Thread Safety
//!
//! All shared payloads are reference counted with `Arc`, so values and
//! registries are `Send + Sync` and cheap to clone.

mod errors;
mod name;
pub mod schema;
mod stack;
mod value;

#[cfg(test)]
mod test_helpers;

pub use errors::{SchemaError, ValueError};
pub use name::Name;
pub use schema::{
    EnumSchema, FieldDecl, FieldKind, MapKeyKind, RecordSchema, ScalarKind, SchemaRegistry,
    SharedRegistry,
};
pub use stack::ensure_sufficient_stack;
pub use value::{EnumValue, Heap, MapKey, RecordBuilder, RecordValue, Value};
