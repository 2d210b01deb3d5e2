//! Shared schema and value builders for integration tests.
//!
//! `TestMessage` mirrors a typical message definition: scalars, a nested
//! message of its own type, repeated scalars and messages, string-keyed maps,
//! and a oneof `choice` over `TestA` and `TestB`.

#![allow(
    dead_code,
    clippy::expect_used,
    reason = "Each test binary uses a subset of the helpers"
)]

use protomatch_engine::value::{
    EnumSchema, FieldDecl, FieldKind, MapKeyKind, RecordSchema, SchemaRegistry, SharedRegistry,
    Value,
};

pub fn registry() -> SharedRegistry {
    let mut registry = SchemaRegistry::new();
    registry
        .add_enum(
            EnumSchema::new("Color", [("UNSPECIFIED", 0), ("RED", 1), ("GREEN", 2)])
                .expect("Color"),
        )
        .expect("add Color");
    for name in ["TestA", "TestB"] {
        registry
            .add_record(
                RecordSchema::new(name, vec![FieldDecl::new("value", FieldKind::string())])
                    .expect("oneof member"),
            )
            .expect("add oneof member");
    }
    registry
        .add_record(
            RecordSchema::new(
                "TestMessage",
                vec![
                    FieldDecl::new("int_scalar", FieldKind::int()),
                    FieldDecl::new("string_scalar", FieldKind::string()),
                    FieldDecl::new("color", FieldKind::enumeration("Color")),
                    FieldDecl::new("nested_msg", FieldKind::record("TestMessage")),
                    FieldDecl::new("int_sequence", FieldKind::sequence(FieldKind::int())),
                    FieldDecl::new(
                        "msg_sequence",
                        FieldKind::sequence(FieldKind::record("TestMessage")),
                    ),
                    FieldDecl::new(
                        "string_to_int",
                        FieldKind::mapping(MapKeyKind::Str, FieldKind::int()),
                    ),
                    FieldDecl::new(
                        "string_to_msg",
                        FieldKind::mapping(MapKeyKind::Str, FieldKind::record("TestMessage")),
                    ),
                    FieldDecl::new("a", FieldKind::record("TestA")).in_oneof("choice"),
                    FieldDecl::new("b", FieldKind::record("TestB")).in_oneof("choice"),
                ],
            )
            .expect("TestMessage"),
        )
        .expect("add TestMessage");
    registry.build().expect("registry builds")
}

/// `TestMessage(<field>=<value>)`
pub fn message_with(registry: &SharedRegistry, field: &str, value: Value) -> Value {
    registry
        .record("TestMessage")
        .and_then(|b| b.set(field, value))
        .expect("TestMessage")
        .into_value()
}

/// `TestMessage(int_scalar=n)`
pub fn message(registry: &SharedRegistry, n: i64) -> Value {
    message_with(registry, "int_scalar", Value::Int(n))
}

/// `TestA(value=..)` or `TestB(value=..)`
pub fn member(registry: &SharedRegistry, type_name: &str, value: &str) -> Value {
    registry
        .record(type_name)
        .and_then(|b| b.set("value", value))
        .expect("oneof member")
        .into_value()
}

pub fn ints(items: &[i64]) -> Value {
    Value::sequence(items.iter().map(|&n| Value::Int(n)).collect())
}
