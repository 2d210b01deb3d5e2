//! Shared test schema, modelled on a typical message set with nesting,
//! repeated fields, maps, an enum, and a oneof.

#![expect(clippy::expect_used, reason = "Tests use expect for brevity")]

use crate::{
    EnumSchema, FieldDecl, FieldKind, MapKeyKind, RecordSchema, SchemaRegistry, SharedRegistry,
};

/// `TestA`, `TestB` (one string field each), enum `Color`, and `TestMessage`.
pub(crate) fn test_registry() -> SharedRegistry {
    let mut registry = SchemaRegistry::new();
    registry
        .add_enum(
            EnumSchema::new("Color", [("UNSPECIFIED", 0), ("RED", 1), ("GREEN", 2)])
                .expect("enum"),
        )
        .expect("add Color");
    registry
        .add_record(
            RecordSchema::new("TestA", vec![FieldDecl::new("value", FieldKind::string())])
                .expect("TestA"),
        )
        .expect("add TestA");
    registry
        .add_record(
            RecordSchema::new("TestB", vec![FieldDecl::new("value", FieldKind::string())])
                .expect("TestB"),
        )
        .expect("add TestB");
    registry
        .add_record(
            RecordSchema::new(
                "TestMessage",
                vec![
                    FieldDecl::new("int_scalar", FieldKind::int()),
                    FieldDecl::new("float_scalar", FieldKind::float()),
                    FieldDecl::new("bool_scalar", FieldKind::bool()),
                    FieldDecl::new("string_scalar", FieldKind::string()),
                    FieldDecl::new("bytes_scalar", FieldKind::bytes()),
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
