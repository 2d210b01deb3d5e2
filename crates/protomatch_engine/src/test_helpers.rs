//! Small schema for unit tests: a `Point`, a `Shape` enum, and a `Node` that
//! nests itself and carries a oneof.

#![expect(clippy::expect_used, reason = "Tests use expect for brevity")]

use protomatch_value::{
    EnumSchema, FieldDecl, FieldKind, MapKeyKind, RecordSchema, SchemaRegistry, SharedRegistry,
    Value,
};

pub(crate) fn test_registry() -> SharedRegistry {
    let mut registry = SchemaRegistry::new();
    registry
        .add_enum(
            EnumSchema::new("Shape", [("NONE", 0), ("CIRCLE", 1), ("SQUARE", 2)]).expect("Shape"),
        )
        .expect("add Shape");
    registry
        .add_record(
            RecordSchema::new(
                "Point",
                vec![
                    FieldDecl::new("x", FieldKind::int()),
                    FieldDecl::new("y", FieldKind::int()),
                ],
            )
            .expect("Point"),
        )
        .expect("add Point");
    registry
        .add_record(
            RecordSchema::new(
                "Node",
                vec![
                    FieldDecl::new("label", FieldKind::string()),
                    FieldDecl::new("shape", FieldKind::enumeration("Shape")),
                    FieldDecl::new("child", FieldKind::record("Node")),
                    FieldDecl::new("points", FieldKind::sequence(FieldKind::record("Point"))),
                    FieldDecl::new("tags", FieldKind::mapping(MapKeyKind::Str, FieldKind::int())),
                    FieldDecl::new("origin", FieldKind::record("Point")).in_oneof("anchor"),
                    FieldDecl::new("name", FieldKind::string()).in_oneof("anchor"),
                ],
            )
            .expect("Node"),
        )
        .expect("add Node");
    registry.build().expect("registry builds")
}

pub(crate) fn point(registry: &SharedRegistry, x: i64, y: i64) -> Value {
    registry
        .record("Point")
        .and_then(|b| b.set("x", Value::Int(x)))
        .and_then(|b| b.set("y", Value::Int(y)))
        .expect("Point")
        .into_value()
}

pub(crate) fn ints(items: &[i64]) -> Value {
    Value::sequence(items.iter().map(|&n| Value::Int(n)).collect())
}
