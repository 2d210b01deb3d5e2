use pretty_assertions::assert_eq;
use protomatch_value::MapKey;

use super::*;
use crate::test_helpers::{ints, point, test_registry};

fn bound(bindings: &Bindings, name: &str) -> Value {
    bindings.get(name).cloned().expect("name is bound")
}

#[test]
fn wildcard_matches_anything_without_binding() {
    let bindings = try_match(&Pattern::wildcard(), &ints(&[1, 2]))
        .expect("no error")
        .expect("matches");
    assert!(bindings.is_empty());
}

#[test]
fn capture_binds_whole_value() {
    let value = ints(&[1, 2]);
    let bindings = try_match(&Pattern::capture("all"), &value)
        .expect("no error")
        .expect("matches");
    assert_eq!(bound(&bindings, "all"), value);
}

#[test]
fn literal_requires_same_kind_and_value() {
    let ten = Pattern::literal(10_i64);
    assert!(try_match(&ten, &Value::Int(10)).expect("ok").is_some());
    assert!(try_match(&ten, &Value::Int(5)).expect("ok").is_none());
    assert!(try_match(&ten, &Value::Float(10.0)).expect("ok").is_none());
    assert!(try_match(&ten, &Value::string("10")).expect("ok").is_none());
}

#[test]
fn literal_never_matches_containers() {
    let empty = Pattern::Literal(Value::sequence(Vec::new()));
    assert!(try_match(&empty, &Value::sequence(Vec::new()))
        .expect("ok")
        .is_none());
}

#[test]
fn record_pattern_checks_type_then_fields() {
    let registry = test_registry();
    let value = point(&registry, 1, 2);

    let by_x = Pattern::record(
        "Point",
        [("x", Pattern::literal(1_i64)), ("y", Pattern::capture("y"))],
    );
    let bindings = try_match(&by_x, &value).expect("ok").expect("matches");
    assert_eq!(bound(&bindings, "y"), Value::Int(2));

    let wrong_x = Pattern::record("Point", [("x", Pattern::literal(9_i64))]);
    assert!(try_match(&wrong_x, &value).expect("ok").is_none());

    let wrong_type = Pattern::record("Node", Vec::<(Name, Pattern)>::new());
    assert!(try_match(&wrong_type, &value).expect("ok").is_none());
    assert!(try_match(&wrong_type, &Value::Int(1)).expect("ok").is_none());
}

#[test]
fn record_pattern_reads_defaults_for_unset_fields() {
    let registry = test_registry();
    let node: Value = registry.default_record("Node").expect("Node").into();

    let pattern = Pattern::record(
        "Node",
        [
            ("label", Pattern::literal("")),
            (
                "child",
                Pattern::record("Node", [("shape", Pattern::capture("shape"))]),
            ),
            ("points", Pattern::sequence(Vec::new())),
        ],
    );
    let bindings = try_match(&pattern, &node).expect("ok").expect("matches");
    let shape = bound(&bindings, "shape");
    assert_eq!(shape.as_enum().map(|e| e.variant.as_str()), Some("NONE"));
}

#[test]
fn unset_oneof_member_matches_its_default() {
    let registry = test_registry();
    let node = registry
        .record("Node")
        .and_then(|b| b.set("name", "n"))
        .expect("Node")
        .into_value();
    let pattern = Pattern::record(
        "Node",
        [("origin", Pattern::record("Point", [("x", Pattern::literal(0_i64))]))],
    );
    assert!(try_match(&pattern, &node).expect("ok").is_some());
}

#[test]
fn undeclared_field_fails_fast() {
    let registry = test_registry();
    let value = point(&registry, 1, 2);
    let pattern = Pattern::record(
        "Point",
        [("x", Pattern::literal(5_i64)), ("z", Pattern::wildcard())],
    );
    assert_eq!(
        try_match(&pattern, &value),
        Err(ValueError::UnknownField {
            type_name: Name::new("Point"),
            field: Name::new("z"),
        })
    );
}

#[test]
fn undeclared_field_on_other_type_is_just_a_mismatch() {
    let registry = test_registry();
    let value = point(&registry, 1, 2);
    let pattern = Pattern::record("Node", [("z", Pattern::wildcard())]);
    assert_eq!(try_match(&pattern, &value), Ok(None));
}

#[test]
fn exact_sequence_requires_equal_length() {
    let pattern = Pattern::sequence([Pattern::capture("a"), Pattern::capture("b")]);
    assert!(try_match(&pattern, &ints(&[1])).expect("ok").is_none());
    assert!(try_match(&pattern, &ints(&[1, 2, 3])).expect("ok").is_none());
    let bindings = try_match(&pattern, &ints(&[1, 2]))
        .expect("ok")
        .expect("matches");
    assert_eq!(bound(&bindings, "a"), Value::Int(1));
    assert_eq!(bound(&bindings, "b"), Value::Int(2));
}

#[test]
fn rest_binds_remaining_suffix() {
    let pattern = Pattern::sequence_rest([Pattern::literal(1_i64)], "rest");
    let bindings = try_match(&pattern, &ints(&[1, 2, 3]))
        .expect("ok")
        .expect("matches");
    assert_eq!(bound(&bindings, "rest"), ints(&[2, 3]));

    let bindings = try_match(&pattern, &ints(&[1]))
        .expect("ok")
        .expect("matches");
    assert_eq!(bound(&bindings, "rest"), ints(&[]));

    assert!(try_match(&pattern, &ints(&[])).expect("ok").is_none());
    assert!(try_match(&pattern, &ints(&[2, 1])).expect("ok").is_none());
}

#[test]
fn star_in_the_middle_matches_head_and_tail() {
    let pattern = Pattern::sequence_star(
        [Pattern::capture("first")],
        Rest::Bind(Name::new("middle")),
        [Pattern::capture("last")],
    );
    let bindings = try_match(&pattern, &ints(&[1, 2, 3, 4]))
        .expect("ok")
        .expect("matches");
    assert_eq!(bound(&bindings, "first"), Value::Int(1));
    assert_eq!(bound(&bindings, "middle"), ints(&[2, 3]));
    assert_eq!(bound(&bindings, "last"), Value::Int(4));
    let order: Vec<&str> = bindings.names().map(Name::as_str).collect();
    assert_eq!(order, vec!["first", "middle", "last"]);

    assert!(try_match(&pattern, &ints(&[1])).expect("ok").is_none());
}

#[test]
fn discarded_star_binds_nothing() {
    let pattern = Pattern::sequence_star(Vec::new(), Rest::Discard, [Pattern::literal(3_i64)]);
    let bindings = try_match(&pattern, &ints(&[1, 2, 3]))
        .expect("ok")
        .expect("matches");
    assert!(bindings.is_empty());
}

#[test]
fn mapping_is_a_subset_match() {
    let value = Value::mapping([
        ("one", Value::Int(1)),
        ("two", Value::Int(2)),
        ("three", Value::Int(3)),
    ]);
    let pattern = Pattern::mapping([("two", Pattern::capture("v"))]);
    let bindings = try_match(&pattern, &value).expect("ok").expect("matches");
    assert_eq!(bindings.len(), 1);
    assert_eq!(bound(&bindings, "v"), Value::Int(2));

    let missing = Pattern::mapping([("four", Pattern::wildcard())]);
    assert!(try_match(&missing, &value).expect("ok").is_none());
}

#[test]
fn mapping_rest_binds_unnamed_entries() {
    let value = Value::mapping([
        ("one", Value::Int(1)),
        ("two", Value::Int(2)),
        ("three", Value::Int(3)),
    ]);
    let pattern = Pattern::mapping_rest([("two", Pattern::literal(2_i64))], "rest");
    let bindings = try_match(&pattern, &value).expect("ok").expect("matches");
    assert_eq!(
        bound(&bindings, "rest"),
        Value::mapping([("one", Value::Int(1)), ("three", Value::Int(3))])
    );
}

#[test]
fn mapping_keys_are_typed() {
    let value = Value::mapping([(MapKey::Int(1), Value::Int(10))]);
    assert!(try_match(&Pattern::mapping([("1", Pattern::wildcard())]), &value)
        .expect("ok")
        .is_none());
    assert!(try_match(&Pattern::mapping([(1_i64, Pattern::wildcard())]), &value)
        .expect("ok")
        .is_some());
}

#[test]
fn or_takes_first_matching_alternative() {
    let pattern = Pattern::or([
        Pattern::sequence([Pattern::capture("x")]),
        Pattern::sequence_rest([Pattern::capture("x")], "more"),
    ]);
    let bindings = try_match(&pattern, &ints(&[7]))
        .expect("ok")
        .expect("matches");
    assert_eq!(bindings.len(), 1);

    let bindings = try_match(&pattern, &ints(&[7, 8]))
        .expect("ok")
        .expect("matches");
    assert_eq!(bound(&bindings, "more"), ints(&[8]));

    assert!(try_match(&pattern, &ints(&[])).expect("ok").is_none());
}

#[test]
fn as_pattern_binds_whole_value_after_inner() {
    let value = ints(&[1, 2]);
    let pattern = Pattern::sequence_rest([Pattern::capture("head")], "tail").bind_as("all");
    let bindings = try_match(&pattern, &value).expect("ok").expect("matches");
    assert_eq!(bound(&bindings, "all"), value);
    assert_eq!(bound(&bindings, "head"), Value::Int(1));
}

#[test]
fn repeated_capture_keeps_later_value() {
    let pattern = Pattern::sequence([Pattern::capture("x"), Pattern::capture("x")]);
    let bindings = try_match(&pattern, &ints(&[1, 2]))
        .expect("ok")
        .expect("matches");
    assert_eq!(bindings.len(), 1);
    assert_eq!(bound(&bindings, "x"), Value::Int(2));
}

/// Tear down a nested sequence pattern one level at a time.
fn dismantle_pattern(mut pattern: Pattern) {
    loop {
        match pattern {
            Pattern::Sequence { mut head, .. } => match head.pop() {
                Some(inner) => pattern = inner,
                None => return,
            },
            _ => return,
        }
    }
}

/// Tear down a nested sequence value one level at a time.
fn dismantle_value(mut value: Value) {
    while let Some(inner) = value.as_sequence().and_then(|items| items.first().cloned()) {
        value = inner;
    }
}

#[test]
fn deeply_nested_pattern_does_not_overflow() {
    let mut pattern = Pattern::capture("leaf");
    let mut value = Value::Int(0);
    for _ in 0..100_000 {
        pattern = Pattern::sequence([pattern]);
        value = Value::sequence(vec![value]);
    }
    let bindings = try_match(&pattern, &value).expect("ok").expect("matches");
    assert_eq!(bound(&bindings, "leaf"), Value::Int(0));

    let mismatch = Value::sequence(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(try_match(&pattern, &mismatch), Ok(None));

    dismantle_pattern(pattern);
    dismantle_value(value);
}
