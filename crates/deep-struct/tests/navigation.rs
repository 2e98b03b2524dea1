//! Navigation through nested maps and sequences, in place.

use deep_struct::{wrap, Access, Key, NavError, Value};
use serde_json::json;

fn config() -> Value {
    let server: Value = [
        (Key::sym("host"), Value::from("localhost")),
        (Key::sym("port"), Value::Int(8080)),
        (Key::text("tls"), Value::Bool(false)),
    ]
    .into_iter()
    .collect();
    [
        (Key::text("server"), server),
        (
            Key::sym("users"),
            Value::from(json!([{"name": "ada", "admin": true}, {"name": "bob", "admin": false}])),
        ),
        (Key::text("tags"), Value::set_from(["a", "b"])),
    ]
    .into_iter()
    .collect()
}

// ----------------------------------------------------------------- Maps

#[test]
fn reads_either_key_kind() {
    let mut doc = config();
    let mut root = wrap(&mut doc).into_map().unwrap();

    let mut server = root.get(Key::sym("server")).unwrap().into_map().unwrap();
    assert_eq!(server.get("host").unwrap().as_str(), Some("localhost"));
    assert_eq!(server.get(Key::sym("host")).unwrap().as_str(), Some("localhost"));
    assert_eq!(server.get(Key::sym("tls")).unwrap().as_bool(), Some(false));
    assert!(server.get("missing").is_none());
}

#[test]
fn writes_reach_the_callers_structure() {
    let mut doc = config();
    {
        let mut root = wrap(&mut doc).into_map().unwrap();
        let mut server = root.get("server").unwrap().into_map().unwrap();
        server.set("port", 9090);
        server.set("timeout", 30);
    }
    let server = doc.as_map().unwrap()[&Key::text("server")].as_map().unwrap();
    assert_eq!(server[&Key::sym("port")], Value::Int(9090));
    assert_eq!(server[&Key::text("timeout")], Value::Int(30));
    assert_eq!(server.len(), 4);
}

#[test]
fn set_then_get_round_trips() {
    let mut doc = Value::from(json!({}));
    let mut root = wrap(&mut doc).into_map().unwrap();
    root.set(Key::sym("nested"), Value::from(json!({"x": [1, 2]})));
    let mut nested = root.get("nested").unwrap();
    assert!(nested.is_map());
    let mut xs = nested.get("x").unwrap();
    assert_eq!(xs.at(1).unwrap().as_i64(), Some(2));
}

#[test]
fn chained_get_through_wrapped() {
    let mut doc = config();
    let mut root = wrap(&mut doc);
    let mut users = root.get("users").unwrap();
    let mut first = users.at(0).unwrap();
    assert_eq!(first.get(Key::sym("name")).unwrap().as_str(), Some("ada"));
}

// ----------------------------------------------------------------- Accessors

#[test]
fn presence_query_differs_from_has_key() {
    let mut doc = Value::from(json!({"a": 0}));
    let mut root = wrap(&mut doc).into_map().unwrap();
    assert!(root.has_key("a"));
    assert_eq!(root.access("a?", vec![]).unwrap().as_bool(), Some(false));
    assert_eq!(root.access("b?", vec![]).unwrap().as_bool(), Some(false));

    root.set("a", 1);
    assert_eq!(root.access("a?", vec![]).unwrap().as_bool(), Some(true));
}

#[test]
fn bare_member_reads_and_recurses() {
    let mut doc = config();
    let mut root = wrap(&mut doc).into_map().unwrap();
    let server = root.access("server", vec![]).unwrap().into_wrapped().unwrap();
    let mut server = server.into_map().unwrap();
    assert_eq!(server.access("port", vec![]).unwrap().into_wrapped().unwrap().as_i64(), Some(8080));
}

#[test]
fn assignment_accessor() {
    let mut doc = config();
    {
        let mut root = wrap(&mut doc).into_map().unwrap();
        let access = root.access("owner=", vec![Value::from("ops")]).unwrap();
        assert!(access.is_assigned());
        // Assigning an existing symbolic key keeps its representation.
        root.access("users=", vec![Value::Seq(vec![])]).unwrap();
    }
    let root = doc.as_map().unwrap();
    assert_eq!(root[&Key::text("owner")], Value::from("ops"));
    assert_eq!(root[&Key::sym("users")], Value::Seq(vec![]));
    assert!(!root.contains_key(&Key::text("users")));
}

#[test]
fn assignment_arity_mismatch() {
    let mut doc = config();
    let mut root = wrap(&mut doc).into_map().unwrap();
    assert_eq!(
        root.access("owner=", vec![]).unwrap_err(),
        NavError::ArityMismatch {
            member: "owner=".to_string(),
            expected: 1,
            given: 0,
        }
    );
    assert_eq!(
        root.access("owner=", vec![Value::Int(1), Value::Int(2)]).unwrap_err(),
        NavError::ArityMismatch {
            member: "owner=".to_string(),
            expected: 1,
            given: 2,
        }
    );
    assert!(!root.has_key("owner"));
}

#[test]
fn unknown_accessor_is_undefined() {
    let mut doc = config();
    let mut root = wrap(&mut doc).into_map().unwrap();
    let err = root.access("nope", vec![]).unwrap_err();
    assert_eq!(
        err,
        NavError::UndefinedAccessor {
            member: "nope".to_string(),
            target: "map",
        }
    );
    assert_eq!(err.to_string(), "undefined accessor `nope` for map");
}

#[test]
fn native_capabilities_answer_first() {
    let mut doc = Value::from(json!({"keys": "shadowed", "b": 2}));
    let mut root = wrap(&mut doc).into_map().unwrap();
    match root.access("keys", vec![]).unwrap() {
        Access::Keys(keys) => assert_eq!(keys, vec![Key::text("keys"), Key::text("b")]),
        other => panic!("unexpected {other:?}"),
    }
    match root.access("values", vec![]).unwrap() {
        Access::Values(values) => assert_eq!(values, vec![Value::from("shadowed"), Value::Int(2)]),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(root.access("count", vec![]).unwrap().as_count(), Some(2));
}

// ----------------------------------------------------------------- Sequences

#[test]
fn sequence_iteration_wraps_each_element() {
    let mut doc = config();
    let mut root = wrap(&mut doc).into_map().unwrap();
    let mut users = root.get("users").unwrap().into_seq().unwrap();

    let mut names = Vec::new();
    for mut user in &mut users {
        names.push(user.get("name").unwrap().as_str().map(str::to_string));
    }
    assert_eq!(names, vec![Some("ada".to_string()), Some("bob".to_string())]);

    let admins = users
        .iter()
        .filter(|user| user.to_value().as_map().is_some_and(|m| m[&Key::text("admin")] == Value::Bool(true)))
        .count();
    assert_eq!(admins, 1);
}

#[test]
fn sequence_out_of_range() {
    let mut doc = config();
    let mut root = wrap(&mut doc).into_map().unwrap();
    let mut users = root.get("users").unwrap().into_seq().unwrap();
    assert!(matches!(
        users.get(2),
        Err(NavError::IndexOutOfRange { index: 2, len: 2 })
    ));
    assert!(users.set(5, Value::Null).is_err());
}

#[test]
fn sets_are_navigated_as_sequences() {
    let mut doc = config();
    let mut root = wrap(&mut doc).into_map().unwrap();
    let mut tags = root.get("tags").unwrap().into_seq().unwrap();
    assert!(tags.is_set());
    assert_eq!(tags.size(), 2);
    let collected: Vec<String> = tags
        .iter()
        .filter_map(|tag| tag.as_str().map(str::to_string))
        .collect();
    assert_eq!(collected, vec!["a", "b"]);
}
