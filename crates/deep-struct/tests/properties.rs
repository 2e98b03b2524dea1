//! Property tests for key resolution and traversal.

use deep_struct::{wrap, Key, Value};
use proptest::prelude::*;

fn key_name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

proptest! {
    #[test]
    fn either_key_kind_reads_the_same_entry(name in key_name(), n in any::<i64>(), symbolic in any::<bool>()) {
        let stored = if symbolic { Key::sym(name.clone()) } else { Key::text(name.clone()) };
        let mut doc: Value = [(stored, Value::Int(n))].into_iter().collect();
        let mut root = wrap(&mut doc).into_map().unwrap();

        prop_assert_eq!(root.get(Key::text(name.clone())).unwrap().as_i64(), Some(n));
        prop_assert_eq!(root.get(Key::sym(name.clone())).unwrap().as_i64(), Some(n));
        prop_assert!(root.has_key(Key::text(name.clone())));
        prop_assert!(root.has_key(Key::sym(name)));
    }

    #[test]
    fn set_then_get_round_trips(name in key_name(), text in ".*", symbolic in any::<bool>()) {
        let mut doc = Value::Map(Default::default());
        let mut root = wrap(&mut doc).into_map().unwrap();
        let key = if symbolic { Key::sym(name) } else { Key::text(name) };

        root.set(key.clone(), text.clone());
        let found = root.get(key.counterpart()).unwrap().to_value();
        prop_assert_eq!(found, Value::Text(text));
        prop_assert_eq!(root.len(), 1);

        root.set(key.counterpart(), 1);
        prop_assert_eq!(root.len(), 1);
    }

    #[test]
    fn iteration_preserves_order_and_restarts(items in prop::collection::vec(any::<i64>(), 0..32)) {
        let mut doc: Value = items.iter().copied().map(Value::Int).collect();
        let mut seq = wrap(&mut doc).into_seq().unwrap();

        let first: Vec<Option<i64>> = seq.iter().map(|item| item.as_i64()).collect();
        let second: Vec<Option<i64>> = seq.iter().map(|item| item.as_i64()).collect();
        let expected: Vec<Option<i64>> = items.iter().copied().map(Some).collect();
        prop_assert_eq!(&first, &expected);
        prop_assert_eq!(first, second);
    }
}
