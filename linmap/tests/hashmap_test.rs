use linmap::{HashMap, MapError, ResizePolicy, TombstonePolicy};

#[test]
fn test_insert_and_get() {
    let mut map = HashMap::new();
    assert_eq!(map.insert("a", 1), Ok(None));
    assert_eq!(map.insert("b", 2), Ok(None));
    assert_eq!(map.get(&"a"), Ok(&1));
    assert_eq!(map.get(&"b"), Ok(&2));
    assert_eq!(map.get(&"c"), Err(MapError::KeyNotFound));
}

#[test]
fn test_insert_replace() {
    let mut map = HashMap::new();
    assert_eq!(map.insert(1, 10), Ok(None));
    assert_eq!(map.insert(1, 20), Ok(Some(10)));
    assert_eq!(map.insert(1, 30), Ok(Some(20)));
    assert_eq!(map.get(&1), Ok(&30));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_delete() {
    let mut map = HashMap::new();
    map.set(1, 100).unwrap();
    map.set(2, 200).unwrap();

    assert_eq!(map.delete(&1), Ok(100));
    assert_eq!(map.get(&1), Err(MapError::KeyNotFound));
    assert_eq!(map.delete(&1), Err(MapError::KeyNotFound));
    assert_eq!(map.get(&2), Ok(&200));
}

#[test]
fn test_delete_never_inserted() {
    let mut map: HashMap<i32, i32> = HashMap::new();
    assert_eq!(map.delete(&1), Err(MapError::KeyNotFound));
    assert!(map.is_empty());
}

#[test]
fn test_remove_entry() {
    let mut map = HashMap::new();
    map.set(String::from("k"), 7).unwrap();
    assert_eq!(map.remove_entry("k"), Ok((String::from("k"), 7)));
    assert_eq!(map.remove_entry("k"), Err(MapError::KeyNotFound));
}

#[test]
fn test_contains_key() {
    let mut map = HashMap::new();
    map.set(42, "hello").unwrap();
    assert!(map.contains_key(&42));
    assert!(!map.contains_key(&99));
}

#[test]
fn test_get_or_default_leaves_map_untouched() {
    let mut map = HashMap::new();
    map.set(1, "one").unwrap();
    let capacity = map.capacity();

    assert_eq!(map.get_or_default(&7, &"custom value"), &"custom value");
    assert_eq!(map.get_or_default(&1, &"custom value"), &"one");
    assert_eq!(map.len(), 1);
    assert_eq!(map.capacity(), capacity);
    assert!(!map.contains_key(&7));
}

#[test]
fn test_len_and_is_empty() {
    let mut map = HashMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);

    map.set(1, 1).unwrap();
    map.set(2, 2).unwrap();
    assert!(!map.is_empty());
    assert_eq!(map.len(), 2);

    map.delete(&1).unwrap();
    assert_eq!(map.len(), 1);
}

#[test]
fn test_clear_keeps_capacity() {
    let mut map = HashMap::new();
    for i in 0..100 {
        map.set(i, i * 10).unwrap();
    }
    map.delete(&3).unwrap();
    assert_eq!(map.len(), 99);
    let capacity = map.capacity();

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.capacity(), capacity);
    assert_eq!(map.tombstones(), 0);
    for i in 0..100 {
        assert_eq!(map.get(&i), Err(MapError::KeyNotFound));
    }

    map.set(5, 50).unwrap();
    assert_eq!(map.get(&5), Ok(&50));
}

#[test]
fn test_iter() {
    let mut map = HashMap::new();
    map.set(1, 10).unwrap();
    map.set(2, 20).unwrap();
    map.set(3, 30).unwrap();
    map.delete(&2).unwrap();

    let mut entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    entries.sort_by_key(|(k, _)| *k);
    assert_eq!(entries, vec![(1, 10), (3, 30)]);
    assert_eq!(map.iter().len(), 2);
}

#[test]
fn test_iter_is_restartable() {
    let map: HashMap<u32, u32> = (0..50).map(|i| (i, i)).collect();
    let first: Vec<_> = map.iter().collect();
    let second: Vec<_> = map.iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 50);
}

#[test]
fn test_keys_and_values() {
    let mut map = HashMap::new();
    map.set(1, 10).unwrap();
    map.set(2, 20).unwrap();

    let mut keys: Vec<_> = map.keys().copied().collect();
    keys.sort();
    assert_eq!(keys, vec![1, 2]);

    let mut values: Vec<_> = map.values().copied().collect();
    values.sort();
    assert_eq!(values, vec![10, 20]);
}

#[test]
fn test_iter_mut_and_values_mut() {
    let mut map: HashMap<u32, u32> = (0..10).map(|i| (i, i)).collect();
    for (k, v) in &mut map {
        *v += k;
    }
    for v in map.values_mut() {
        *v *= 10;
    }
    for i in 0..10 {
        assert_eq!(map.get(&i), Ok(&(i * 20)));
    }
}

#[test]
fn test_into_iter() {
    let map: HashMap<u32, String> = (0..5).map(|i| (i, i.to_string())).collect();
    let mut owned: Vec<_> = map.into_iter().collect();
    owned.sort();
    assert_eq!(
        owned,
        (0..5).map(|i| (i, i.to_string())).collect::<Vec<_>>()
    );
}

#[test]
fn test_retain() {
    let mut map: HashMap<u32, u32> = (0..20).map(|i| (i, i)).collect();
    map.retain(|k, _| k % 2 == 0);
    assert_eq!(map.len(), 10);
    assert_eq!(map.tombstones(), 10);
    for i in 0..20 {
        assert_eq!(map.contains_key(&i), i % 2 == 0);
    }
}

#[test]
fn test_many_entries() {
    let mut map = HashMap::new();
    for i in 0..10_000 {
        map.set(i, i * 3).unwrap();
    }
    for i in 0..10_000 {
        assert_eq!(map.get(&i), Ok(&(i * 3)));
    }
    assert_eq!(map.len(), 10_000);
    assert!(map.capacity().is_power_of_two());
    assert!(map.len() as f64 <= map.capacity() as f64 * 0.65);
}

#[test]
fn test_string_keys() {
    let mut map = HashMap::new();
    map.set("hello".to_string(), 1).unwrap();
    map.set("world".to_string(), 2).unwrap();
    assert_eq!(map.get("hello"), Ok(&1));
    assert_eq!(map.get(&"world".to_string()), Ok(&2));
}

#[test]
fn test_index() {
    let map = HashMap::from([("a", 1), ("b", 2)]);
    assert_eq!(map["a"], 1);
    assert_eq!(map["b"], 2);
}

#[test]
#[should_panic(expected = "key not found")]
fn test_index_missing_panics() {
    let map = HashMap::from([("a", 1)]);
    let _value = map["z"];
}

#[test]
fn test_with_capacity_does_not_grow() {
    let mut map = HashMap::with_capacity(1000);
    let capacity = map.capacity();
    for i in 0..1000 {
        map.set(i, i).unwrap();
    }
    assert_eq!(map.capacity(), capacity);
}

#[test]
fn test_custom_load_factor() {
    let policy = ResizePolicy::new().with_load_factor(0.25).unwrap();
    let mut map = HashMap::with_policy(policy);
    map.set(1, 1).unwrap();
    map.set(2, 2).unwrap();
    assert_eq!(map.capacity(), 8);
    map.set(3, 3).unwrap();
    assert_eq!(map.capacity(), 16);
    assert_eq!(map.policy().load_factor(), 0.25);
}

#[test]
fn test_policy_survives_clone() {
    let policy = ResizePolicy::new().with_tombstones(TombstonePolicy::PurgeOnLoad);
    let mut map = HashMap::with_policy(policy);
    map.set(1, vec![1, 2, 3]).unwrap();
    let copy = map.clone();
    assert_eq!(copy.policy().tombstones(), TombstonePolicy::PurgeOnLoad);
    assert_eq!(copy, map);
}

#[test]
fn test_debug_format() {
    let map = HashMap::from([(1, "one")]);
    assert_eq!(format!("{map:?}"), r#"{1: "one"}"#);
}

#[test]
fn test_extend_last_write_wins() {
    let mut map = HashMap::new();
    map.extend([(1, "a"), (2, "b"), (1, "c")]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1), Ok(&"c"));

    let more = [(3, "d")];
    map.extend(more.iter().map(|(k, v)| (k, v)));
    assert_eq!(map.get(&3), Ok(&"d"));
}

#[test]
fn test_drop_cleanup() {
    let mut map = HashMap::new();
    for i in 0..5000 {
        map.set(i, format!("value_{}", i)).unwrap();
    }
    for i in 0..2500 {
        map.delete(&i).unwrap();
    }
    drop(map);
}

#[test]
fn test_reserve_too_large_is_an_error() {
    let mut map = HashMap::from([(1, "one")]);
    assert_eq!(map.reserve(usize::MAX), Err(MapError::CapacityOverflow));
    assert_eq!(map.get(&1), Ok(&"one"));
    assert_eq!(map.capacity(), 8);

    assert_eq!(map.try_extend([(2, "two")]), Ok(()));
    assert_eq!(map.len(), 2);
}
