use crate::{Arena, Map, ID};

#[test]
fn insertion_preserves_order() {
    let mut arena = Arena::new();

    let first = arena.insert("first");
    let second = arena.insert("second");
    let third = arena.insert("third");

    assert_eq!(arena.len(), 3);
    assert_eq!(arena.get(first), Some(&"first"));
    assert_eq!(arena.get(second), Some(&"second"));
    assert_eq!(arena.get(third), Some(&"third"));

    let collected = arena.items().copied().collect::<Vec<_>>();
    assert_eq!(collected, ["first", "second", "third"]);

    let ids = arena.ids().collect::<Vec<_>>();
    assert_eq!(ids, [first, second, third]);
}

#[test]
fn out_of_bound_id_returns_none() {
    let mut arena = Arena::new();
    arena.insert(0);

    assert!(arena.get(ID::new(1)).is_none());
}

#[test]
fn map_rejects_duplicated_key() {
    let mut map = Map::new();

    let existing = map.insert("key".to_string(), 1).unwrap();

    let (reported, rejected) = map.insert("key".to_string(), 2).unwrap_err();

    assert_eq!(reported, existing);
    assert_eq!(rejected, 2);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(existing), Some(&1));
    assert_eq!(map.get_id("key"), Some(existing));
}
