use multisplay_tree::{MultisplayError, MultisplayMap};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

fn height_bound(n: usize) -> f64 {
    2.0 * (n as f64).log2() + 2.0
}

#[test]
fn multisplay_map_smoke_matrix() {
    let mut map = MultisplayMap::<i32, i32>::new();
    for k in [5, 3, 8, 1, 4, 7, 9] {
        assert_eq!(map.insert(k, k * 100), None);
        map.assert_valid().unwrap();
    }

    assert_eq!(map.find(&4), Some(&400));
    assert_eq!(map.find(&6), None);
    map.assert_valid().unwrap();

    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(map.len(), 7);
}

#[test]
fn multisplay_map_overwrite_matrix() {
    let mut map = MultisplayMap::new();
    assert_eq!(map.insert(10, "a"), None);
    assert_eq!(map.insert(10, "b"), Some("a"));

    assert_eq!(map.find(&10), Some(&"b"));
    assert_eq!(map.len(), 1);
    map.assert_valid().unwrap();
}

#[test]
fn multisplay_map_overwrite_among_many_matrix() {
    let mut map = MultisplayMap::new();
    for k in 0..50 {
        map.insert(k, k);
    }
    for k in (0..50).step_by(7) {
        assert_eq!(map.insert(k, -k), Some(k));
        map.assert_valid().unwrap();
    }
    assert_eq!(map.len(), 50);
    for k in 0..50 {
        let expected = if k % 7 == 0 { -k } else { k };
        assert_eq!(map.find(&k), Some(&expected));
    }
}

#[test]
fn multisplay_map_sequential_height_matrix() {
    let mut map = MultisplayMap::new();
    for k in 0..1000u32 {
        map.insert(k, k);
    }
    map.assert_valid().unwrap();
    assert_eq!(map.len(), 1000);
    assert!((map.height() as f64) <= height_bound(1000));

    for k in 0..1000u32 {
        assert_eq!(map.find(&k), Some(&k));
    }
    map.assert_valid().unwrap();
    assert!((map.height() as f64) <= height_bound(1000));
}

#[test]
fn multisplay_map_descending_matrix() {
    let mut map = MultisplayMap::new();
    for k in (0..300i64).rev() {
        map.insert(k, k.to_string());
        map.assert_valid().unwrap();
    }
    assert!((map.height() as f64) <= height_bound(300));
    assert_eq!(map.first_key_value(), Some((&0, &"0".to_string())));
    assert_eq!(map.last_key_value(), Some((&299, &"299".to_string())));
}

#[test]
fn multisplay_map_random_matrix() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x5eed);
    let mut map = MultisplayMap::new();
    let mut expected = std::collections::BTreeMap::new();
    for _ in 0..500 {
        let k: u32 = rng.gen_range(0..2000);
        let v: u32 = rng.gen();
        assert_eq!(map.insert(k, v), expected.insert(k, v));
        map.assert_valid().unwrap();

        let probe: u32 = rng.gen_range(0..2000);
        assert_eq!(map.find(&probe), expected.get(&probe));
        map.assert_valid().unwrap();
    }
    assert_eq!(map.len(), expected.len());
    assert!((map.height() as f64) <= height_bound(map.len()));
    assert!(map.iter().eq(expected.iter()));
}

#[test]
fn multisplay_map_find_mut_matrix() {
    let mut map = MultisplayMap::new();
    map.insert("x".to_string(), 1);
    map.insert("y".to_string(), 2);
    if let Some(v) = map.find_mut(&"x".to_string()) {
        *v += 10;
    }
    assert_eq!(map.find(&"x".to_string()), Some(&11));
    assert!(map.contains_key(&"y".to_string()));
    assert!(!map.contains_key(&"z".to_string()));
    assert_eq!(map.find_mut(&"z".to_string()), None);
    map.assert_valid().unwrap();
}

#[test]
fn multisplay_map_iteration_matrix() {
    let mut map = MultisplayMap::new();
    assert_eq!(map.iter().next(), None);
    assert_eq!(map.first_key_value(), None);

    for k in [40, 10, 30, 20, 50] {
        map.insert(k, k / 10);
    }
    map.find(&30);

    let forward: Vec<(i32, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(forward, vec![(10, 1), (20, 2), (30, 3), (40, 4), (50, 5)]);

    let backward: Vec<i32> = map.keys().rev().copied().collect();
    assert_eq!(backward, vec![50, 40, 30, 20, 10]);

    let values: Vec<i32> = map.values().copied().collect();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);

    let mut it = map.iter();
    assert_eq!(it.len(), 5);
    assert_eq!(it.next(), Some((&10, &1)));
    assert_eq!(it.next_back(), Some((&50, &5)));
    assert_eq!(it.len(), 3);
    assert_eq!(it.next(), Some((&20, &2)));
    assert_eq!(it.next_back(), Some((&40, &4)));
    assert_eq!(it.next(), Some((&30, &3)));
    assert_eq!(it.next(), None);
    assert_eq!(it.next_back(), None);

    let mut count = 0;
    for (k, v) in &map {
        assert_eq!(k / 10, *v);
        count += 1;
    }
    assert_eq!(count, 5);
}

#[test]
fn multisplay_map_custom_comparator_matrix() {
    let mut map = MultisplayMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    for k in [3, 1, 4, 1, 5, 9, 2, 6] {
        map.insert(k, ());
        map.assert_valid().unwrap();
    }
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, vec![9, 6, 5, 4, 3, 2, 1]);
    assert_eq!(map.find(&5), Some(&()));
}

#[test]
fn multisplay_map_remove_not_implemented_matrix() {
    let mut map = MultisplayMap::new();
    map.insert(1, 1);
    assert_eq!(map.remove(&1), Err(MultisplayError::NotImplemented("remove")));
    assert_eq!(
        MultisplayError::NotImplemented("remove").to_string(),
        "NOT_IMPLEMENTED: remove"
    );
    assert_eq!(map.find(&1), Some(&1));
}

#[test]
fn multisplay_map_clear_and_reuse_matrix() {
    let mut map: MultisplayMap<u8, u8> = (0..20).map(|k| (k, k)).collect();
    assert_eq!(map.len(), 20);
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.height(), 0);
    assert_eq!(map.find(&3), None);
    map.assert_valid().unwrap();

    map.extend([(7, 1), (3, 2)]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.find(&3), Some(&2));
    map.assert_valid().unwrap();
}

#[test]
fn multisplay_map_clone_is_independent_matrix() {
    let mut a = MultisplayMap::new();
    for k in 0..10 {
        a.insert(k, k);
    }
    let mut b = a.clone();
    b.insert(3, 300);
    assert_eq!(a.find(&3), Some(&3));
    assert_eq!(b.find(&3), Some(&300));
}

#[test]
fn multisplay_map_debug_matrix() {
    let mut map = MultisplayMap::new();
    assert_eq!(format!("{map:?}"), "∅");
    map.insert(1, "a");
    assert_eq!(format!("{map:?}"), "Node[0]* black d=1 m=0 { 1 = \"a\" }\nL=∅\nR=∅");
}
