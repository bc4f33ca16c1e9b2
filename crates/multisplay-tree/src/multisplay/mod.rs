//! Multi-splay tree: an ordered map that simulates a balanced *reference*
//! tree with a forest of splay trees.
//!
//! The reference tree is a red-black tree that is never materialized. Its
//! vertices are partitioned into preferred paths, each stored as one
//! auxiliary splay tree keyed like the map. Auxiliary trees hang off one
//! another through ordinary `p` / `l` / `r` links, with `splay_root` marking
//! where one ends and the next begins, so the whole forest is also a single
//! physical binary search tree. Every node records its reference depth
//! relative to its physical parent, which is enough to answer any query
//! about the reference tree.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `auxiliary` | rotations, splaying, min-depth aggregates |
//! | `preferred` | path switches, reference parent / child queries |
//! | `access` | multi-splay search, leaf attachment |
//! | `rebalance` | virtual rotations, red-black fixup |
//! | [`util`] | validator and printer |

mod access;
mod auxiliary;
pub(crate) mod forest;
mod preferred;
mod rebalance;
pub mod types;
pub mod util;

#[path = "MultisplayMap.rs"]
pub mod multisplay_map;

pub use multisplay_map::{Iter, MultisplayMap};

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::forest::Forest;
    use super::types::Side;
    use super::*;

    fn map_of(keys: impl IntoIterator<Item = u32>) -> MultisplayMap<u32, u32> {
        let mut map = MultisplayMap::new();
        for k in keys {
            map.insert(k, k * 2);
        }
        map.assert_valid().unwrap();
        map
    }

    fn reference_root(forest: &Forest<u32, u32>) -> u32 {
        forest.ref_topmost(forest.root.unwrap())
    }

    fn all_depths(forest: &Forest<u32, u32>) -> Vec<i32> {
        (0..forest.arena.len() as u32)
            .map(|i| forest.depth_of(i))
            .collect()
    }

    fn scrambled(n: u32) -> Vec<u32> {
        (0..n).map(|i| (i * 37) % n).collect()
    }

    #[test]
    fn reference_root_has_depth_one() {
        let mut map = map_of(scrambled(64));
        map.find(&17);
        let forest = map.forest();
        let root = reference_root(forest);
        assert_eq!(forest.depth_of(root), 1);
        assert!(forest.node(root).is_black());
    }

    #[test]
    fn reference_children_are_one_level_down() {
        let mut map = map_of(scrambled(101));
        let len = map.len();
        let forest = map.forest_mut();
        let root = reference_root(forest);
        let mut queue = VecDeque::from([root]);
        let mut visited = 0;
        while let Some(y) = queue.pop_front() {
            visited += 1;
            let depth = forest.depth_of(y);
            let key = forest.node(y).k;
            for side in [Side::Left, Side::Right] {
                let Some(c) = forest.ref_child(y, side) else {
                    continue;
                };
                assert_eq!(forest.depth_of(c), depth + 1);
                match side {
                    Side::Left => assert!(forest.node(c).k < key),
                    Side::Right => assert!(forest.node(c).k > key),
                }
                assert_eq!(forest.ref_parent_link(c), Some((y, side)));
                queue.push_back(c);
            }
        }
        assert_eq!(visited, len);
        assert_eq!(forest.ref_parent(root), None);
        map.assert_valid().unwrap();
    }

    #[test]
    fn reference_queries_keep_depths() {
        let mut map = map_of(scrambled(40));
        let forest = map.forest_mut();
        let before = all_depths(forest);
        for i in 0..40 {
            forest.ref_parent(i);
            forest.ref_left_child(i);
            forest.ref_right_child(i);
        }
        assert_eq!(all_depths(forest), before);
        map.assert_valid().unwrap();
    }

    #[test]
    fn switch_with_direction_marks_preferred_side() {
        let mut map = map_of(1..=15);
        let forest = map.forest_mut();
        let y = reference_root(forest);

        forest.switch_with_direction(y, Side::Left);
        let frame = forest.prepare_switch(y);
        assert!(!forest.node(frame.l.unwrap()).splay_root);
        assert!(forest.node(frame.r.unwrap()).splay_root);

        forest.switch_with_direction(y, Side::Right);
        let frame = forest.prepare_switch(y);
        assert!(forest.node(frame.l.unwrap()).splay_root);
        assert!(!forest.node(frame.r.unwrap()).splay_root);
        map.assert_valid().unwrap();
    }

    #[test]
    fn switch_preferred_toggles() {
        let mut map = map_of(1..=15);
        let forest = map.forest_mut();
        let y = reference_root(forest);
        forest.switch_with_direction(y, Side::Left);

        forest.switch_preferred(y);
        let frame = forest.prepare_switch(y);
        assert!(!forest.node(frame.r.unwrap()).splay_root);

        forest.switch_preferred(y);
        let frame = forest.prepare_switch(y);
        assert!(!forest.node(frame.l.unwrap()).splay_root);
        map.assert_valid().unwrap();
    }

    #[test]
    fn switch_at_path_bottom_prefers_nothing() {
        let mut map = map_of(1..=15);
        let forest = map.forest_mut();
        let leaf = (0..15)
            .find(|&i| forest.ref_left_child(i).is_none() && forest.ref_right_child(i).is_none())
            .unwrap();
        forest.switch_with_direction(leaf, Side::Left);
        let frame = forest.prepare_switch(leaf);
        assert_eq!(frame.l, None);
        assert_eq!(frame.r, None);
        map.assert_valid().unwrap();
    }

    #[test]
    fn virtual_rotations_shift_depths_and_undo() {
        let mut map = map_of(scrambled(31));
        let forest = map.forest_mut();
        let p = reference_root(forest);
        let v = forest.ref_left_child(p).unwrap();
        let inner = forest.ref_right_child(v);
        let outer = forest.ref_left_child(v);
        let sibling = forest.ref_right_child(p);
        let before = all_depths(forest);

        forest.virtual_rotate_right(v, p);
        assert_eq!(forest.depth_of(v), 1);
        assert_eq!(forest.depth_of(p), 2);
        assert_eq!(forest.ref_right_child(v), Some(p));
        assert_eq!(forest.ref_left_child(v), outer);
        assert_eq!(forest.ref_left_child(p), inner);
        assert_eq!(forest.ref_right_child(p), sibling);
        if let Some(outer) = outer {
            assert_eq!(forest.depth_of(outer), before[outer as usize] - 1);
        }
        if let Some(inner) = inner {
            assert_eq!(forest.depth_of(inner), before[inner as usize]);
        }
        if let Some(sibling) = sibling {
            assert_eq!(forest.depth_of(sibling), before[sibling as usize] + 1);
        }

        forest.virtual_rotate_left(p, v);
        assert_eq!(all_depths(forest), before);
        assert_eq!(reference_root(forest), p);
    }
}
