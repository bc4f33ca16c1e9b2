//! The multi-splay access protocol.
//!
//! A search descends the physical forest as one binary search tree. Each
//! time it crosses into a lower auxiliary tree it records the node of the
//! upper tree that owns the crossed reference edge: the deeper of the key's
//! in-tree predecessor and successor. Replaying those switches from the
//! deepest up merges the whole root-to-target path into the top auxiliary
//! tree, and a final splay lifts the target to the physical root.

use std::cmp::Ordering;

use crate::trace::{debug_log, trace_log};

use super::forest::Forest;
use super::types::{MultisplayNode, Side};

/// Result of a non-mutating descent for a key.
pub(crate) struct Probe {
    pub found: Option<u32>,
    /// Reference edges to make preferred, shallowest first.
    pub switches: Vec<(u32, Side)>,
}

/// Result of a non-mutating descent that also tracks the key's neighbours.
///
/// `x` is the largest key below the searched one, `z` the smallest above,
/// each with its absolute reference depth.
pub(crate) struct ParentProbe {
    pub found: Option<u32>,
    pub x: Option<(u32, i32)>,
    pub z: Option<(u32, i32)>,
}

/// The deeper of two `(node, absolute depth)` candidates.
#[inline]
pub(crate) fn deeper(a: Option<(u32, i32)>, b: Option<(u32, i32)>) -> Option<(u32, i32)> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a.1 > b.1 { a } else { b }),
        (a, b) => a.or(b),
    }
}

impl<K, V> Forest<K, V> {
    pub(crate) fn find_and_record_switches<C>(&self, key: &K, comparator: &C) -> Probe
    where
        C: Fn(&K, &K) -> Ordering,
    {
        let mut switches = Vec::new();
        let mut pred: Option<(u32, i32)> = None;
        let mut succ: Option<(u32, i32)> = None;
        let mut depth = 0;
        let mut curr = self.root;
        while let Some(c) = curr {
            let node = self.node(c);
            depth += node.delta_ref_depth;
            if node.splay_root && node.p.is_some() {
                let Some((pivot, _)) = deeper(pred, succ) else {
                    unreachable!("multi_splay: boundary at {c} without an upper neighbour");
                };
                let side = match comparator(key, &self.node(pivot).k) {
                    Ordering::Less => Side::Left,
                    _ => Side::Right,
                };
                trace_log!(pivot, ?side, "multi_splay: boundary crossed");
                switches.push((pivot, side));
                pred = None;
                succ = None;
            }
            match comparator(key, &node.k) {
                Ordering::Equal => {
                    return Probe {
                        found: Some(c),
                        switches,
                    }
                }
                Ordering::Less => {
                    succ = Some((c, depth));
                    curr = node.l;
                }
                Ordering::Greater => {
                    pred = Some((c, depth));
                    curr = node.r;
                }
            }
        }
        Probe {
            found: None,
            switches,
        }
    }

    /// Replays recorded switches bottom-up and splays `found` to the root.
    fn splay_path(&mut self, found: u32, switches: &[(u32, Side)]) {
        for &(pivot, side) in switches.iter().rev() {
            self.switch_with_direction(pivot, side);
        }
        self.splay(found, None);
        debug_assert_eq!(self.root, Some(found));
    }

    /// Locates `key` and, when present, makes it the physical root with the
    /// whole access path in one auxiliary tree. A miss leaves the forest
    /// untouched.
    pub(crate) fn multi_splay<C>(&mut self, key: &K, comparator: &C) -> Option<u32>
    where
        C: Fn(&K, &K) -> Ordering,
    {
        let probe = self.find_and_record_switches(key, comparator);
        debug_log!(
            hit = probe.found.is_some(),
            switches = probe.switches.len(),
            "multi_splay"
        );
        let found = probe.found?;
        self.splay_path(found, &probe.switches);
        Some(found)
    }

    /// [`Forest::multi_splay`] for a node that is already known.
    pub(crate) fn multi_splay_node<C>(&mut self, idx: u32, comparator: &C)
    where
        C: Fn(&K, &K) -> Ordering,
    {
        let probe = self.find_and_record_switches(&self.node(idx).k, comparator);
        debug_assert_eq!(probe.found, Some(idx));
        self.splay_path(idx, &probe.switches);
    }

    /// Plain descent that remembers the neighbours a missing key would sit
    /// between. The deeper of them is the reference parent of a new leaf.
    pub(crate) fn find_with_parents<C>(&self, key: &K, comparator: &C) -> ParentProbe
    where
        C: Fn(&K, &K) -> Ordering,
    {
        let mut probe = ParentProbe {
            found: None,
            x: None,
            z: None,
        };
        let mut depth = 0;
        let mut curr = self.root;
        while let Some(c) = curr {
            let node = self.node(c);
            depth += node.delta_ref_depth;
            match comparator(key, &node.k) {
                Ordering::Equal => {
                    probe.found = Some(c);
                    break;
                }
                Ordering::Less => {
                    probe.z = Some((c, depth));
                    curr = node.l;
                }
                Ordering::Greater => {
                    probe.x = Some((c, depth));
                    curr = node.r;
                }
            }
        }
        probe
    }

    /// Hangs a new red leaf at the empty physical slot for `key`, as the top
    /// of its own auxiliary tree at absolute reference depth `depth`.
    pub(crate) fn attach_leaf<C>(&mut self, key: K, value: V, depth: i32, comparator: &C) -> u32
    where
        C: Fn(&K, &K) -> Ordering,
    {
        let Some(mut curr) = self.root else {
            unreachable!("attach_leaf: empty forest");
        };
        let mut curr_depth = self.node(curr).delta_ref_depth;
        let side = loop {
            let side = match comparator(&key, &self.node(curr).k) {
                Ordering::Less => Side::Left,
                _ => Side::Right,
            };
            match self.node(curr).child(side) {
                Some(c) => {
                    curr = c;
                    curr_depth += self.node(c).delta_ref_depth;
                }
                None => break side,
            }
        };
        let mut node = MultisplayNode::new(key, value);
        node.p = Some(curr);
        node.delta_ref_depth = depth - curr_depth;
        let idx = self.push(node);
        self.set_child(curr, side, Some(idx));
        idx
    }
}
