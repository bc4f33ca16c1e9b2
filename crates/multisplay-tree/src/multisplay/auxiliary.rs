//! Rotations and splaying inside one auxiliary tree, plus the depth
//! aggregates they have to keep in sync.
//!
//! These are the only functions that rewrite `p` / `l` / `r` links. A
//! rotation never changes any node's absolute reference depth: the delta of
//! the raised node, the lowered node and the subtree that changes sides are
//! re-expressed against their new physical parents.

use crate::types::Node;

use super::forest::Forest;
use super::types::Side;

impl<K, V> Forest<K, V> {
    /// Recomputes `delta_min_depth` of `idx` from its children that are
    /// still inside the same auxiliary tree. A child behind a boundary is
    /// opaque and contributes nothing.
    pub(crate) fn maintain_min_depth(&mut self, idx: u32) {
        let mut min = 0;
        for side in [Side::Left, Side::Right] {
            if let Some(c) = self.aux_child(idx, side) {
                let c = self.node(c);
                min = min.min(c.delta_ref_depth + c.delta_min_depth);
            }
        }
        self.node_mut(idx).delta_min_depth = min;
    }

    /// Rotates `p` to the left:
    ///
    /// ```text
    ///       o              o
    ///       |              |
    ///       P              Q
    ///      / \            / \
    ///     x   Q    =>    P   z
    ///        / \        / \
    ///       y   z      x   y
    /// ```
    pub(crate) fn rotate_left(&mut self, p: u32) {
        let Some(q) = self.node(p).r else {
            unreachable!("rotate_left: node {p} has no right child");
        };
        let o = self.node(p).p;
        let y = self.node(q).l;
        self.node_mut(q).set_l(Some(p));
        self.node_mut(p).set_r(y);
        self.relink(o, p, q, y);
        self.repair(p, q, y);
    }

    /// Rotates `p` to the right:
    ///
    /// ```text
    ///       o              o
    ///       |              |
    ///       P              Q
    ///      / \            / \
    ///     Q   z    =>    x   P
    ///    / \                / \
    ///   x   y              y   z
    /// ```
    pub(crate) fn rotate_right(&mut self, p: u32) {
        let Some(q) = self.node(p).l else {
            unreachable!("rotate_right: node {p} has no left child");
        };
        let o = self.node(p).p;
        let y = self.node(q).r;
        self.node_mut(q).set_r(Some(p));
        self.node_mut(p).set_l(y);
        self.relink(o, p, q, y);
        self.repair(p, q, y);
    }

    fn relink(&mut self, o: Option<u32>, p: u32, q: u32, y: Option<u32>) {
        match o {
            Some(o) => {
                let side = self.side_of(o, p);
                self.set_child(o, side, Some(q));
            }
            None => self.root = Some(q),
        }
        if let Some(y) = y {
            self.node_mut(y).set_p(Some(p));
        }
        self.node_mut(p).set_p(Some(q));
        self.node_mut(q).set_p(o);
    }

    fn repair(&mut self, p: u32, q: u32, y: Option<u32>) {
        let p_root = self.node(p).splay_root;
        let q_root = self.node(q).splay_root;
        self.node_mut(p).splay_root = q_root;
        self.node_mut(q).splay_root = p_root;

        let delta_q = self.node(q).delta_ref_depth;
        let delta_p = self.node(p).delta_ref_depth;
        self.node_mut(q).delta_ref_depth = delta_p + delta_q;
        self.node_mut(p).delta_ref_depth = -delta_q;
        if let Some(y) = y {
            self.node_mut(y).delta_ref_depth += delta_q;
        }

        self.maintain_min_depth(p);
        self.maintain_min_depth(q);
    }

    /// Raises `n` over its physical parent.
    fn rotate_up(&mut self, n: u32, parent: u32) {
        match self.side_of(parent, n) {
            Side::Left => self.rotate_right(parent),
            Side::Right => self.rotate_left(parent),
        }
    }

    /// Splays `n` up its auxiliary tree until its physical parent is
    /// `boundary`, or, with `boundary == None`, until `n` is the auxiliary
    /// root.
    ///
    /// `boundary`, when given, must be a physical ancestor of `n` inside the
    /// same auxiliary tree.
    pub(crate) fn splay(&mut self, n: u32, boundary: Option<u32>) {
        loop {
            let node = self.node(n);
            if node.splay_root || node.p == boundary {
                return;
            }
            let Some(parent) = node.p else {
                unreachable!("splay: node {n} is below no auxiliary root");
            };
            let pn = self.node(parent);
            if pn.splay_root || pn.p == boundary {
                self.rotate_up(n, parent);
                return;
            }
            let Some(grandparent) = pn.p else {
                unreachable!("splay: node {parent} is below no auxiliary root");
            };
            let n_side = self.side_of(parent, n);
            let parent_side = self.side_of(grandparent, parent);
            if n_side == parent_side {
                // zig-zig
                self.rotate_up(parent, grandparent);
                self.rotate_up(n, parent);
            } else {
                // zig-zag
                self.rotate_up(n, parent);
                self.rotate_up(n, grandparent);
            }
        }
    }
}
