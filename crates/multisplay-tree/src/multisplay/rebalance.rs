//! Red-black balancing of the reference tree, carried out through virtual
//! rotations.
//!
//! The reference tree has no links of its own, so a rotation of it is
//! simulated. The rotated pair is first isolated as the top of one
//! auxiliary tree with the child splayed right under the parent. In that
//! shape the physical subtrees already separate the three reference subtrees
//! that move, and the rotation reduces to depth-delta arithmetic on three
//! nodes plus at most one boundary flag. No physical link changes.

use crate::trace::trace_log;

use super::forest::Forest;
use super::types::Side;

impl<K, V> Forest<K, V> {
    /// Leaves `p` as the physical root of an auxiliary tree that starts at
    /// `p`, with `v` (its reference child on `side`) as its physical child
    /// on the same side.
    fn prepare_virtual_rotation(&mut self, v: u32, p: u32, side: Side) {
        if let Some((grandparent, p_side)) = self.ref_parent_link(p) {
            self.switch_with_direction(grandparent, p_side.opposite());
        }
        self.switch_with_direction(p, side);
        self.splay(v, Some(p));
        debug_assert_eq!(self.node(p).child(side), Some(v));
    }

    /// Rotates the reference tree so that `v`, the reference child of `p` on
    /// `side`, takes the place of `p`.
    ///
    /// Depth changes: `v` and its outer subtree move up one level, `p` and
    /// its other subtree move down one level, `v`'s inner subtree stays.
    /// Colors: `v` inherits `p`'s color and `p` turns red.
    fn virtual_rotate(&mut self, v: u32, p: u32, side: Side) {
        self.prepare_virtual_rotation(v, p, side);

        let inner = self.node(v).child(side.opposite());
        self.node_mut(p).delta_ref_depth += 1;
        self.node_mut(v).delta_ref_depth -= 2;
        if let Some(inner) = inner {
            self.node_mut(inner).delta_ref_depth += 1;
        }
        // `v` now continues its path into `p`; the outer subtree detaches.
        if let Some(outer) = self.aux_child(v, side) {
            self.node_mut(outer).splay_root = true;
        }
        self.maintain_min_depth(v);
        self.maintain_min_depth(p);

        self.node_mut(v).b = self.node(p).b;
        self.node_mut(p).b = false;
        trace_log!(v, p, ?side, "virtual rotation");
    }

    /// Reference-tree right rotation of `p` with its left child `v`.
    pub(crate) fn virtual_rotate_right(&mut self, v: u32, p: u32) {
        self.virtual_rotate(v, p, Side::Left);
    }

    /// Reference-tree left rotation of `p` with its right child `v`.
    pub(crate) fn virtual_rotate_left(&mut self, v: u32, p: u32) {
        self.virtual_rotate(v, p, Side::Right);
    }

    /// Restores the red-black rules after a red leaf was attached below
    /// `start`, walking up the reference tree to its root.
    ///
    /// Each level applies the left-leaning fixup: a lone red right child is
    /// rotated left, two stacked red left children are rotated right, and
    /// two red children are recolored black with the red moved up.
    pub(crate) fn virtual_rebalance(&mut self, start: u32) {
        let mut curr = start;
        loop {
            let left = self.ref_left_child(curr);
            let right = self.ref_right_child(curr);
            if let Some(r) = right {
                if self.is_red(right) && !self.is_red(left) {
                    self.virtual_rotate_left(r, curr);
                    curr = r;
                }
            }

            if let Some(l) = self.ref_left_child(curr) {
                let grandchild = self.ref_left_child(l);
                if self.is_red(Some(l)) && self.is_red(grandchild) {
                    self.virtual_rotate_right(l, curr);
                    curr = l;
                }
            }

            let left = self.ref_left_child(curr);
            let right = self.ref_right_child(curr);
            if let (Some(l), Some(r)) = (left, right) {
                if self.is_red(left) && self.is_red(right) {
                    self.node_mut(l).b = true;
                    self.node_mut(r).b = true;
                    self.node_mut(curr).b = false;
                    trace_log!(node = curr, "color flip");
                }
            }

            match self.ref_parent(curr) {
                Some(parent) => curr = parent,
                None => {
                    self.node_mut(curr).b = true;
                    return;
                }
            }
        }
    }
}
