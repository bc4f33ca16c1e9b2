//! Preferred-path switching and the reference-tree queries built on it.
//!
//! A reference child of `y` either sits inside `y`'s auxiliary tree
//! (preferred edge) or is the top of a neighbouring auxiliary tree hanging
//! below it (boundary). After `y` is splayed to its auxiliary root and its
//! two shallower neighbours `x` (left) and `z` (right) are splayed directly
//! under it, the physical subtrees `x.r` and `z.l` are exactly the reference
//! subtrees of `y`'s left and right child. Switching is then a matter of
//! flipping the `splay_root` flag on those two subtree roots.

use super::forest::Forest;
use super::types::Side;

/// Nodes exposed around `y` by [`Forest::prepare_switch`].
///
/// `x` / `z` carry their reference depth relative to `y` (always negative).
/// `l` / `r` are the physical roots of `y`'s left and right reference
/// subtrees.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SwitchFrame {
    pub x: Option<(u32, i32)>,
    pub z: Option<(u32, i32)>,
    pub l: Option<u32>,
    pub r: Option<u32>,
}

impl SwitchFrame {
    #[inline]
    fn lead(&self, side: Side) -> Option<u32> {
        match side {
            Side::Left => self.l,
            Side::Right => self.r,
        }
    }
}

impl<K, V> Forest<K, V> {
    /// Finds, inside `y`'s auxiliary tree and on `side` of `y`, the node
    /// closest to `y` in key order whose reference depth is smaller than
    /// `y`'s. On the left that is `ref_left_parent`, on the right
    /// `ref_right_parent`.
    ///
    /// Only subtrees whose `delta_min_depth` proves they hold such a node
    /// are entered, so the descent never backtracks.
    pub(crate) fn ref_side_parent(&self, y: u32, side: Side) -> Option<(u32, i32)> {
        let inward = side.opposite();
        let mut curr = self.aux_child(y, side)?;
        let mut depth = self.node(curr).delta_ref_depth;
        if depth + self.node(curr).delta_min_depth >= 0 {
            return None;
        }
        loop {
            if let Some(c) = self.aux_child(curr, inward) {
                let c_depth = depth + self.node(c).delta_ref_depth;
                if c_depth + self.node(c).delta_min_depth < 0 {
                    curr = c;
                    depth = c_depth;
                    continue;
                }
            }
            if depth < 0 {
                return Some((curr, depth));
            }
            let Some(c) = self.aux_child(curr, side) else {
                unreachable!("ref_side_parent: min-depth aggregate of {curr} is stale");
            };
            depth += self.node(c).delta_ref_depth;
            curr = c;
        }
    }

    /// Splay half of a switch: `y` becomes its auxiliary root and its
    /// shallower neighbours are splayed right under it. Preferred flags are
    /// left untouched, so this alone is a switch applied twice.
    pub(crate) fn prepare_switch(&mut self, y: u32) -> SwitchFrame {
        self.splay(y, None);
        let x = self.ref_side_parent(y, Side::Left);
        let z = self.ref_side_parent(y, Side::Right);
        let l = match x {
            Some((x, _)) => {
                self.splay(x, Some(y));
                self.node(x).r
            }
            None => self.node(y).l,
        };
        let r = match z {
            Some((z, _)) => {
                self.splay(z, Some(y));
                self.node(z).l
            }
            None => self.node(y).r,
        };
        SwitchFrame { x, z, l, r }
    }

    fn apply_switch(&mut self, y: u32, frame: SwitchFrame, preferred: Side) {
        if let Some(l) = frame.l {
            self.node_mut(l).splay_root = preferred != Side::Left;
        }
        if let Some(r) = frame.r {
            self.node_mut(r).splay_root = preferred != Side::Right;
        }
        if let Some((z, _)) = frame.z {
            self.maintain_min_depth(z);
        }
        if let Some((x, _)) = frame.x {
            self.maintain_min_depth(x);
        }
        self.maintain_min_depth(y);
    }

    /// Makes the reference child of `y` on `preferred` the preferred one and
    /// turns the other child into the top of its own auxiliary tree. A
    /// missing child on `preferred` leaves `y` at the bottom of its path.
    pub(crate) fn switch_with_direction(&mut self, y: u32, preferred: Side) {
        let frame = self.prepare_switch(y);
        self.apply_switch(y, frame, preferred);
    }

    /// Toggles which reference child of `y` is preferred. When neither is,
    /// the left child (or the right one, if there is no left) becomes
    /// preferred.
    ///
    /// Access paths use [`Forest::switch_with_direction`] instead, since the
    /// side they need is always known.
    #[allow(dead_code)]
    pub(crate) fn switch_preferred(&mut self, y: u32) {
        let frame = self.prepare_switch(y);
        let is_preferred = |lead: Option<u32>| lead.is_some_and(|c| !self.node(c).splay_root);
        let preferred = if is_preferred(frame.l) {
            Side::Right
        } else if is_preferred(frame.r) || frame.l.is_some() {
            Side::Left
        } else {
            Side::Right
        };
        self.apply_switch(y, frame, preferred);
    }

    /// Shallowest node of the auxiliary part rooted at `lead`.
    pub(crate) fn ref_topmost(&self, lead: u32) -> u32 {
        let mut curr = lead;
        loop {
            let min = self.node(curr).delta_min_depth;
            if min == 0 {
                return curr;
            }
            let next = [Side::Left, Side::Right]
                .into_iter()
                .filter_map(|side| self.aux_child(curr, side))
                .find(|&c| {
                    let c = self.node(c);
                    c.delta_ref_depth + c.delta_min_depth == min
                });
            match next {
                Some(c) => curr = c,
                None => unreachable!("ref_topmost: min-depth aggregate of {curr} is stale"),
            }
        }
    }

    /// Reference child of `y` on `side`.
    pub(crate) fn ref_child(&mut self, y: u32, side: Side) -> Option<u32> {
        let frame = self.prepare_switch(y);
        frame.lead(side).map(|lead| self.ref_topmost(lead))
    }

    pub(crate) fn ref_left_child(&mut self, y: u32) -> Option<u32> {
        self.ref_child(y, Side::Left)
    }

    pub(crate) fn ref_right_child(&mut self, y: u32) -> Option<u32> {
        self.ref_child(y, Side::Right)
    }

    /// Reference parent of `y`, together with the side of the parent on
    /// which `y` hangs.
    pub(crate) fn ref_parent_link(&mut self, y: u32) -> Option<(u32, Side)> {
        let frame = self.prepare_switch(y);
        let inner = match (frame.x, frame.z) {
            (Some(x), Some(z)) if x.1 > z.1 => Some((x.0, Side::Right)),
            (_, Some(z)) => Some((z.0, Side::Left)),
            (Some(x), None) => Some((x.0, Side::Right)),
            (None, None) => None,
        };
        if inner.is_some() {
            return inner;
        }

        // `y` tops its preferred path: the parent is in the auxiliary tree
        // `y` hangs from, at depth(y) - 1, somewhere above the attachment.
        let attach = self.node(y).p?;
        let target = self.node(y).delta_ref_depth - 1;
        let mut side = self.side_of(attach, y);
        let mut curr = attach;
        let mut depth = 0;
        loop {
            if depth == target {
                return Some((curr, side));
            }
            let node = self.node(curr);
            let parent = match node.p {
                Some(parent) if !node.splay_root => parent,
                _ => unreachable!("ref_parent: no node at depth {target} above {attach}"),
            };
            depth -= node.delta_ref_depth;
            side = self.side_of(parent, curr);
            curr = parent;
        }
    }

    pub(crate) fn ref_parent(&mut self, y: u32) -> Option<u32> {
        self.ref_parent_link(y).map(|(parent, _)| parent)
    }
}
