use crate::types::Node;

use super::types::{MultisplayNode, Side};

/// Node arena plus the handle of the physical root.
///
/// Every structural primitive of the multi-splay tree is an `impl` block on
/// this type, spread over the sibling modules. The physical root is kept
/// current by the rotation primitive itself, so callers never have to
/// re-derive it after a splay.
#[derive(Clone)]
pub(crate) struct Forest<K, V> {
    pub(crate) arena: Vec<MultisplayNode<K, V>>,
    pub(crate) root: Option<u32>,
}

impl<K, V> Forest<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Vec::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn push(&mut self, node: MultisplayNode<K, V>) -> u32 {
        self.arena.push(node);
        (self.arena.len() - 1) as u32
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    #[inline]
    pub(crate) fn node(&self, idx: u32) -> &MultisplayNode<K, V> {
        &self.arena[idx as usize]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, idx: u32) -> &mut MultisplayNode<K, V> {
        &mut self.arena[idx as usize]
    }

    /// Child of `idx` on `side`, if it lies inside the same auxiliary tree.
    #[inline]
    pub(crate) fn aux_child(&self, idx: u32, side: Side) -> Option<u32> {
        self.node(idx)
            .child(side)
            .filter(|&c| !self.node(c).splay_root)
    }

    #[inline]
    pub(crate) fn set_child(&mut self, idx: u32, side: Side, child: Option<u32>) {
        match side {
            Side::Left => self.node_mut(idx).set_l(child),
            Side::Right => self.node_mut(idx).set_r(child),
        }
    }

    /// Side of `parent` on which its physical child `child` hangs.
    #[inline]
    pub(crate) fn side_of(&self, parent: u32, child: u32) -> Side {
        if self.node(parent).l == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Red-black color test with an absent node counting as black.
    #[inline]
    pub(crate) fn is_red(&self, idx: Option<u32>) -> bool {
        match idx {
            Some(i) => !self.node(i).is_black(),
            None => false,
        }
    }

    /// Absolute reference depth, summed along the physical ancestors.
    #[cfg(test)]
    pub(crate) fn depth_of(&self, idx: u32) -> i32 {
        let mut depth = 0;
        let mut curr = Some(idx);
        while let Some(i) = curr {
            depth += self.node(i).delta_ref_depth;
            curr = self.node(i).p;
        }
        depth
    }
}
