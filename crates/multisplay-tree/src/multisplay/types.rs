use crate::types::{KvNode, Node};

/// Which child of a node an operation is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A key/value entry of the multi-splay forest.
///
/// The node plays two roles at once. Through `p` / `l` / `r` it is a vertex
/// of a physical splay tree (an auxiliary tree). Through the depth fields and
/// `splay_root` it is also a vertex of the implicit reference tree, which is
/// never stored as links.
#[derive(Clone, Debug)]
pub struct MultisplayNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    /// Reference depth of this node minus the reference depth of its
    /// physical parent. On the physical root it is the absolute depth.
    pub delta_ref_depth: i32,
    /// Shallowest reference depth inside this node's part of its auxiliary
    /// tree, relative to this node. Never positive.
    pub delta_min_depth: i32,
    /// `true` when the link to `p` leaves the auxiliary tree (or there is no
    /// `p` at all).
    pub splay_root: bool,
    /// Node color in the reference tree: `true` = black, `false` = red.
    pub b: bool,
}

impl<K, V> MultisplayNode<K, V> {
    /// A detached red node at relative depth one, alone in its auxiliary tree.
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            delta_ref_depth: 1,
            delta_min_depth: 0,
            splay_root: true,
            b: false,
        }
    }

    #[inline]
    pub fn child(&self, side: Side) -> Option<u32> {
        match side {
            Side::Left => self.l,
            Side::Right => self.r,
        }
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.b
    }
}

impl<K, V> Node for MultisplayNode<K, V> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K, V> KvNode<K, V> for MultisplayNode<K, V> {
    fn key(&self) -> &K {
        &self.k
    }

    fn value(&self) -> &V {
        &self.v
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.v
    }

    fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.v, value)
    }
}
