//! Node trait definitions.
//!
//! Nodes live in a [`Vec`]-backed arena and every "pointer" is an
//! `Option<u32>` index into it. All traversal helpers take the arena as a
//! slice and work with indices, so they never hold a borrow across a
//! structural edit.

/// Binary-tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Key/value node interface used by map-like structures.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    fn set_value(&mut self, value: V) -> V;
}
