//! Ordered map built on a multi-splay tree.
//!
//! A multi-splay tree keeps a balanced *reference* tree implicitly and
//! represents it as a forest of splay trees, one per preferred path. Every
//! access re-routes the preferred paths along the search path and splays
//! the target to the root, which gives `O(log n)` amortized lookups together
//! with the dynamic-optimality-style guarantees of multi-splay trees.
//!
//! As in the rest of this workspace, nodes live in a `Vec` arena and every
//! link is an `Option<u32>` index into it.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] and [`KvNode`] traits |
//! [`util`] | in-order traversal over any [`Node`] arena |
//! [`multisplay`] | forest primitives and [`MultisplayMap`] |
//! [`error`] | [`MultisplayError`] |
//!
//! Enable the `tracing` feature to get `trace` / `debug` events from the
//! forest operations.

pub mod error;
pub mod multisplay;
mod trace;
pub mod types;
pub mod util;

pub use error::MultisplayError;
pub use multisplay::types::{MultisplayNode, Side};
pub use multisplay::{Iter, MultisplayMap};
pub use types::{KvNode, Node};
pub use util::{first, last, next, prev, size};
