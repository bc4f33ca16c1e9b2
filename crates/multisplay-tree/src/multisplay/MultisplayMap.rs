use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::error::MultisplayError;
use crate::trace::debug_log;
use crate::types::KvNode;
use crate::util::{first, last, next as next_node, prev as prev_node};

use super::access::deeper;
use super::forest::Forest;
use super::types::MultisplayNode;
use super::util;

fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Ordered map backed by a multi-splay tree.
///
/// Lookups reshape the physical forest (they splay), so even `find` takes
/// `&mut self`. Iteration walks the forest in key order without reshaping
/// it and only needs `&self`.
///
/// ```
/// use multisplay_tree::MultisplayMap;
///
/// let mut map = MultisplayMap::new();
/// for k in [5, 3, 8, 1, 4, 7, 9] {
///     map.insert(k, k * 10);
/// }
/// assert_eq!(map.find(&4), Some(&40));
/// assert_eq!(map.find(&6), None);
/// assert!(map.keys().copied().eq([1, 3, 4, 5, 7, 8, 9]));
/// ```
#[derive(Clone)]
pub struct MultisplayMap<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    forest: Forest<K, V>,
    comparator: C,
}

impl<K, V> MultisplayMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }

    /// Empty map with room for `capacity` entries before the arena grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forest: Forest::with_capacity(capacity),
            comparator: default_comparator::<K>,
        }
    }
}

impl<K, V> Default for MultisplayMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> MultisplayMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            forest: Forest::with_capacity(0),
            comparator,
        }
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    ///
    /// A new key becomes a red leaf below the deeper of its two neighbours,
    /// after which the reference tree is rebalanced through virtual
    /// rotations.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.forest.root.is_none() {
            let mut node = MultisplayNode::new(key, value);
            node.b = true;
            let idx = self.forest.push(node);
            self.forest.root = Some(idx);
            return None;
        }

        let probe = self.forest.find_with_parents(&key, &self.comparator);
        if let Some(found) = probe.found {
            let old = self.forest.node_mut(found).set_value(value);
            self.forest.multi_splay_node(found, &self.comparator);
            debug_log!(node = found, "insert: overwrite");
            return Some(old);
        }

        let Some((parent, parent_depth)) = deeper(probe.x, probe.z) else {
            unreachable!("insert: non-empty map without a neighbour");
        };
        self.forest.multi_splay_node(parent, &self.comparator);
        self.forest
            .attach_leaf(key, value, parent_depth + 1, &self.comparator);
        debug_log!(parent, "insert: new leaf");
        self.forest.virtual_rebalance(parent);
        None
    }

    /// Looks `key` up, splaying it to the root when present.
    pub fn find(&mut self, key: &K) -> Option<&V> {
        let idx = self.forest.multi_splay(key, &self.comparator)?;
        Some(self.forest.node(idx).value())
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.forest.multi_splay(key, &self.comparator)?;
        Some(self.forest.node_mut(idx).value_mut())
    }

    pub fn contains_key(&mut self, key: &K) -> bool {
        self.forest.multi_splay(key, &self.comparator).is_some()
    }

    /// Removal is not supported yet.
    pub fn remove(&mut self, _key: &K) -> Result<Option<V>, MultisplayError> {
        Err(MultisplayError::NotImplemented("remove"))
    }

    /// Number of entries. Nodes are never freed, so this is the arena size.
    pub fn len(&self) -> usize {
        self.forest.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.root.is_none()
    }

    pub fn clear(&mut self) {
        self.forest.clear();
    }

    /// Number of levels of the reference tree.
    pub fn height(&self) -> usize {
        util::reference_height(&self.forest.arena, self.forest.root)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.forest.arena,
            front: first(&self.forest.arena, self.forest.root),
            back: last(&self.forest.arena, self.forest.root),
            remaining: self.len(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.iter().next_back()
    }

    pub fn assert_valid(&self) -> Result<(), MultisplayError> {
        util::assert_multisplay_tree(&self.forest.arena, self.forest.root, &self.comparator)
            .map_err(MultisplayError::InvalidTree)
    }

    #[cfg(test)]
    pub(crate) fn forest(&self) -> &Forest<K, V> {
        &self.forest
    }

    #[cfg(test)]
    pub(crate) fn forest_mut(&mut self) -> &mut Forest<K, V> {
        &mut self.forest
    }
}

impl<K, V, C> fmt::Debug for MultisplayMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&util::print(&self.forest.arena, self.forest.root, ""))
    }
}

impl<K, V, C> Extend<(K, V)> for MultisplayMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for MultisplayMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C> IntoIterator for &'a MultisplayMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`MultisplayMap`].
pub struct Iter<'a, K, V> {
    arena: &'a [MultisplayNode<K, V>],
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front?;
        self.remaining -= 1;
        let arena = self.arena;
        self.front = next_node(arena, idx);
        let node = &arena[idx as usize];
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back?;
        self.remaining -= 1;
        let arena = self.arena;
        self.back = prev_node(arena, idx);
        let node = &arena[idx as usize];
        Some((node.key(), node.value()))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
