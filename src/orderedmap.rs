use std::borrow::Borrow;

use crate::engine::RbTree;
use crate::error::{Error, Result};
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::Iter;
use crate::node::Node;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A key-value map kept balanced as a red-black tree.
///
/// Every lookup and update runs in `O(log n)`.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderedMap<K, V, Ix = DefaultIx> {
    pub(crate) tree: RbTree<K, V, (), Ix>,
}

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `OrderedMap` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap {
            tree: RbTree::with_capacity(capacity),
        }
    }

    /// Insert a key-value pair into the map.
    /// If the key exists, overwrite and return the previous value.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_index::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.upsert(7, "a"), None);
    /// assert_eq!(map.upsert(7, "b"), Some("a"));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn upsert(&mut self, key: K, value: V) -> Option<V> {
        self.tree.upsert(key, value)
    }

    /// Return a reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the key is absent.
    ///
    /// # Example
    /// ```rust
    /// use rb_index::{Error, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// map.upsert(1, "one");
    /// assert_eq!(map.search(&1), Ok(&"one"));
    /// assert_eq!(map.search(&2), Err(Error::NotFound));
    /// ```
    #[inline]
    pub fn search<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.found(self.tree.search(key)).map(|(_, v)| v)
    }

    /// Return a mutable reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the key is absent.
    #[inline]
    pub fn search_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.tree.search(key);
        if x.is_sentinel() {
            return Err(Error::NotFound);
        }
        Ok(self.tree.node_mut(x, Node::value_mut))
    }

    /// Return `true` if the map holds the key.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.tree.search(key).is_sentinel()
    }

    /// Remove a key from the map, returning its value if the key existed.
    /// Removing an absent key leaves the map untouched.
    ///
    /// # Example
    /// ```rust
    /// use rb_index::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.upsert(1, "one");
    /// assert_eq!(map.delete(&2), None);
    /// assert_eq!(map.delete(&1), Some("one"));
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.tree.search(key);
        self.tree.remove_at(x)
    }

    /// The entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the map is empty.
    #[inline]
    pub fn min(&self) -> Result<(&K, &V)> {
        self.found(self.tree.minimum(self.tree.root))
    }

    /// The entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the map is empty.
    #[inline]
    pub fn max(&self) -> Result<(&K, &V)> {
        self.found(self.tree.maximum(self.tree.root))
    }

    /// The entry with the next larger key after `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when `key` is absent or is the largest key.
    ///
    /// # Example
    /// ```rust
    /// use rb_index::{Error, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// for k in [10, 20, 30] {
    ///     map.upsert(k, k * 2);
    /// }
    /// assert_eq!(map.successor(&10), Ok((&20, &40)));
    /// assert_eq!(map.successor(&30), Err(Error::NotFound));
    /// assert_eq!(map.successor(&15), Err(Error::NotFound));
    /// ```
    #[inline]
    pub fn successor<Q>(&self, key: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.found(self.tree.successor(self.tree.search(key)))
    }
}

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    Ix: IndexType,
{
    /// The entry at the root of the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the map is empty.
    #[inline]
    pub fn root(&self) -> Result<(&K, &V)> {
        self.found(self.tree.root)
    }

    /// Height of the tree: `-1` when empty, `0` for a single entry.
    ///
    /// Computed by walking the whole tree.
    #[inline]
    #[must_use]
    pub fn height(&self) -> isize {
        self.tree.height(self.tree.root)
    }

    /// All entries in ascending key order.
    #[inline]
    #[must_use]
    pub fn in_order(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Get an iterator over the entries of the map, sorted by key.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, (), Ix> {
        Iter::new(&self.tree)
    }

    /// Remove all elements from the map
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Return the number of elements in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len
    }

    /// Return `true` if the map contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn found(&self, x: NodeIndex<Ix>) -> Result<(&K, &V)> {
        self.tree
            .node_ref(x, Node::non_sentinel)
            .map(Node::entry)
            .ok_or(Error::NotFound)
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Create an empty `OrderedMap`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V, Ix> IntoIterator for &'a OrderedMap<K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, (), Ix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            let _ignore = map.upsert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::Color;

    const CLRS_KEYS: [i32; 12] = [15, 6, 18, 3, 7, 17, 20, 2, 4, 13, 19, 9];

    fn clrs_map() -> OrderedMap<i32, i32> {
        CLRS_KEYS.iter().map(|&k| (k, k * 10)).collect()
    }

    #[test]
    fn empty_map_has_height_minus_one() {
        let map = OrderedMap::<i32, ()>::new();
        assert_eq!(map.height(), -1);
        assert_eq!(map.root(), Err(Error::NotFound));
        assert_eq!(map.min(), Err(Error::NotFound));
        assert_eq!(map.max(), Err(Error::NotFound));
        assert!(map.in_order().is_empty());
    }

    #[test]
    fn single_entry_has_height_zero() {
        let mut map = OrderedMap::new();
        map.upsert(1, "root");
        assert_eq!(map.height(), 0);
        assert_eq!(map.root(), Ok((&1, &"root")));
    }

    fn child(map: &OrderedMap<i32, i32>, path: &str) -> NodeIndex<u32> {
        path.chars().fold(map.tree.root, |x, c| match c {
            'L' => map.tree.node_ref(x, Node::left),
            _ => map.tree.node_ref(x, Node::right),
        })
    }

    #[test]
    fn clrs_sequence_balances_to_height_three() {
        let map = clrs_map();
        assert_eq!(map.len(), 12);
        assert_eq!(map.height(), 3);
        assert_eq!(map.root(), Ok((&15, &150)));

        let expect = [
            ("", 15, Color::Black),
            ("L", 6, Color::Red),
            ("LL", 3, Color::Black),
            ("LLL", 2, Color::Red),
            ("LLR", 4, Color::Red),
            ("LR", 9, Color::Black),
            ("LRL", 7, Color::Red),
            ("LRR", 13, Color::Red),
            ("R", 18, Color::Red),
            ("RL", 17, Color::Black),
            ("RR", 20, Color::Black),
            ("RRL", 19, Color::Red),
        ];
        for (path, key, color) in expect {
            let x = child(&map, path);
            assert_eq!(map.tree.node_ref(x, Node::key), &key, "key at {path:?}");
            assert_eq!(map.tree.node_ref(x, Node::color), color, "color at {path:?}");
        }
        assert!(child(&map, "RRR").is_sentinel());
    }

    #[test]
    fn upsert_replaces_without_new_node() {
        let mut map = clrs_map();
        let height = map.height();
        assert_eq!(map.upsert(7, 0), Some(70));
        assert_eq!(map.search(&7), Ok(&0));
        assert_eq!(map.height(), height);
        assert_eq!(map.len(), 12);
    }

    #[test]
    fn search_for_zero_does_not_hit_sentinel() {
        let map = clrs_map();
        assert_eq!(map.search(&0), Err(Error::NotFound));
        assert!(!map.contains_key(&0));
    }

    #[test]
    fn min_max_and_successor_walk() {
        let map = clrs_map();
        assert_eq!(map.min(), Ok((&2, &20)));
        assert_eq!(map.max(), Ok((&20, &200)));

        let mut sorted = CLRS_KEYS.to_vec();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            assert_eq!(map.successor(&pair[0]).map(|(k, _)| *k), Ok(pair[1]));
        }
        assert_eq!(map.successor(&20), Err(Error::NotFound));
        assert_eq!(map.successor(&5), Err(Error::NotFound));
    }

    #[test]
    fn in_order_is_ascending() {
        let map = clrs_map();
        let keys: Vec<_> = map.in_order().into_iter().map(|(k, _)| *k).collect();
        let mut sorted = CLRS_KEYS.to_vec();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(map.iter().len(), 12);
    }

    #[test]
    fn delete_absent_key_is_noop() {
        let mut map = clrs_map();
        let before: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let height = map.height();
        assert_eq!(map.delete(&100), None);
        let after: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(before, after);
        assert_eq!(map.height(), height);
    }

    #[test]
    fn delete_root_leaves_empty_map() {
        let mut map = OrderedMap::new();
        map.upsert(1, ());
        assert_eq!(map.delete(&1), Some(()));
        assert_eq!(map.height(), -1);
        assert!(map.is_empty());
    }

    #[test]
    fn delete_every_key() {
        let mut map = clrs_map();
        for (i, k) in CLRS_KEYS.iter().enumerate() {
            assert_eq!(map.delete(k), Some(k * 10));
            assert_eq!(map.search(k), Err(Error::NotFound));
            assert_eq!(map.len(), CLRS_KEYS.len() - i - 1);
        }
        assert_eq!(map.height(), -1);
    }

    #[test]
    fn search_mut_updates_in_place() {
        let mut map = clrs_map();
        *map.search_mut(&13).unwrap() += 1;
        assert_eq!(map.search(&13), Ok(&131));
        assert_eq!(map.search_mut(&14), Err(Error::NotFound));
    }

    #[test]
    fn borrowed_lookup_with_string_keys() {
        let mut map = OrderedMap::new();
        map.upsert("b".to_string(), 2);
        map.upsert("a".to_string(), 1);
        assert_eq!(map.search("a"), Ok(&1));
        assert_eq!(map.delete("b"), Some(2));
    }

    #[test]
    fn clear_resets_arena() {
        let mut map = clrs_map();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.tree.nodes.len(), 1);
        assert!(map.tree.nodes[0].is_sentinel());
    }
}
