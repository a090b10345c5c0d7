use crate::augment::Max;
use crate::engine::RbTree;
use crate::error::{Error, Result};
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::interval::Interval;
use crate::iter::{Iter, OverlapIter};
use crate::node::Node;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An interval-value map, which support operations on dynamic sets of intervals.
///
/// Every node also stores the largest high endpoint found in its subtree, so
/// overlap queries skip subtrees that end before the query starts.
#[derive(Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(bound(
        serialize = "T: Serialize, V: Serialize, Ix: Serialize",
        deserialize = "T: Ord + Deserialize<'de>, V: Deserialize<'de>, Ix: Deserialize<'de>"
    ))
)]
pub struct IntervalIndex<T, V, Ix = DefaultIx> {
    pub(crate) tree: RbTree<Interval<T>, V, Max<T>, Ix>,
}

impl<T, V, Ix> IntervalIndex<T, V, Ix>
where
    T: Ord + Clone,
    Ix: IndexType,
{
    /// Creates a new `IntervalIndex` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        IntervalIndex {
            tree: RbTree::with_capacity(capacity),
        }
    }

    /// Insert an interval-value pair into the index.
    /// If the interval exists, overwrite and return the previous value.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_index::{Interval, IntervalIndex};
    ///
    /// let mut index = IntervalIndex::new();
    /// let int = Interval::new(1, 3).unwrap();
    /// assert_eq!(index.upsert(int.clone(), 1), None);
    /// assert_eq!(index.upsert(int.clone(), 2), Some(1));
    /// assert_eq!(index.len(), 1);
    /// ```
    #[inline]
    pub fn upsert(&mut self, interval: Interval<T>, value: V) -> Option<V> {
        self.tree.upsert(interval, value)
    }

    /// Remove an interval from the index, returning its value if the exact
    /// interval existed. Overlapping but unequal intervals are left alone.
    ///
    /// # Example
    /// ```rust
    /// use rb_index::{Interval, IntervalIndex};
    ///
    /// let mut index = IntervalIndex::new();
    /// index.upsert(Interval::new(1, 3).unwrap(), 1);
    /// index.upsert(Interval::new(2, 4).unwrap(), 2);
    /// assert_eq!(index.delete(&Interval::new(2, 3).unwrap()), None);
    /// assert_eq!(index.delete(&Interval::new(2, 4).unwrap()), Some(2));
    /// assert_eq!(index.len(), 1);
    /// ```
    #[inline]
    pub fn delete(&mut self, interval: &Interval<T>) -> Option<V> {
        let x = self.search_exact(interval);
        self.tree.remove_at(x)
    }
}

impl<T, V, Ix> IntervalIndex<T, V, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    /// Return a reference to the value stored for exactly `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the interval is absent.
    #[inline]
    pub fn search(&self, interval: &Interval<T>) -> Result<&V> {
        self.found(self.search_exact(interval)).map(|(_, v)| v)
    }

    /// Return a mutable reference to the value stored for exactly `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the interval is absent.
    #[inline]
    pub fn search_mut(&mut self, interval: &Interval<T>) -> Result<&mut V> {
        let x = self.search_exact(interval);
        if x.is_sentinel() {
            return Err(Error::NotFound);
        }
        Ok(self.tree.node_mut(x, Node::value_mut))
    }

    /// Find some interval that overlaps with the given interval.
    ///
    /// The search walks a single root-to-leaf path, going left whenever the
    /// left subtree still reaches `query.low`. The match returned is the first
    /// one met on that path, not necessarily the smallest overlapping
    /// interval; use [`IntervalIndex::find_all_overlapping`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when nothing overlaps `query`.
    ///
    /// # Example
    /// ```rust
    /// use rb_index::{Interval, IntervalIndex};
    ///
    /// let mut index = IntervalIndex::new();
    /// index.upsert(Interval::new(1, 3).unwrap(), "a");
    /// index.upsert(Interval::new(6, 7).unwrap(), "b");
    /// let (int, v) = index.find_first_overlapping(&Interval::new(5, 6).unwrap()).unwrap();
    /// assert_eq!((int.low(), int.high(), *v), (&6, &7, "b"));
    /// assert!(index.find_first_overlapping(&Interval::new(4, 5).unwrap()).is_err());
    /// ```
    #[inline]
    pub fn find_first_overlapping(&self, query: &Interval<T>) -> Result<(&Interval<T>, &V)> {
        let mut x = self.tree.root;
        while let Some(node) = self.tree.node_ref(x, Node::non_sentinel) {
            if node.key().overlaps(query) {
                return Ok(node.entry());
            }
            if self.subtree_max(node.left()).is_some_and(|max| max >= &query.low) {
                x = node.left();
            } else {
                x = node.right();
            }
        }
        Err(Error::NotFound)
    }

    /// Find all intervals in the index that overlap with the given interval,
    /// sorted by low endpoint and then by high endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when nothing overlaps `query`.
    ///
    /// # Example
    /// ```rust
    /// use rb_index::{Interval, IntervalIndex};
    ///
    /// let mut index = IntervalIndex::new();
    /// index.upsert(Interval::new(1, 3).unwrap(), ());
    /// index.upsert(Interval::new(2, 4).unwrap(), ());
    /// index.upsert(Interval::new(6, 7).unwrap(), ());
    /// index.upsert(Interval::new(8, 11).unwrap(), ());
    /// assert_eq!(index.find_all_overlapping(&Interval::new(2, 6).unwrap()).unwrap().len(), 3);
    /// index.delete(&Interval::new(1, 3).unwrap());
    /// assert_eq!(index.find_all_overlapping(&Interval::new(2, 6).unwrap()).unwrap().len(), 2);
    /// ```
    #[inline]
    pub fn find_all_overlapping(&self, query: &Interval<T>) -> Result<Vec<(&Interval<T>, &V)>> {
        let found: Vec<_> = self.overlapping(query).collect();
        if found.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(found)
    }

    /// Lazily iterate over the intervals overlapping `query`, in order.
    #[inline]
    #[must_use]
    pub fn overlapping<'a, 'q>(&'a self, query: &'q Interval<T>) -> OverlapIter<'a, 'q, T, V, Ix> {
        OverlapIter::new(&self.tree, query)
    }

    /// Check if any interval in the index overlaps with the given interval.
    #[inline]
    pub fn overlaps(&self, query: &Interval<T>) -> bool {
        self.find_first_overlapping(query).is_ok()
    }

    /// The entry with the smallest interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the index is empty.
    #[inline]
    pub fn min(&self) -> Result<(&Interval<T>, &V)> {
        self.found(self.tree.minimum(self.tree.root))
    }

    /// The entry with the largest interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the index is empty.
    #[inline]
    pub fn max(&self) -> Result<(&Interval<T>, &V)> {
        self.found(self.tree.maximum(self.tree.root))
    }

    /// The entry following exactly `interval` in interval order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when `interval` is absent or is the largest.
    #[inline]
    pub fn successor(&self, interval: &Interval<T>) -> Result<(&Interval<T>, &V)> {
        self.found(self.tree.successor(self.search_exact(interval)))
    }

    /// Search for the node with exactly the given interval.
    ///
    /// A subtree whose maximum high endpoint is below `interval.high` cannot
    /// contain it, so the descent stops early there.
    fn search_exact(&self, interval: &Interval<T>) -> NodeIndex<Ix> {
        let mut x = self.tree.root;
        while let Some(node) = self.tree.node_ref(x, Node::non_sentinel) {
            if self.subtree_max(x).is_some_and(|max| max < &interval.high) {
                return NodeIndex::sentinel();
            }
            match interval.cmp(node.key()) {
                std::cmp::Ordering::Equal => return x,
                std::cmp::Ordering::Less => x = node.left(),
                std::cmp::Ordering::Greater => x = node.right(),
            }
        }
        x
    }
}

impl<T, V, Ix> IntervalIndex<T, V, Ix>
where
    Ix: IndexType,
{
    /// The entry at the root of the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the index is empty.
    #[inline]
    pub fn root(&self) -> Result<(&Interval<T>, &V)> {
        self.found(self.tree.root)
    }

    /// Height of the tree: `-1` when empty, `0` for a single entry.
    #[inline]
    #[must_use]
    pub fn height(&self) -> isize {
        self.tree.height(self.tree.root)
    }

    /// All entries in ascending interval order.
    #[inline]
    #[must_use]
    pub fn in_order(&self) -> Vec<(&Interval<T>, &V)> {
        self.iter().collect()
    }

    /// Get an iterator over the entries of the index, sorted by interval.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, Interval<T>, V, Max<T>, Ix> {
        Iter::new(&self.tree)
    }

    /// Remove all elements from the index
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Return the number of elements in the index.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len
    }

    /// Return `true` if the index contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest high endpoint in the subtree rooted at `x`.
    pub(crate) fn subtree_max(&self, x: NodeIndex<Ix>) -> Option<&T> {
        self.tree.node_ref(x, Node::aug).map(Max::get)
    }

    fn found(&self, x: NodeIndex<Ix>) -> Result<(&Interval<T>, &V)> {
        self.tree
            .node_ref(x, Node::non_sentinel)
            .map(Node::entry)
            .ok_or(Error::NotFound)
    }
}

impl<T, V> IntervalIndex<T, V>
where
    T: Ord + Clone,
{
    /// Create an empty `IntervalIndex`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<T, V> Default for IntervalIndex<T, V>
where
    T: Ord + Clone,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, V, Ix> IntoIterator for &'a IntervalIndex<T, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a Interval<T>, &'a V);
    type IntoIter = Iter<'a, Interval<T>, V, Max<T>, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, V> FromIterator<(Interval<T>, V)> for IntervalIndex<T, V>
where
    T: Ord + Clone,
{
    fn from_iter<I: IntoIterator<Item = (Interval<T>, V)>>(iter: I) -> Self {
        let mut index = IntervalIndex::new();
        for (i, v) in iter {
            let _ignore = index.upsert(i, v);
        }
        index
    }
}
