//! Thread-safe wrappers guarding a whole tree with one reader-writer lock.
//!
//! Writers (`upsert`, `delete`, `clear`) hold the lock exclusively, readers
//! share it. Every call is applied completely under the lock, so a reader
//! never sees a half-rebalanced tree. Results are cloned out of the tree
//! because references cannot outlive the guard; use [`Shared::read`] to work
//! on borrowed entries instead.
//!
//! ```
//! use std::sync::Arc;
//! use rb_index::SharedOrderedMap;
//!
//! let map = Arc::new(SharedOrderedMap::<u64, String>::default());
//! let writer = {
//!     let map = Arc::clone(&map);
//!     std::thread::spawn(move || map.upsert(1, "one".to_string()))
//! };
//! writer.join().unwrap();
//! assert_eq!(map.search(&1).unwrap(), "one");
//! ```

use std::borrow::Borrow;

use parking_lot::RwLock;

use crate::error::Result;
use crate::index::{DefaultIx, IndexType};
use crate::interval::Interval;
use crate::intervalindex::IntervalIndex;
use crate::orderedmap::OrderedMap;

/// A tree behind a single `RwLock`.
#[derive(Debug, Default)]
pub struct Shared<M> {
    inner: RwLock<M>,
}

/// An [`OrderedMap`] that can be shared between threads.
pub type SharedOrderedMap<K, V, Ix = DefaultIx> = Shared<OrderedMap<K, V, Ix>>;

/// An [`IntervalIndex`] that can be shared between threads.
pub type SharedIntervalIndex<T, V, Ix = DefaultIx> = Shared<IntervalIndex<T, V, Ix>>;

impl<M> Shared<M> {
    /// Wrap an existing tree.
    pub fn new(tree: M) -> Self {
        Shared {
            inner: RwLock::new(tree),
        }
    }

    /// Run `f` with shared access to the tree.
    pub fn read<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access to the tree.
    pub fn write<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Unwrap the tree.
    pub fn into_inner(self) -> M {
        self.inner.into_inner()
    }
}

impl<M> From<M> for Shared<M> {
    fn from(tree: M) -> Self {
        Shared::new(tree)
    }
}

fn owned<K: Clone, V: Clone>((k, v): (&K, &V)) -> (K, V) {
    (k.clone(), v.clone())
}

impl<K, V, Ix> Shared<OrderedMap<K, V, Ix>>
where
    K: Ord + Clone,
    V: Clone,
    Ix: IndexType,
{
    /// See [`OrderedMap::upsert`].
    pub fn upsert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().upsert(key, value)
    }

    /// See [`OrderedMap::delete`].
    pub fn delete<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.write().delete(key)
    }

    /// See [`OrderedMap::clear`].
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// See [`OrderedMap::search`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when the key is absent.
    pub fn search<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().search(key).cloned()
    }

    /// See [`OrderedMap::min`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when the map is empty.
    pub fn min(&self) -> Result<(K, V)> {
        self.inner.read().min().map(owned)
    }

    /// See [`OrderedMap::max`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when the map is empty.
    pub fn max(&self) -> Result<(K, V)> {
        self.inner.read().max().map(owned)
    }

    /// See [`OrderedMap::successor`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when there is no successor.
    pub fn successor<Q>(&self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().successor(key).map(owned)
    }

    /// See [`OrderedMap::root`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when the map is empty.
    pub fn root(&self) -> Result<(K, V)> {
        self.inner.read().root().map(owned)
    }

    /// See [`OrderedMap::height`].
    pub fn height(&self) -> isize {
        self.inner.read().height()
    }

    /// See [`OrderedMap::in_order`].
    pub fn in_order(&self) -> Vec<(K, V)> {
        self.inner.read().iter().map(owned).collect()
    }

    /// See [`OrderedMap::len`].
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// See [`OrderedMap::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl<T, V, Ix> Shared<IntervalIndex<T, V, Ix>>
where
    T: Ord + Clone,
    V: Clone,
    Ix: IndexType,
{
    /// See [`IntervalIndex::upsert`].
    pub fn upsert(&self, interval: Interval<T>, value: V) -> Option<V> {
        self.inner.write().upsert(interval, value)
    }

    /// See [`IntervalIndex::delete`].
    pub fn delete(&self, interval: &Interval<T>) -> Option<V> {
        self.inner.write().delete(interval)
    }

    /// See [`IntervalIndex::clear`].
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// See [`IntervalIndex::search`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when the interval is absent.
    pub fn search(&self, interval: &Interval<T>) -> Result<V> {
        self.inner.read().search(interval).cloned()
    }

    /// See [`IntervalIndex::find_first_overlapping`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when nothing overlaps `query`.
    pub fn find_first_overlapping(&self, query: &Interval<T>) -> Result<(Interval<T>, V)> {
        self.inner.read().find_first_overlapping(query).map(owned)
    }

    /// See [`IntervalIndex::find_all_overlapping`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when nothing overlaps `query`.
    pub fn find_all_overlapping(&self, query: &Interval<T>) -> Result<Vec<(Interval<T>, V)>> {
        let guard = self.inner.read();
        let found = guard.find_all_overlapping(query)?;
        Ok(found.into_iter().map(owned).collect())
    }

    /// See [`IntervalIndex::overlaps`].
    pub fn overlaps(&self, query: &Interval<T>) -> bool {
        self.inner.read().overlaps(query)
    }

    /// See [`IntervalIndex::min`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when the index is empty.
    pub fn min(&self) -> Result<(Interval<T>, V)> {
        self.inner.read().min().map(owned)
    }

    /// See [`IntervalIndex::max`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when the index is empty.
    pub fn max(&self) -> Result<(Interval<T>, V)> {
        self.inner.read().max().map(owned)
    }

    /// See [`IntervalIndex::successor`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when there is no successor.
    pub fn successor(&self, interval: &Interval<T>) -> Result<(Interval<T>, V)> {
        self.inner.read().successor(interval).map(owned)
    }

    /// See [`IntervalIndex::root`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when the index is empty.
    pub fn root(&self) -> Result<(Interval<T>, V)> {
        self.inner.read().root().map(owned)
    }

    /// See [`IntervalIndex::height`].
    pub fn height(&self) -> isize {
        self.inner.read().height()
    }

    /// See [`IntervalIndex::in_order`].
    pub fn in_order(&self) -> Vec<(Interval<T>, V)> {
        self.inner.read().iter().map(owned).collect()
    }

    /// See [`IntervalIndex::len`].
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// See [`IntervalIndex::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
