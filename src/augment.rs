//! Per-node derived data maintained by the balancing engine.
//!
//! Every node caches a summary of its whole subtree. The engine rebuilds a
//! node's summary from its own key and its children's summaries whenever the
//! subtree below it changes shape, so an augmentation only has to say how a
//! single key is summarized and how a child's summary folds into a parent's.
//! The sentinel carries no summary, which acts as the identity element.

use crate::interval::Interval;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Subtree summary stored at every node.
pub trait Augment<K>: Sized {
    /// Summary of a subtree holding only `key`.
    fn from_key(key: &K) -> Self;

    /// Folds the summary of a child subtree into `self`.
    ///
    /// When a key is attached, its summary is merged exactly once into each
    /// of its ancestors.
    fn merge(&mut self, child: &Self);
}

/// No augmentation: the plain ordered map.
impl<K> Augment<K> for () {
    #[inline(always)]
    fn from_key(_key: &K) -> Self {}

    #[inline(always)]
    fn merge(&mut self, _child: &Self) {}
}

/// The largest high endpoint in a subtree of intervals.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Max<T>(pub(crate) T);

impl<T> Max<T> {
    /// The maximum high endpoint.
    pub fn get(&self) -> &T {
        &self.0
    }
}

impl<T: Ord + Clone> Augment<Interval<T>> for Max<T> {
    #[inline]
    fn from_key(key: &Interval<T>) -> Self {
        Max(key.high.clone())
    }

    #[inline]
    fn merge(&mut self, child: &Self) {
        if child.0 > self.0 {
            self.0 = child.0.clone();
        }
    }
}
