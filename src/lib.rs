//! `rb_index` provides an ordered map and an interval index built on one
//! red-black balancing engine.
//!
//! Both structures implement the full insertion and deletion algorithms of a
//! red-black tree, so every modification takes at most `O(log n)` time. The
//! interval index additionally keeps, at every node, the largest high endpoint
//! in that node's subtree, which lets overlap queries run in `O(log n + k)`.
//!
//! Nodes are stored in a vector and linked by indices instead of pointers.
//! Slot 0 is a shared black sentinel that stands in for every missing child,
//! so the balancing code never checks for a missing node. Because nothing is
//! linked by reference, both maps are `Send` and `Sync` and can be wrapped in
//! [`Shared`] for use from several threads behind a single `RwLock`.
//!
//! # Example
//!
//! ```rust
//! use rb_index::{Interval, IntervalIndex, OrderedMap};
//!
//! let mut map = OrderedMap::new();
//! map.upsert(3, "three");
//! map.upsert(1, "one");
//! assert_eq!(map.min(), Ok((&1, &"one")));
//!
//! let mut index = IntervalIndex::new();
//! let int = Interval::new(1, 2).unwrap();
//! index.upsert(int.clone(), 123456);
//! assert_eq!(index.search(&int), Ok(&123456));
//! assert!(index.overlaps(&Interval::new(2, 5).unwrap()));
//! ```
//!

mod augment;
mod engine;
mod error;
mod index;
mod interval;
mod intervalindex;
mod iter;
mod node;
mod orderedmap;
mod sync;


pub use augment::Max;
pub use error::{Error, Result};
pub use index::{DefaultIx, IndexType};
pub use interval::Interval;
pub use intervalindex::IntervalIndex;
pub use iter::{Iter, OverlapIter};
pub use orderedmap::OrderedMap;
pub use sync::{Shared, SharedIntervalIndex, SharedOrderedMap};
