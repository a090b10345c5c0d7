use std::fmt;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default index width of the node arena.
pub type DefaultIx = u32;

/// Integer types usable as arena slot indices.
///
/// # Safety
///
/// `index(new(x)) == x` must hold for every `x <= max().index()`; the engine
/// relies on it to address the arena.
pub unsafe trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + 'static {
    fn new(x: usize) -> Self;
    fn index(&self) -> usize;
    fn max() -> Self;
}

unsafe impl IndexType for u32 {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x as u32
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self as usize
    }
    #[inline(always)]
    fn max() -> Self {
        u32::MAX
    }
}

unsafe impl IndexType for usize {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self
    }
    #[inline(always)]
    fn max() -> Self {
        usize::MAX
    }
}

/// Arena slot of a node. Slot 0 always holds the sentinel.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeIndex<Ix> {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(IndexType::new(x))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    /// One past the last addressable slot.
    #[inline]
    pub fn end() -> Self {
        NodeIndex(IndexType::max())
    }

    /// The shared nil node.
    #[inline]
    pub fn sentinel() -> Self {
        NodeIndex::new(0)
    }

    #[inline]
    pub fn is_sentinel(self) -> bool {
        self.index() == 0
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sentinel_is_slot_zero() {
        assert!(NodeIndex::<u32>::sentinel().is_sentinel());
        assert!(!NodeIndex::<u32>::new(1).is_sentinel());
        assert_eq!(NodeIndex::<usize>::new(42).index(), 42);
        assert_eq!(NodeIndex::<u32>::end().index(), u32::MAX as usize);
    }
}
