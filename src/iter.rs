use crate::augment::Max;
use crate::engine::RbTree;
use crate::index::{IndexType, NodeIndex};
use crate::interval::Interval;
use crate::node::Node;

/// Pushes a link of nodes on the left to stack.
fn left_link<K, V, A, Ix>(tree: &RbTree<K, V, A, Ix>, mut x: NodeIndex<Ix>) -> Vec<NodeIndex<Ix>>
where
    Ix: IndexType,
{
    let mut nodes = vec![];
    while !x.is_sentinel() {
        nodes.push(x);
        x = tree.node_ref(x, Node::left);
    }
    nodes
}

/// An iterator over the entries of a tree, sorted by key.
///
/// Created by `OrderedMap::iter` and `IntervalIndex::iter`.
#[derive(Debug)]
pub struct Iter<'a, K, V, A, Ix> {
    /// Reference to the tree
    tree: &'a RbTree<K, V, A, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, K, V, A, Ix> Iter<'a, K, V, A, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a RbTree<K, V, A, Ix>) -> Self {
        Iter {
            tree,
            stack: left_link(tree, tree.root),
            remaining: tree.len,
        }
    }
}

impl<'a, K, V, A, Ix> Iterator for Iter<'a, K, V, A, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        self.stack
            .extend(left_link(self.tree, self.tree.node_ref(x, Node::right)));
        self.remaining = self.remaining.saturating_sub(1);
        Some(self.tree.node_ref(x, Node::entry))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, A, Ix> ExactSizeIterator for Iter<'_, K, V, A, Ix> where Ix: IndexType {}

/// Largest high endpoint below `x`, `None` for the sentinel.
fn subtree_max<T, V, Ix>(tree: &RbTree<Interval<T>, V, Max<T>, Ix>, x: NodeIndex<Ix>) -> Option<&T>
where
    Ix: IndexType,
{
    tree.node_ref(x, Node::aug).map(Max::get)
}

/// Pushes the left link of `x` that may still hold overlaps of `query`.
///
/// Nodes starting after `query` are not pushed, since neither they nor their
/// right subtrees can overlap; their left subtrees still can.
fn left_link_with_query<T, V, Ix>(
    tree: &RbTree<Interval<T>, V, Max<T>, Ix>,
    mut x: NodeIndex<Ix>,
    query: &Interval<T>,
) -> Vec<NodeIndex<Ix>>
where
    T: Ord,
    Ix: IndexType,
{
    let mut stack = vec![];
    while let Some(node) = tree.node_ref(x, Node::non_sentinel) {
        if subtree_max(tree, x).map_or(true, |max| max < &query.low) {
            break;
        }
        if node.key().low <= query.high {
            stack.push(x);
        }
        x = node.left();
    }
    stack
}

/// A lazy in-order iterator over the entries overlapping a query interval.
///
/// Subtrees whose maximum high endpoint is below the query are skipped
/// entirely. Created by `IntervalIndex::overlapping`.
#[derive(Debug)]
pub struct OverlapIter<'a, 'q, T, V, Ix> {
    /// Reference to the tree
    tree: &'a RbTree<Interval<T>, V, Max<T>, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
    /// Filter criteria
    query: &'q Interval<T>,
}

impl<'a, 'q, T, V, Ix> OverlapIter<'a, 'q, T, V, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a RbTree<Interval<T>, V, Max<T>, Ix>, query: &'q Interval<T>) -> Self {
        OverlapIter {
            tree,
            stack: left_link_with_query(tree, tree.root, query),
            query,
        }
    }
}

impl<'a, T, V, Ix> Iterator for OverlapIter<'a, '_, T, V, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    type Item = (&'a Interval<T>, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let x = self.stack.pop()?;
            self.stack.extend(left_link_with_query(
                self.tree,
                self.tree.node_ref(x, Node::right),
                self.query,
            ));
            if self.tree.node_ref(x, Node::key).overlaps(self.query) {
                return Some(self.tree.node_ref(x, Node::entry));
            }
        }
    }
}
