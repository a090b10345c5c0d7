//! The red-black balancing engine shared by `OrderedMap` and `IntervalIndex`.
//!
//! Nodes live in a vector and refer to each other by [`NodeIndex`]. Slot 0 is
//! the sentinel: it stands in for every missing child and for the parent of
//! the root, so rotations and fixups never have to check for a missing node.
//! The algorithms follow Cormen et al. (CLRS, chapter 13), with an
//! [`Augment`] hook refreshed wherever a subtree changes shape.

use std::cmp::Ordering;

use log::{debug, trace};

use crate::augment::Augment;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::node::{Color, Node};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An arena-backed red-black tree.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) struct RbTree<K, V, A, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<K, V, A, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of elements in the tree
    pub(crate) len: usize,
}

impl<K, V, A, Ix> RbTree<K, V, A, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(1));
        nodes.push(Node::new_sentinel());
        RbTree {
            nodes,
            root: NodeIndex::sentinel(),
            len: 0,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::new_sentinel());
        self.root = NodeIndex::sentinel();
        self.len = 0;
    }

    /// Leftmost node of the subtree rooted at `x`, or the sentinel.
    pub(crate) fn minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if x.is_sentinel() {
            return x;
        }
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Rightmost node of the subtree rooted at `x`, or the sentinel.
    pub(crate) fn maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if x.is_sentinel() {
            return x;
        }
        while !self.right_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// In-order successor of `x`, or the sentinel.
    pub(crate) fn successor(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if x.is_sentinel() {
            return x;
        }
        if !self.right_ref(x, Node::is_sentinel) {
            return self.minimum(self.node_ref(x, Node::right));
        }
        let mut p = self.node_ref(x, Node::parent);
        while !p.is_sentinel() && self.node_ref(p, Node::right) == x {
            x = p;
            p = self.node_ref(p, Node::parent);
        }
        p
    }

    /// Height of the subtree rooted at `x`: -1 for the sentinel.
    pub(crate) fn height(&self, x: NodeIndex<Ix>) -> isize {
        if x.is_sentinel() {
            return -1;
        }
        let lh = self.height(self.node_ref(x, Node::left));
        let rh = self.height(self.node_ref(x, Node::right));
        1 + lh.max(rh)
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }

    /// Replace one subtree as a child of its parent with another subtree.
    ///
    /// `v` may be the sentinel; its parent is still written, since the
    /// remove fixup starts its upward walk from there.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        if self.parent_ref(u, Node::is_sentinel) {
            self.root = v;
        } else if self.is_left_child(u) {
            self.parent_mut(u, Node::set_left(v));
        } else {
            self.parent_mut(u, Node::set_right(v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// Re-point every link to `old` at `new` after the node in slot `old`
    /// was moved into slot `new` by `swap_remove`.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.root == old {
            self.root = new;
        }
        if self.nodes.get(new.index()).is_none() {
            return;
        }
        if !self.parent_ref(new, Node::is_sentinel) {
            if self.parent_ref(new, Node::left) == old {
                self.parent_mut(new, Node::set_left(new));
            } else {
                self.parent_mut(new, Node::set_right(new));
            }
        }
        if !self.left_ref(new, Node::is_sentinel) {
            self.left_mut(new, Node::set_parent(new));
        }
        if !self.right_ref(new, Node::is_sentinel) {
            self.right_mut(new, Node::set_parent(new));
        }
        trace!("node moved from slot {} to slot {}", old.index(), new.index());
    }
}

impl<K, V, A, Ix> RbTree<K, V, A, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Search for the node with exactly the given key, or the sentinel.
    pub(crate) fn search<Q>(&self, key: &Q) -> NodeIndex<Ix>
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut x = self.root;
        while let Some(node) = self.node_ref(x, Node::non_sentinel) {
            match key.cmp(node.key().borrow()) {
                Ordering::Equal => return x,
                Ordering::Less => x = node.left(),
                Ordering::Greater => x = node.right(),
            }
        }
        x
    }
}

impl<K, V, A, Ix> RbTree<K, V, A, Ix>
where
    K: Ord,
    A: Augment<K>,
    Ix: IndexType,
{
    /// Insert a key-value pair, or replace the value of an equal key and
    /// return the previous one.
    ///
    /// Once the leaf is attached, its summary is folded into every ancestor
    /// before the fixup runs. A replaced value leaves every summary as is.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    pub(crate) fn upsert(&mut self, key: K, value: V) -> Option<V> {
        let summary = A::from_key(&key);
        let mut y = NodeIndex::sentinel();
        let mut x = self.root;
        let mut side = Ordering::Equal;

        while !x.is_sentinel() {
            y = x;
            side = key.cmp(self.node_ref(x, Node::key));
            if side == Ordering::Equal {
                return Some(self.node_mut(x, Node::set_value(value)));
            }
            if side == Ordering::Less {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }

        let z = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != z,
            "Reached maximum number of nodes"
        );
        let mut p = y;
        while !p.is_sentinel() {
            self.node_mut(p, |pn| {
                if let Some(aug) = pn.aug.as_mut() {
                    aug.merge(&summary);
                }
            });
            p = self.node_ref(p, Node::parent);
        }
        self.nodes.push(Node::new_leaf(key, value, summary));
        self.node_mut(z, Node::set_parent(y));
        if y.is_sentinel() {
            self.root = z;
        } else if side == Ordering::Less {
            self.node_mut(y, Node::set_left(z));
        } else {
            self.node_mut(y, Node::set_right(z));
        }

        self.insert_fixup(z);

        self.len = self.len.wrapping_add(1);
        trace!("node attached at slot {}", z.index());
        None
    }

    /// Remove the node in slot `z` and return its value.
    ///
    /// The last node of the arena is moved into the freed slot.
    pub(crate) fn remove_at(&mut self, z: NodeIndex<Ix>) -> Option<V> {
        if z.is_sentinel() {
            return None;
        }
        self.unlink(z);

        let mut node = self.nodes.swap_remove(z.index());
        let old = NodeIndex::<Ix>::new(self.nodes.len());
        self.update_idx(old, z);

        self.len = self.len.wrapping_sub(1);
        trace!("node removed from slot {}", z.index());
        node.value.take()
    }

    /// Detach `z` from the tree and restore every invariant.
    fn unlink(&mut self, z: NodeIndex<Ix>) {
        let mut y = z;
        let mut y_orig_color = self.node_ref(y, Node::color);
        let x;
        if self.left_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::right);
            self.transplant(z, x);
            self.update_aug_bottom_up(self.node_ref(z, Node::parent));
        } else if self.right_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::left);
            self.transplant(z, x);
            self.update_aug_bottom_up(self.node_ref(z, Node::parent));
        } else {
            y = self.minimum(self.node_ref(z, Node::right));
            // lowest node whose subtree changed
            let mut p = y;
            y_orig_color = self.node_ref(y, Node::color);
            x = self.node_ref(y, Node::right);
            if self.node_ref(y, Node::parent) == z {
                self.node_mut(x, Node::set_parent(y));
            } else {
                self.transplant(y, x);
                p = self.node_ref(y, Node::parent);
                self.node_mut(y, Node::set_right(self.node_ref(z, Node::right)));
                self.right_mut(y, Node::set_parent(y));
            }
            self.transplant(z, y);
            self.node_mut(y, Node::set_left(self.node_ref(z, Node::left)));
            self.left_mut(y, Node::set_parent(y));
            self.node_mut(y, Node::set_color(self.node_ref(z, Node::color)));

            self.update_aug_bottom_up(p);
        }

        if matches!(y_orig_color, Color::Black) {
            self.remove_fixup(x);
        }
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            // a red parent is never the root
            if self.grand_parent_ref(z, Node::is_sentinel) {
                debug_assert!(false, "red node {z:?} has no grandparent");
                debug!("insert fixup stopped: red node without grandparent");
                break;
            }
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a remove.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>) {
        while x != self.root && self.node_ref(x, Node::is_black) {
            let mut w;
            if self.is_left_child(x) {
                w = self.parent_ref(x, Node::right);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::right);
                }
                // a doubly black node always has a real sibling
                if w.is_sentinel() {
                    debug_assert!(false, "sibling of {x:?} is the sentinel");
                    debug!("remove fixup stopped: sibling is the sentinel");
                    break;
                }
                if self.left_ref(w, Node::is_black) && self.right_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.right_ref(w, Node::is_black) {
                        self.left_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.right_rotate(w);
                        w = self.parent_ref(x, Node::right);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.right_mut(w, Node::set_color(Color::Black));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            } else {
                w = self.parent_ref(x, Node::left);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::left);
                }
                if w.is_sentinel() {
                    debug_assert!(false, "sibling of {x:?} is the sentinel");
                    debug!("remove fixup stopped: sibling is the sentinel");
                    break;
                }
                if self.right_ref(w, Node::is_black) && self.left_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.left_ref(w, Node::is_black) {
                        self.right_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.left_rotate(w);
                        w = self.parent_ref(x, Node::left);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.left_mut(w, Node::set_color(Color::Black));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            }
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    pub(crate) fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.left_ref(y, Node::is_sentinel) {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));

        self.rotate_update_aug(x, y);
    }

    /// Binary tree right rotate.
    pub(crate) fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.right_ref(y, Node::is_sentinel) {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));

        self.rotate_update_aug(x, y);
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Update summaries after a rotation: the demoted node `x` first, then
    /// the promoted node `y`, which now sits above it.
    fn rotate_update_aug(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.recalculate_aug(x);
        self.recalculate_aug(y);
    }

    /// Update summaries towards the root
    fn update_aug_bottom_up(&mut self, x: NodeIndex<Ix>) {
        let mut p = x;
        while !p.is_sentinel() {
            self.recalculate_aug(p);
            p = self.node_ref(p, Node::parent);
        }
    }

    /// Recalculate the summary of `x` from its key and its children
    fn recalculate_aug(&mut self, x: NodeIndex<Ix>) {
        let mut aug = A::from_key(self.node_ref(x, Node::key));
        if let Some(left) = self.left_ref(x, Node::aug) {
            aug.merge(left);
        }
        if let Some(right) = self.right_ref(x, Node::aug) {
            aug.merge(right);
        }
        self.node_mut(x, Node::set_aug(aug));
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, V, A, Ix> RbTree<K, V, A, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, A, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, A, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, A, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, A, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, A, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, A, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, A, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, A, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, A, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, A, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    type Plain = RbTree<i32, &'static str, ()>;

    fn keys_in_order(tree: &Plain) -> Vec<i32> {
        let mut out = vec![];
        let mut x = tree.minimum(tree.root);
        while !x.is_sentinel() {
            out.push(*tree.node_ref(x, Node::key));
            x = tree.successor(x);
        }
        out
    }

    #[test]
    fn rotations_preserve_order_and_root() {
        let mut tree = Plain::with_capacity(3);
        // no fixup rotation happens for 2 then 1 then 3
        tree.upsert(2, "b");
        tree.upsert(1, "a");
        tree.upsert(3, "c");
        let root = tree.root;
        assert_eq!(tree.node_ref(root, Node::key), &2);

        tree.left_rotate(root);
        assert_eq!(tree.node_ref(tree.root, Node::key), &3);
        assert!(tree.node_ref(tree.root, Node::parent).is_sentinel());
        assert_eq!(keys_in_order(&tree), vec![1, 2, 3]);

        tree.right_rotate(tree.root);
        assert_eq!(tree.node_ref(tree.root, Node::key), &2);
        assert_eq!(keys_in_order(&tree), vec![1, 2, 3]);
    }

    #[test]
    fn rotation_without_child_is_noop() {
        let mut tree = Plain::with_capacity(1);
        tree.upsert(1, "a");
        let root = tree.root;
        tree.left_rotate(root);
        tree.right_rotate(root);
        assert_eq!(tree.root, root);
    }

    #[test]
    fn removing_the_last_slot_needs_no_relink() {
        let mut tree = Plain::with_capacity(2);
        tree.upsert(1, "a");
        tree.upsert(2, "b");
        let last = tree.search(&2);
        assert_eq!(last.index(), tree.nodes.len() - 1);
        assert_eq!(tree.remove_at(last), Some("b"));
        assert_eq!(tree.nodes.len(), 2);
        assert_eq!(keys_in_order(&tree), vec![1]);
    }

    #[test]
    fn removing_a_middle_slot_relinks_the_moved_node() {
        let mut tree = Plain::with_capacity(3);
        for k in [1, 2, 3] {
            tree.upsert(k, "v");
        }
        let first = tree.search(&1);
        assert_eq!(first.index(), 1);
        tree.remove_at(first);
        assert_eq!(keys_in_order(&tree), vec![2, 3]);
        for k in [2, 3] {
            let x = tree.search(&k);
            assert!(!x.is_sentinel());
            let p = tree.node_ref(x, Node::parent);
            if !p.is_sentinel() {
                let (l, r) = tree.node_ref(p, |pn| (pn.left(), pn.right()));
                assert!(l == x || r == x);
            }
        }
    }

    /// Subtree size; merging the same child twice would double count.
    struct Count(usize);

    impl Augment<i32> for Count {
        fn from_key(_key: &i32) -> Self {
            Count(1)
        }

        fn merge(&mut self, child: &Self) {
            self.0 += child.0;
        }
    }

    type Counted = RbTree<i32, u32, Count>;

    fn check_counts(tree: &Counted, x: NodeIndex<u32>) -> usize {
        if x.is_sentinel() {
            return 0;
        }
        let n = 1
            + check_counts(tree, tree.node_ref(x, Node::left))
            + check_counts(tree, tree.node_ref(x, Node::right));
        assert_eq!(tree.node_ref(x, Node::aug).map(|c| c.0), Some(n));
        n
    }

    #[test]
    fn replacing_a_value_leaves_summaries_alone() {
        let mut tree = Counted::with_capacity(32);
        for k in 0..32 {
            assert_eq!(tree.upsert(k, 0), None);
        }
        for k in 0..32 {
            assert_eq!(tree.upsert(k, 1), Some(0));
        }
        assert_eq!(check_counts(&tree, tree.root), 32);

        for k in (0..32).step_by(3) {
            let x = tree.search(&k);
            assert_eq!(tree.remove_at(x), Some(1));
        }
        assert_eq!(check_counts(&tree, tree.root), 21);
    }

    #[test]
    fn sentinel_stays_black() {
        let mut tree = Plain::with_capacity(16);
        for k in 0..16 {
            tree.upsert(k, "v");
        }
        for k in (0..16).step_by(2) {
            let x = tree.search(&k);
            tree.remove_at(x);
        }
        assert!(tree.node_ref(NodeIndex::sentinel(), Node::is_black));
        assert!(tree.node_ref(NodeIndex::sentinel(), Node::is_sentinel));
    }
}
