use crate::index::{IndexType, NodeIndex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Node of the red-black tree
///
/// Every field except `color` is `None` only for the sentinel.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node<K, V, A, Ix> {
    /// Left children
    pub left: Option<NodeIndex<Ix>>,
    /// Right children
    pub right: Option<NodeIndex<Ix>>,
    /// Parent
    pub parent: Option<NodeIndex<Ix>>,
    /// Color of the node
    pub color: Color,

    /// Key of the node
    pub key: Option<K>,
    /// Summary of the subtree rooted here
    pub aug: Option<A>,
    /// Value of the node
    pub value: Option<V>,
}

impl<K, V, A, Ix> Node<K, V, A, Ix>
where
    Ix: IndexType,
{
    /// The shared nil node.
    pub fn new_sentinel() -> Self {
        Node {
            key: None,
            value: None,
            aug: None,
            left: None,
            right: None,
            parent: None,
            color: Color::Black,
        }
    }

    /// A detached red leaf.
    pub fn new_leaf(key: K, value: V, aug: A) -> Self {
        Node {
            aug: Some(aug),
            key: Some(key),
            value: Some(value),
            left: Some(NodeIndex::sentinel()),
            right: Some(NodeIndex::sentinel()),
            parent: Some(NodeIndex::sentinel()),
            color: Color::Red,
        }
    }
}

// Convenient getter/setter methods
impl<K, V, A, Ix> Node<K, V, A, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn key(&self) -> &K {
        self.key.as_ref().unwrap()
    }

    pub fn aug(&self) -> Option<&A> {
        self.aug.as_ref()
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left.unwrap_or_default()
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right.unwrap_or_default()
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent.unwrap_or_default()
    }

    pub fn is_sentinel(&self) -> bool {
        self.key.is_none()
    }

    /// `Some(self)` for a real node, `None` for the sentinel.
    pub fn non_sentinel(&self) -> Option<&Self> {
        self.key.is_some().then_some(self)
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn value(&self) -> &V {
        self.value.as_ref().unwrap()
    }

    pub fn value_mut(&mut self) -> &mut V {
        self.value.as_mut().unwrap()
    }

    pub fn entry(&self) -> (&K, &V) {
        (self.key(), self.value())
    }

    pub fn set_value(value: V) -> impl FnOnce(&mut Node<K, V, A, Ix>) -> V {
        move |node: &mut Node<K, V, A, Ix>| node.value.replace(value).unwrap()
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<K, V, A, Ix>) {
        move |node: &mut Node<K, V, A, Ix>| {
            node.color = color;
        }
    }

    pub fn set_aug(aug: A) -> impl FnOnce(&mut Node<K, V, A, Ix>) {
        move |node: &mut Node<K, V, A, Ix>| {
            let _ignore = node.aug.replace(aug);
        }
    }

    pub fn set_left(left: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, A, Ix>) {
        move |node: &mut Node<K, V, A, Ix>| {
            let _ignore = node.left.replace(left);
        }
    }

    pub fn set_right(right: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, A, Ix>) {
        move |node: &mut Node<K, V, A, Ix>| {
            let _ignore = node.right.replace(right);
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, A, Ix>) {
        move |node: &mut Node<K, V, A, Ix>| {
            let _ignore = node.parent.replace(parent);
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}
