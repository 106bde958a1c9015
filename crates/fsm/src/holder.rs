//! Ordered, owning child collections shared by the composite states.

use std::fmt;

use crate::behavior::Behavior;
use crate::node::{BoxedNode, Node};
use crate::state::State;

/// Children of a composite, kept in insertion order.
///
/// Each child is exclusively owned by the collection; no child knows its
/// parent.
#[derive(Default)]
pub struct Children {
    nodes: Vec<BoxedNode>,
}

impl Children {
    pub fn new(nodes: Vec<BoxedNode>) -> Self {
        Self { nodes }
    }

    pub fn push(&mut self, node: BoxedNode) {
        self.nodes.push(node);
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = BoxedNode>) {
        self.nodes.extend(nodes);
    }

    /// Inserts `nodes` in order, directly after position `index`.
    ///
    /// An index past the end appends.
    pub fn insert_after(&mut self, index: usize, nodes: impl IntoIterator<Item = BoxedNode>) {
        let at = index.saturating_add(1).min(self.nodes.len());
        self.nodes.splice(at..at, nodes);
    }

    pub fn get(&self, index: usize) -> Option<&dyn Node> {
        self.nodes.get(index).map(|node| node.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Node> + '_ {
        self.nodes.iter().map(|node| node.as_ref())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Forces `frozen` onto every current child. Children added later keep
    /// their own flag.
    pub fn set_frozen(&self, frozen: bool) {
        for child in self.iter() {
            child.set_frozen(frozen);
        }
    }

    pub fn all_ended(&self) -> bool {
        self.iter().all(|child| child.is_ended())
    }

    pub fn all_ready(&self) -> bool {
        self.iter().all(|child| child.is_ready_to_end())
    }
}

impl FromIterator<BoxedNode> for Children {
    fn from_iter<I: IntoIterator<Item = BoxedNode>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|child| child.name())).finish()
    }
}

/// A behavior that owns child nodes.
pub trait Holder: Behavior {
    fn children(&self) -> &Children;

    fn children_mut(&mut self) -> &mut Children;
}

/// Holder operations, available on any state wrapping a [`Holder`].
///
/// Appending is allowed while the holder runs. These lock the holder, so
/// they must not be called from inside a hook of one of its own children.
impl<H: Holder> State<H> {
    /// Appends a child at the end.
    pub fn add(&self, node: BoxedNode) {
        self.with_behavior_mut(|holder| holder.children_mut().push(node));
    }

    /// Appends children at the end, preserving their order.
    pub fn add_all(&self, nodes: impl IntoIterator<Item = BoxedNode>) {
        self.with_behavior_mut(|holder| holder.children_mut().extend(nodes));
    }

    pub fn len(&self) -> usize {
        self.with_behavior(|holder| holder.children().len())
    }

    pub fn is_empty(&self) -> bool {
        self.with_behavior(|holder| holder.children().is_empty())
    }

    /// Visits every child in insertion order.
    pub fn for_each_child(&self, mut visit: impl FnMut(usize, &dyn Node)) {
        self.with_behavior(|holder| {
            for (index, child) in holder.children().iter().enumerate() {
                visit(index, child);
            }
        });
    }
}
