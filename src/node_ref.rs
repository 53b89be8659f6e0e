use std::fmt;

use crate::arena::{NodeArena, NodeId};

/// Read-only handle to a live node.
///
/// Handles borrow the tree, so they can't outlive a mutation.
pub struct NodeRef<'a, K> {
    nodes: &'a NodeArena<K>,
    id: NodeId,
}

impl<'a, K> NodeRef<'a, K> {
    /// Wrap `id` if it names a live node.
    pub(crate) fn new(nodes: &'a NodeArena<K>, id: NodeId) -> Option<Self> {
        if id.is_null() || nodes.is_vacant(id) {
            None
        } else {
            Some(Self { nodes, id })
        }
    }

    pub fn key(&self) -> &'a K {
        self.nodes.live_key(self.id)
    }

    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        Self::new(self.nodes, self.nodes.left(self.id))
    }

    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        Self::new(self.nodes, self.nodes.right(self.id))
    }

    /// The node owning this one as a child; `None` at the root.
    pub fn parent(&self) -> Option<NodeRef<'a, K>> {
        Self::new(self.nodes, self.nodes.parent(self.id))
    }

    /// Height of the subtree rooted at this node. A leaf has height 1.
    pub fn height(&self) -> u32 {
        self.nodes.height(self.id)
    }

    pub fn is_leaf(&self) -> bool {
        self.nodes.left(self.id).is_null() && self.nodes.right(self.id).is_null()
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<K> PartialEq for NodeRef<'_, K> {
    /// Two handles are equal when they name the same node of the same tree.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.id == other.id
    }
}

impl<K> Eq for NodeRef<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("height", &self.height())
            .finish()
    }
}
