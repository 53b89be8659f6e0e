//! Deletion by child promotion.

use log::{debug, trace};

use crate::arena::NodeId;
use crate::order::KeyOrder;
use crate::{OrderedTree, TreeError};

impl<K: Eq, O: KeyOrder<K>> OrderedTree<K, O> {
    /// Remove the node carrying `key` and return its key.
    ///
    /// The walk follows the same path as [`find`](Self::find), so only nodes
    /// on the search path for `key` are visited. A removed node's slot is
    /// filled by promotion:
    ///
    /// - a leaf's slot becomes empty (a leaf root is left vacant instead);
    /// - a node with one child is replaced by that child;
    /// - a node with two children is replaced by its in-order successor. When
    ///   the right child has no left subtree the right child itself moves up
    ///   and adopts the removed node's left subtree.
    ///
    /// Returns [`TreeError::NotFound`] and leaves the tree untouched when no
    /// node carries `key`.
    pub fn remove(&mut self, key: &K) -> Result<K, TreeError> {
        let target = self.locate(key);
        if target.is_null() {
            return Err(TreeError::NotFound);
        }

        let removed = self.unlink(target);
        self.count -= 1;
        self.refresh_stats();
        removed.ok_or(TreeError::NotFound)
    }

    fn unlink(&mut self, target: NodeId) -> Option<K> {
        let left = self.nodes.left(target);
        let right = self.nodes.right(target);
        let parent = self.nodes.parent(target);

        // Leaf.
        if left.is_null() && right.is_null() {
            if parent.is_null() {
                debug!("vacating leaf root");
                return self.nodes.vacate(target);
            }
            self.nodes
                .replace_child(&mut self.root, parent, target, NodeId::NULL);
            let key = self.nodes.free(target);
            self.rebalance_from(parent);
            return key;
        }

        // One child: promote it.
        if left.is_null() || right.is_null() {
            let child = if left.is_null() { right } else { left };
            trace!("promoting only child {child:?} over {target:?}");
            self.nodes.replace_child(&mut self.root, parent, target, child);
            let key = self.nodes.free(target);
            self.rebalance_from(parent);
            return key;
        }

        // Two children: promote the successor.
        let successor = self.nodes.min(right);
        let from = if successor == right {
            successor
        } else {
            let sp = self.nodes.parent(successor);
            let sr = self.nodes.right(successor);
            self.nodes.set_left(sp, sr);
            self.nodes.set_parent(sr, sp);
            self.nodes.set_right(successor, right);
            self.nodes.set_parent(right, successor);
            sp
        };
        trace!("promoting successor {successor:?} over {target:?}");
        self.nodes.set_left(successor, left);
        self.nodes.set_parent(left, successor);
        // The successor inherits the removed node's position, so it starts out
        // with that position's height for the retrace comparison.
        let height = self.nodes.height(target);
        self.nodes.set_height(successor, height);
        self.nodes
            .replace_child(&mut self.root, parent, target, successor);
        let key = self.nodes.free(target);
        self.rebalance_from(from);
        key
    }
}
