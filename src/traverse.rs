//! Depth-first traversals.
//!
//! All walks keep an explicit stack instead of recursing, so a degenerate
//! (list-shaped) unbalanced tree can't overflow the call stack. A vacant root
//! is skipped.

use std::iter::FusedIterator;

use crate::arena::{NodeArena, NodeId};
use crate::OrderedTree;

/// Depth-first visiting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    Pre,
    /// Left subtree, then node, then right subtree: ascending key order.
    In,
    /// Left subtree, then right subtree, then node: children before parents.
    Post,
}

impl<K, O> OrderedTree<K, O> {
    pub fn traverse<F: FnMut(&K)>(&self, order: Order, f: F) {
        match order {
            Order::Pre => self.pre_order(f),
            Order::In => self.in_order(f),
            Order::Post => self.post_order(f),
        }
    }

    /// Visit each node before its subtrees, left before right.
    pub fn pre_order<F: FnMut(&K)>(&self, mut f: F) {
        let mut stack = Vec::new();
        if !self.root.is_null() {
            stack.push(self.root);
        }
        while let Some(id) = stack.pop() {
            if let Some(key) = self.nodes.key(id) {
                f(key);
            }
            let right = self.nodes.right(id);
            if !right.is_null() {
                stack.push(right);
            }
            let left = self.nodes.left(id);
            if !left.is_null() {
                stack.push(left);
            }
        }
    }

    /// Visit keys in ascending order under the tree's ordering rule.
    pub fn in_order<F: FnMut(&K)>(&self, mut f: F) {
        for key in self.iter() {
            f(key);
        }
    }

    /// Visit each node after both of its subtrees. The root comes last, which
    /// makes this the teardown order.
    pub fn post_order<F: FnMut(&K)>(&self, mut f: F) {
        let mut stack: Vec<NodeId> = Vec::new();
        let mut cur = self.root;
        let mut last = NodeId::NULL;
        loop {
            while !cur.is_null() {
                stack.push(cur);
                cur = self.nodes.left(cur);
            }
            let Some(&top) = stack.last() else {
                break;
            };
            let right = self.nodes.right(top);
            if !right.is_null() && right != last {
                cur = right;
            } else {
                if let Some(key) = self.nodes.key(top) {
                    f(key);
                }
                last = top;
                stack.pop();
            }
        }
    }

    /// In-order iterator over the keys.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter {
            nodes: &self.nodes,
            stack: Vec::new(),
            remaining: self.count,
        };
        iter.push_left_spine(self.root);
        iter
    }
}

impl<'a, K, O> IntoIterator for &'a OrderedTree<K, O> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, K> {
    nodes: &'a NodeArena<K>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<K> Iter<'_, K> {
    fn push_left_spine(&mut self, mut id: NodeId) {
        while !id.is_null() {
            self.stack.push(id);
            id = self.nodes.left(id);
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            self.push_left_spine(self.nodes.right(id));
            if let Some(key) = self.nodes.key(id) {
                self.remaining -= 1;
                return Some(key);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
