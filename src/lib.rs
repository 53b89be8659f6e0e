//! # ordtree
//!
//! An arena-backed binary search tree with a pluggable height-balance policy.
//!
//! Keys are placed by a type-level ordering rule ([`KeyOrder`]). The default
//! rule, [`ByLength`], orders keys by byte length, so keys of equal length are
//! ties and go to the right. Matching during [`find`](OrderedTree::find) and
//! [`remove`](OrderedTree::remove) uses the key's own `Eq`.
//!
//! ## Example
//!
//! ```rust
//! use ordtree::{OrderedTree, Side};
//!
//! let mut tree: OrderedTree<String> = OrderedTree::new();
//! assert_eq!(tree.insert("first".to_string()), Ok(Side::Root));
//! assert_eq!(tree.insert("two".to_string()), Ok(Side::Left));
//! assert_eq!(tree.insert("quaternary".to_string()), Ok(Side::Right));
//!
//! let node = tree.find(&"two".to_string()).unwrap();
//! assert_eq!(node.parent().unwrap().key(), "first");
//!
//! let mut keys = Vec::new();
//! tree.in_order(|k| keys.push(k.clone()));
//! assert_eq!(keys, ["two", "first", "quaternary"]);
//! ```
//!
//! ## Balancing
//!
//! [`BalancePolicy::Unbalanced`] (the default) keeps plain BST shape, so depth
//! follows insertion order. [`BalancePolicy::HeightBalanced`] applies AVL
//! rotations after every insert and remove.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use log::{debug, trace};

mod arena;
mod balance;
mod debug;
mod error;
mod node_ref;
mod order;
mod remove;
mod traverse;

use arena::{Dir, NodeArena, NodeId};

pub use balance::BalancePolicy;
pub use error::TreeError;
pub use node_ref::NodeRef;
pub use order::{ByLength, KeyOrder, Natural};
pub use traverse::{Iter, Order};

/// Where an inserted key landed relative to the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The key became the root.
    Root,
    /// The key landed in the root's left subtree.
    Left,
    /// The key landed in the root's right subtree.
    Right,
}

/// Height summary, refreshed at the end of every insert and remove.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeightStats {
    /// Height of the whole tree; 0 when empty, 1 for a lone root.
    pub height: u32,
    /// Height of the root's left subtree.
    pub left: u32,
    /// Height of the root's right subtree.
    pub right: u32,
}

/// Configuration for an [`OrderedTree`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Rebalancing policy run after each structural change.
    pub balance: BalancePolicy,
    /// Number of node slots to reserve up front.
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            balance: BalancePolicy::default(),
            initial_capacity: 16,
        }
    }
}

/// A binary search tree ordered by `O`.
///
/// Invariants:
/// - every key in a node's right subtree orders not-before the node's key;
///   every key in its left subtree orders strictly before it (ties go right).
///   Under [`BalancePolicy::HeightBalanced`] a rotation may lift a tied key
///   above its peer, so there the left side only guarantees not-after;
/// - every child's parent link names the node owning it;
/// - no two live nodes carry equal keys.
///
/// Not thread-safe for mutation beyond what `&mut self` already guarantees;
/// wrap the tree in a lock to share it.
pub struct OrderedTree<K, O = ByLength> {
    nodes: NodeArena<K>,
    root: NodeId,
    count: usize,
    stats: HeightStats,
    policy: BalancePolicy,
    _order: PhantomData<fn() -> O>,
}

impl<K, O> OrderedTree<K, O> {
    /// Create an empty, unbalanced tree.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty tree that keeps itself height-balanced.
    pub fn height_balanced() -> Self {
        Self::with_config(Config {
            balance: BalancePolicy::HeightBalanced,
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            nodes: NodeArena::with_capacity(config.initial_capacity),
            root: NodeId::NULL,
            count: 0,
            stats: HeightStats::default(),
            policy: config.balance,
            _order: PhantomData,
        }
    }

    /// Number of live keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The balancing mode this tree runs under.
    #[inline]
    pub fn balance_policy(&self) -> BalancePolicy {
        self.policy
    }

    #[inline]
    pub fn stats(&self) -> HeightStats {
        self.stats
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.stats.height
    }

    #[inline]
    pub fn left_height(&self) -> u32 {
        self.stats.left
    }

    #[inline]
    pub fn right_height(&self) -> u32 {
        self.stats.right
    }

    /// Drop every key.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NodeId::NULL;
        self.count = 0;
        self.stats = HeightStats::default();
    }

    /// The root node, or `None` when the tree holds no keys.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        NodeRef::new(&self.nodes, self.root)
    }

    /// Smallest key under the ordering rule (the leftmost node).
    pub fn first(&self) -> Option<&K> {
        if self.root.is_null() {
            return None;
        }
        self.nodes.key(self.nodes.min(self.root))
    }

    /// Largest key under the ordering rule (the rightmost node).
    pub fn last(&self) -> Option<&K> {
        if self.root.is_null() {
            return None;
        }
        self.nodes.key(self.nodes.max(self.root))
    }

    fn refresh_stats(&mut self) {
        self.stats = if self.root.is_null() || self.nodes.is_vacant(self.root) {
            HeightStats::default()
        } else {
            HeightStats {
                height: self.nodes.height(self.root),
                left: self.nodes.height(self.nodes.left(self.root)),
                right: self.nodes.height(self.nodes.right(self.root)),
            }
        };
    }

    fn rebalance_from(&mut self, from: NodeId) {
        let rotations = balance::retrace(&mut self.nodes, &mut self.root, from, self.policy);
        if rotations > 0 {
            debug!("applied {rotations} rebalance step(s)");
        }
    }
}

impl<K: Eq, O: KeyOrder<K>> OrderedTree<K, O> {
    /// Insert `key`, returning which side of the root it landed under.
    ///
    /// From the root, keys that order before the current node's key go left
    /// and all others (including ties) go right; the key becomes a new leaf
    /// at the first empty slot. Fails with [`TreeError::DuplicateKey`] if an
    /// equal key is already present.
    pub fn insert(&mut self, key: K) -> Result<Side, TreeError> {
        if self.root.is_null() {
            self.root = self.nodes.alloc(key, NodeId::NULL);
            self.count = 1;
            self.refresh_stats();
            return Ok(Side::Root);
        }
        if self.nodes.is_vacant(self.root) {
            debug!("reusing vacant root");
            self.nodes.fill(self.root, key);
            self.count = 1;
            self.refresh_stats();
            return Ok(Side::Root);
        }

        if !self.locate(&key).is_null() {
            return Err(TreeError::DuplicateKey);
        }

        let mut side = None;
        let mut cur = self.root;
        let parent = loop {
            let node_key = self.nodes.live_key(cur);
            let dir = if O::less(&key, node_key) {
                Dir::Left
            } else {
                Dir::Right
            };
            if side.is_none() {
                side = Some(dir);
            }

            let next = self.nodes.child(cur, dir);
            if next.is_null() {
                let id = self.nodes.alloc(key, cur);
                self.nodes.set_child(cur, dir, id);
                trace!("linked {id:?} under {cur:?} ({dir:?})");
                break cur;
            }
            cur = next;
        };

        self.count += 1;
        self.rebalance_from(parent);
        self.refresh_stats();

        Ok(match side {
            Some(Dir::Left) => Side::Left,
            _ => Side::Right,
        })
    }

    /// Look up the node carrying `key`.
    ///
    /// Walks down from the root comparing with `Eq` at each node and using
    /// the ordering rule to pick a child, so an unbalanced tree visits at most
    /// one node per level. A height-balanced tree may also have to search the
    /// run of keys that tie with `key`.
    pub fn find(&self, key: &K) -> Option<NodeRef<'_, K>> {
        NodeRef::new(&self.nodes, self.locate(key))
    }

    pub fn contains(&self, key: &K) -> bool {
        !self.locate(key).is_null()
    }

    /// Node carrying `key`, or NULL.
    fn locate(&self, key: &K) -> NodeId {
        let mut cur = self.root;
        while !cur.is_null() {
            let Some(node_key) = self.nodes.key(cur) else {
                return NodeId::NULL;
            };
            if node_key == key {
                return cur;
            }
            cur = match O::compare(key, node_key) {
                Ordering::Less => self.nodes.left(cur),
                Ordering::Greater => self.nodes.right(cur),
                Ordering::Equal if self.policy.rotates() => return self.locate_tie(cur, key),
                Ordering::Equal => self.nodes.right(cur),
            };
        }
        NodeId::NULL
    }

    /// Search below `from`, whose key ties with `key` without being equal.
    ///
    /// Without rotations ties always sit to the right. A rotation can lift a
    /// right child above its tied parent, so in a balanced tree tied keys may
    /// be on either side. All of them stay inside `from`'s subtree, and a
    /// strictly smaller (larger) node can only have tied keys to its right
    /// (left).
    fn locate_tie(&self, from: NodeId, key: &K) -> NodeId {
        let mut stack = vec![self.nodes.left(from), self.nodes.right(from)];
        while let Some(id) = stack.pop() {
            if id.is_null() {
                continue;
            }
            let node_key = self.nodes.live_key(id);
            if node_key == key {
                return id;
            }
            match O::compare(key, node_key) {
                Ordering::Less => stack.push(self.nodes.left(id)),
                Ordering::Greater => stack.push(self.nodes.right(id)),
                Ordering::Equal => {
                    stack.push(self.nodes.left(id));
                    stack.push(self.nodes.right(id));
                }
            }
        }
        NodeId::NULL
    }
}

impl<K, O> Default for OrderedTree<K, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, O> Clone for OrderedTree<K, O> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            count: self.count,
            stats: self.stats,
            policy: self.policy,
            _order: PhantomData,
        }
    }
}

impl<K: fmt::Debug, O> fmt::Debug for OrderedTree<K, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}


#[cfg(test)]
mod proptests;
