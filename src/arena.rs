//! Index-linked node storage.
//!
//! Every node lives in one slot of a `Vec`. Child links are slot indices and
//! own the subtree they point at: a slot is only reachable through its
//! parent's child link (or the tree's root index). The parent index is a
//! plain back-reference used for upward walks. Freed slots are recycled
//! through a free list.

/// Index of a node slot, or `NodeId::NULL`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const NULL: NodeId = NodeId(u32::MAX);

    #[inline]
    pub(crate) fn is_null(self) -> bool {
        self == Self::NULL
    }

    #[inline]
    fn index(self) -> usize {
        debug_assert!(!self.is_null());
        self.0 as usize
    }
}

/// Which child slot of a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Dir {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    /// `None` marks a vacant node (the empty-key sentinel) or a freed slot.
    pub(crate) key: Option<K>,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
    /// Height of the subtree rooted here; a leaf has height 1.
    pub(crate) height: u32,
}

#[derive(Clone, Debug)]
pub(crate) struct NodeArena<K> {
    slots: Vec<Node<K>>,
    free: Vec<NodeId>,
}

impl<K> NodeArena<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Number of slots currently holding a node (live or vacant).
    pub(crate) fn occupied(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn alloc(&mut self, key: K, parent: NodeId) -> NodeId {
        let node = Node {
            key: Some(key),
            left: NodeId::NULL,
            right: NodeId::NULL,
            parent,
            height: 1,
        };
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = node;
            return id;
        }
        debug_assert!(self.slots.len() < u32::MAX as usize, "node arena full");
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(node);
        id
    }

    /// Release a slot that is no longer linked into the tree, returning its key.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<K> {
        let node = &mut self.slots[id.index()];
        let key = node.key.take();
        node.left = NodeId::NULL;
        node.right = NodeId::NULL;
        node.parent = NodeId::NULL;
        node.height = 0;
        self.free.push(id);
        key
    }

    /// Clear a node's key in place, leaving its slot linked.
    pub(crate) fn vacate(&mut self, id: NodeId) -> Option<K> {
        self.slots[id.index()].key.take()
    }

    /// Store a key into a vacant node.
    pub(crate) fn fill(&mut self, id: NodeId, key: K) {
        let node = &mut self.slots[id.index()];
        debug_assert!(node.key.is_none(), "filling a live node");
        node.key = Some(key);
    }

    #[inline]
    pub(crate) fn key(&self, id: NodeId) -> Option<&K> {
        self.slots[id.index()].key.as_ref()
    }

    /// Key of a node below the root. Only a childless root may be vacant, so
    /// any other reachable node carries a key.
    #[inline]
    pub(crate) fn live_key(&self, id: NodeId) -> &K {
        self.key(id).expect("vacant node reachable below the root")
    }

    #[inline]
    pub(crate) fn is_vacant(&self, id: NodeId) -> bool {
        self.slots[id.index()].key.is_none()
    }

    #[inline]
    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        self.slots[id.index()].left
    }

    #[inline]
    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        self.slots[id.index()].right
    }

    #[inline]
    pub(crate) fn child(&self, id: NodeId, dir: Dir) -> NodeId {
        match dir {
            Dir::Left => self.left(id),
            Dir::Right => self.right(id),
        }
    }

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        self.slots[id.index()].parent
    }

    /// Height of the subtree at `id`; the empty subtree has height 0.
    #[inline]
    pub(crate) fn height(&self, id: NodeId) -> u32 {
        if id.is_null() {
            0
        } else {
            self.slots[id.index()].height
        }
    }

    #[inline]
    pub(crate) fn set_left(&mut self, id: NodeId, child: NodeId) {
        self.slots[id.index()].left = child;
    }

    #[inline]
    pub(crate) fn set_right(&mut self, id: NodeId, child: NodeId) {
        self.slots[id.index()].right = child;
    }

    #[inline]
    pub(crate) fn set_child(&mut self, id: NodeId, dir: Dir, child: NodeId) {
        match dir {
            Dir::Left => self.set_left(id, child),
            Dir::Right => self.set_right(id, child),
        }
    }

    /// Set `child`'s parent to `parent`; no-op for the empty subtree.
    #[inline]
    pub(crate) fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        if !child.is_null() {
            self.slots[child.index()].parent = parent;
        }
    }

    #[inline]
    pub(crate) fn set_height(&mut self, id: NodeId, height: u32) {
        self.slots[id.index()].height = height;
    }

    /// Put `new` in the slot that currently holds `old`: either `parent`'s
    /// matching child link or, when `parent` is NULL, the root.
    pub(crate) fn replace_child(
        &mut self,
        root: &mut NodeId,
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    ) {
        if parent.is_null() {
            debug_assert_eq!(*root, old, "replacing a non-root without a parent");
            *root = new;
        } else if self.left(parent) == old {
            self.set_left(parent, new);
        } else {
            debug_assert_eq!(self.right(parent), old, "parent does not own child");
            self.set_right(parent, new);
        }
        self.set_parent(new, parent);
    }

    /// Leftmost node of the subtree at `id`.
    pub(crate) fn min(&self, mut id: NodeId) -> NodeId {
        while !id.is_null() {
            let left = self.left(id);
            if left.is_null() {
                break;
            }
            id = left;
        }
        id
    }

    /// Rightmost node of the subtree at `id`.
    pub(crate) fn max(&self, mut id: NodeId) -> NodeId {
        while !id.is_null() {
            let right = self.right(id);
            if right.is_null() {
                break;
            }
            id = right;
        }
        id
    }
}
