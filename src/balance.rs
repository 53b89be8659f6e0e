//! Height bookkeeping and the rebalancing hook.
//!
//! Every structural change ends with [`retrace`], which walks from the lowest
//! node whose child links changed up toward the root, refreshing stored
//! heights. Under [`BalancePolicy::HeightBalanced`] it also rotates any node
//! whose child heights differ by more than one.

use log::trace;

use crate::arena::{NodeArena, NodeId};

/// Rebalancing policy applied after each insert and remove.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BalancePolicy {
    /// Plain binary search tree: heights are tracked but no rotations run.
    /// Depth is bounded only by the insertion order.
    #[default]
    Unbalanced,
    /// AVL discipline: sibling subtree heights never differ by more than one,
    /// which bounds depth to O(log n).
    HeightBalanced,
}

impl BalancePolicy {
    #[inline]
    pub fn rotates(self) -> bool {
        matches!(self, BalancePolicy::HeightBalanced)
    }
}

/// Left height minus right height.
#[inline]
fn balance_factor<K>(arena: &NodeArena<K>, id: NodeId) -> i64 {
    i64::from(arena.height(arena.left(id))) - i64::from(arena.height(arena.right(id)))
}

#[inline]
fn update_height<K>(arena: &mut NodeArena<K>, id: NodeId) {
    let h = arena
        .height(arena.left(id))
        .max(arena.height(arena.right(id)))
        + 1;
    arena.set_height(id, h);
}

/// Rotate `n` down to the left; its right child takes its place.
fn rotate_left<K>(arena: &mut NodeArena<K>, root: &mut NodeId, n: NodeId) -> NodeId {
    let p = arena.parent(n);
    let nr = arena.right(n);
    debug_assert!(!nr.is_null(), "left rotation needs a right child");
    let nrl = arena.left(nr);

    arena.set_right(n, nrl);
    arena.set_parent(nrl, n);
    arena.replace_child(root, p, n, nr);
    arena.set_left(nr, n);
    arena.set_parent(n, nr);

    update_height(arena, n);
    update_height(arena, nr);
    nr
}

/// Rotate `n` down to the right; its left child takes its place.
fn rotate_right<K>(arena: &mut NodeArena<K>, root: &mut NodeId, n: NodeId) -> NodeId {
    let p = arena.parent(n);
    let nl = arena.left(n);
    debug_assert!(!nl.is_null(), "right rotation needs a left child");
    let nlr = arena.right(nl);

    arena.set_left(n, nlr);
    arena.set_parent(nlr, n);
    arena.replace_child(root, p, n, nl);
    arena.set_right(nl, n);
    arena.set_parent(n, nl);

    update_height(arena, n);
    update_height(arena, nl);
    nl
}

/// Restore the height bound at `n` if it is violated. Returns the node now
/// occupying `n`'s position when a rotation ran.
fn rebalance<K>(arena: &mut NodeArena<K>, root: &mut NodeId, n: NodeId) -> Option<NodeId> {
    let bf = balance_factor(arena, n);
    if bf > 1 {
        let l = arena.left(n);
        if balance_factor(arena, l) < 0 {
            trace!("left-right rotation");
            rotate_left(arena, root, l);
        } else {
            trace!("right rotation");
        }
        Some(rotate_right(arena, root, n))
    } else if bf < -1 {
        let r = arena.right(n);
        if balance_factor(arena, r) > 0 {
            trace!("right-left rotation");
            rotate_right(arena, root, r);
        } else {
            trace!("left rotation");
        }
        Some(rotate_left(arena, root, n))
    } else {
        None
    }
}

/// Refresh heights from `from` up to the root, rebalancing on the way when the
/// policy asks for it. `from` must be the lowest node whose child links
/// changed, with its stored height still describing its position before the
/// change. Returns the number of rebalance steps applied.
pub(crate) fn retrace<K>(
    arena: &mut NodeArena<K>,
    root: &mut NodeId,
    from: NodeId,
    policy: BalancePolicy,
) -> usize {
    let mut rotations = 0;
    let mut cur = from;
    while !cur.is_null() {
        let old = arena.height(cur);
        update_height(arena, cur);

        let mut top = cur;
        if policy.rotates() {
            if let Some(new_top) = rebalance(arena, root, cur) {
                top = new_top;
                rotations += 1;
            }
        }

        // Ancestors only see this subtree's height.
        if arena.height(top) == old {
            break;
        }
        cur = arena.parent(top);
    }
    rotations
}
