use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeSet;

/// Walk the whole tree and assert every structural invariant.
fn validate_tree<K: Eq + fmt::Debug, O: KeyOrder<K>>(t: &OrderedTree<K, O>) {
    if t.root.is_null() {
        assert_eq!(t.count, 0, "empty tree must have no live keys");
        assert_eq!(t.stats, HeightStats::default());
        return;
    }
    assert!(
        t.nodes.parent(t.root).is_null(),
        "root must not have a parent"
    );
    if t.nodes.is_vacant(t.root) {
        assert_eq!(t.count, 0, "vacant root implies an empty tree");
        assert!(t.nodes.left(t.root).is_null() && t.nodes.right(t.root).is_null());
        return;
    }

    // (node, lower bound, upper bound): keys must order not-before `lower`
    // and before `upper` (strictly, unless rotations may have moved ties).
    let mut stack: Vec<(NodeId, Option<&K>, Option<&K>)> = vec![(t.root, None, None)];
    let mut live = 0usize;
    let mut seen: Vec<&K> = Vec::new();
    while let Some((id, lower, upper)) = stack.pop() {
        let key = t
            .nodes
            .key(id)
            .unwrap_or_else(|| panic!("vacant node {id:?} below the root"));
        live += 1;

        if let Some(lower) = lower {
            assert!(!O::less(key, lower), "{key:?} orders before ancestor {lower:?}");
        }
        if let Some(upper) = upper {
            if t.policy.rotates() {
                assert!(!O::less(upper, key), "{key:?} orders after ancestor {upper:?}");
            } else {
                assert!(O::less(key, upper), "{key:?} does not order before ancestor {upper:?}");
            }
        }
        assert!(!seen.contains(&key), "duplicate key {key:?}");
        seen.push(key);

        let left = t.nodes.left(id);
        let right = t.nodes.right(id);
        for child in [left, right] {
            if !child.is_null() {
                assert_eq!(t.nodes.parent(child), id, "parent link of {child:?} is stale");
            }
        }

        let (lh, rh) = (t.nodes.height(left), t.nodes.height(right));
        assert_eq!(
            t.nodes.height(id),
            lh.max(rh) + 1,
            "stored height of {key:?} must match children"
        );
        if t.policy.rotates() {
            assert!(lh.abs_diff(rh) <= 1, "{key:?} is out of balance ({lh} vs {rh})");
        }

        if !left.is_null() {
            stack.push((left, lower, Some(key)));
        }
        if !right.is_null() {
            stack.push((right, Some(key), upper));
        }
    }

    assert_eq!(live, t.count, "reachable node count must match len");
    assert_eq!(
        t.nodes.occupied(),
        t.count,
        "every occupied slot must be reachable"
    );
    assert_eq!(t.stats.height, t.nodes.height(t.root));
    assert_eq!(t.stats.left, t.nodes.height(t.nodes.left(t.root)));
    assert_eq!(t.stats.right, t.nodes.height(t.nodes.right(t.root)));
}

fn key_strategy() -> impl Strategy<Value = String> {
    // A small alphabet keeps collisions (and equal-length ties) frequent.
    "[a-d]{0,6}"
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 5)]
    Insert(#[proptest(strategy = "key_strategy()")] String),
    #[proptest(weight = 3)]
    Remove(#[proptest(strategy = "key_strategy()")] String),
    #[proptest(weight = 2)]
    Find(#[proptest(strategy = "key_strategy()")] String),
}

fn policy_strategy() -> impl Strategy<Value = BalancePolicy> {
    prop_oneof![
        Just(BalancePolicy::Unbalanced),
        Just(BalancePolicy::HeightBalanced),
    ]
}

fn with_policy<K, O>(policy: BalancePolicy) -> OrderedTree<K, O> {
    OrderedTree::with_config(Config {
        balance: policy,
        ..Config::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_natural_matches_btreeset(
        policy in policy_strategy(),
        ops in prop::collection::vec(any::<Op>(), 0..=400),
    ) {
        let mut t: OrderedTree<String, Natural> = with_policy(policy);
        let mut m: BTreeSet<String> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let inserted = t.insert(key.clone());
                    if m.insert(key) {
                        prop_assert!(inserted.is_ok());
                    } else {
                        prop_assert_eq!(inserted, Err(TreeError::DuplicateKey));
                    }
                }
                Op::Remove(key) => {
                    let removed = t.remove(&key);
                    if m.remove(&key) {
                        prop_assert_eq!(removed, Ok(key));
                    } else {
                        prop_assert_eq!(removed, Err(TreeError::NotFound));
                    }
                }
                Op::Find(key) => {
                    let found = t.find(&key).map(|n| n.key().clone());
                    prop_assert_eq!(found, m.get(&key).cloned());
                }
            }
            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);
        let got: Vec<String> = t.iter().cloned().collect();
        let expected: Vec<String> = m.iter().cloned().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_by_length_membership_and_order(
        policy in policy_strategy(),
        ops in prop::collection::vec(any::<Op>(), 0..=400),
    ) {
        let mut t: OrderedTree<String> = with_policy(policy);
        let mut m: BTreeSet<String> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    prop_assert_eq!(t.insert(key.clone()).is_ok(), m.insert(key));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(t.remove(&key).is_ok(), m.remove(&key));
                    prop_assert!(!t.contains(&key));
                }
                Op::Find(key) => {
                    prop_assert_eq!(t.contains(&key), m.contains(&key));
                }
            }
        }

        validate_tree(&t);
        let in_order: Vec<String> = t.iter().cloned().collect();
        prop_assert!(in_order.windows(2).all(|w| w[0].len() <= w[1].len()));

        let mut sorted = in_order;
        sorted.sort();
        let expected: Vec<String> = m.into_iter().collect();
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn prop_traversals_visit_each_node_once(
        policy in policy_strategy(),
        keys in prop::collection::btree_set(key_strategy(), 0..64),
    ) {
        let mut t: OrderedTree<String> = with_policy(policy);
        for key in &keys {
            t.insert(key.clone()).unwrap();
        }

        for order in [Order::Pre, Order::In, Order::Post] {
            let mut visited = Vec::new();
            t.traverse(order, |k| visited.push(k.clone()));
            prop_assert_eq!(visited.len(), keys.len());
            visited.sort();
            let expected: Vec<String> = keys.iter().cloned().collect();
            prop_assert_eq!(visited, expected);
        }

        if let Some(root) = t.root() {
            let mut pre = Vec::new();
            t.pre_order(|k| pre.push(k.clone()));
            let mut post = Vec::new();
            t.post_order(|k| post.push(k.clone()));
            prop_assert_eq!(&pre[0], root.key());
            prop_assert_eq!(post.last(), Some(root.key()));
        }
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

fn small_keys() -> Vec<String> {
    ["a", "b", "aa", "ab", "abc", "abcd"]
        .iter()
        .map(|k| k.to_string())
        .collect()
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = small_keys();
    for policy in [BalancePolicy::Unbalanced, BalancePolicy::HeightBalanced] {
        for_each_permutation(&keys, |perm| {
            let mut t: OrderedTree<String> = with_policy(policy);
            for k in perm {
                t.insert(k).unwrap();
                validate_tree(&t);
            }
            assert_eq!(t.len(), keys.len());
            for k in &keys {
                assert_eq!(t.find(k).map(|n| n.key()), Some(k));
            }
        });
    }
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = small_keys();
    for policy in [BalancePolicy::Unbalanced, BalancePolicy::HeightBalanced] {
        // Insert in a fixed order, then remove in all permutations.
        let mut base: OrderedTree<String> = with_policy(policy);
        for k in &keys {
            base.insert(k.clone()).unwrap();
        }

        for_each_permutation(&keys, |perm| {
            let mut t = base.clone();
            for k in perm {
                assert_eq!(t.remove(&k), Ok(k.clone()));
                assert!(t.find(&k).is_none());
                validate_tree(&t);
            }
            assert!(t.is_empty());
            assert!(t.root().is_none());
        });
    }
}
