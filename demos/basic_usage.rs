//! Walk through the tree API with string keys ordered by length.
//!
//! Run with `RUST_LOG=trace` to see links, promotions and rotations.

use ordtree::{Order, OrderedTree, TreeError};

fn main() {
    env_logger::init();

    example_unbalanced();
    example_height_balanced();
}

fn print_traversals(tree: &OrderedTree<String>) {
    for order in [Order::Pre, Order::In, Order::Post] {
        let mut keys = Vec::new();
        tree.traverse(order, |k| keys.push(k.clone()));
        println!("{order:?}-order: {}", keys.join(", "));
    }
}

fn example_unbalanced() {
    println!("=== Unbalanced (ordered by key length) ===\n");

    let mut tree: OrderedTree<String> = OrderedTree::new();
    for key in ["root", "le", "l", "lef", "right", "righ", "righter"] {
        match tree.insert(key.to_string()) {
            Ok(side) => println!("insert {key:<8} -> {side:?}"),
            Err(e) => println!("insert {key:<8} failed: {e}"),
        }
    }
    println!();
    tree.debug_print();
    print_traversals(&tree);

    let key = "righ".to_string();
    match tree.find(&key) {
        Some(node) => println!(
            "\nfind {key}: parent = {:?}, leaf = {}",
            node.parent().map(|p| p.key().clone()),
            node.is_leaf()
        ),
        None => println!("\nfind {key}: not found"),
    }

    match tree.remove(&"right".to_string()) {
        Ok(removed) => println!("removed {removed}"),
        Err(e) => println!("remove failed: {e}"),
    }
    match tree.remove(&"missing".to_string()) {
        Err(TreeError::NotFound) => println!("remove missing: not found"),
        other => println!("remove missing: {other:?}"),
    }
    println!();
    tree.debug_print();
    println!("stats: {:?}\n", tree.stats());
}

fn example_height_balanced() {
    println!("=== Height-balanced ===\n");

    let mut tree: OrderedTree<String> = OrderedTree::height_balanced();
    for len in 1..=15 {
        let _ = tree.insert("x".repeat(len));
    }
    println!(
        "{} keys, policy {:?}, height {} (left {}, right {})",
        tree.len(),
        tree.balance_policy(),
        tree.height(),
        tree.left_height(),
        tree.right_height()
    );
    print_traversals(&tree);
}
