//! Structure dump for troubleshooting.

use std::fmt::{self, Debug, Write};

use crate::arena::NodeId;
use crate::OrderedTree;

impl<K: Debug, O> OrderedTree<K, O> {
    /// Render the tree one node per line, children indented under their parent
    /// and tagged `L:`/`R:`, with each node's subtree height.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String can't fail.
        let _ = self.write_dump(&mut out);
        out
    }

    /// Print [`dump`](Self::dump) to stdout.
    pub fn debug_print(&self) {
        println!("=== OrderedTree ({:?}) ===", self.policy);
        println!("Size: {}", self.count);
        print!("{}", self.dump());
        println!("=========================");
    }

    fn write_dump(&self, out: &mut impl Write) -> fmt::Result {
        if self.root.is_null() || self.nodes.is_vacant(self.root) {
            return writeln!(out, "(empty)");
        }

        let mut stack: Vec<(NodeId, usize, &str)> = vec![(self.root, 0, "")];
        while let Some((id, depth, tag)) = stack.pop() {
            let indent = "  ".repeat(depth);
            writeln!(
                out,
                "{indent}{tag}{:?} (h={})",
                self.nodes.live_key(id),
                self.nodes.height(id)
            )?;
            let right = self.nodes.right(id);
            if !right.is_null() {
                stack.push((right, depth + 1, "R: "));
            }
            let left = self.nodes.left(id);
            if !left.is_null() {
                stack.push((left, depth + 1, "L: "));
            }
        }
        Ok(())
    }
}
