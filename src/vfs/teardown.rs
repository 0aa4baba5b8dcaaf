//! Subtree destruction.
//!
//! Teardown walks the subtree with an explicit work-list, so its stack usage does not grow
//! with tree depth. If the work-list cannot grow, the remaining nodes are destroyed
//! recursively instead: no node is skipped, only depth safety is lost.

use tracing::{debug, warn};

use crate::vfs::node::NodeId;
use crate::vfs::tree::Tree;

const INITIAL_WORK_LIST: usize = 16;

impl Tree {
    /// Destroys `top` and every node below it, returning how many nodes were destroyed.
    ///
    /// `top` must already be detached from its parent (or be the root). Every handle into the
    /// subtree is invalid afterwards.
    pub(crate) fn teardown(&mut self, top: NodeId) -> usize {
        let mut work = Vec::new();
        if work.try_reserve(INITIAL_WORK_LIST).is_err() {
            warn!("no memory for teardown work-list, destroying recursively");
            return self.teardown_recursive(top);
        }
        work.push(top);

        let mut destroyed = 0;
        while let Some(id) = work.pop() {
            let Some(node) = self.release(id) else {
                continue;
            };
            destroyed += 1;
            for child in node.into_children() {
                if work.try_reserve(1).is_ok() {
                    work.push(child);
                } else {
                    warn!(?child, "teardown work-list full, destroying subtree recursively");
                    destroyed += self.teardown_recursive(child);
                }
            }
        }
        destroyed
    }

    fn teardown_recursive(&mut self, id: NodeId) -> usize {
        let Some(node) = self.release(id) else {
            return 0;
        };
        1 + node
            .into_children()
            .into_iter()
            .map(|child| self.teardown_recursive(child))
            .sum::<usize>()
    }

    /// Destroys the whole tree, root included, and returns the number of nodes destroyed.
    pub fn destroy(mut self) -> usize {
        let root = self.root();
        let destroyed = self.teardown(root);
        debug!(destroyed, "tree destroyed");
        destroyed
    }
}
