//! Read-only views of the tree: an indented dump and directory listings.

use std::fmt::Write as _;

use crate::FsError;
use crate::core::{Result, utils};
use crate::vfs::node::Node;
use crate::vfs::tree::Tree;

const INDENT: &str = "    ";

impl Tree {
    /// Returns an iterator over the immediate children of the directory at `path`, in name
    /// order.
    ///
    /// Fails with `NotADirectory` if `path` is a file.
    ///
    /// # Example:
    /// ```
    /// use vfs_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.mkdir("/docs/subdir").unwrap();
    /// tree.mkfile("/docs/document.txt", b"").unwrap();
    ///
    /// let names: Vec<_> = tree.ls("/docs").unwrap().map(|n| n.to_string()).collect();
    /// assert_eq!(names, ["document.txt", "subdir/"]);
    /// ```
    pub fn ls(&self, path: &str) -> Result<impl Iterator<Item = &Node>> {
        let segments = utils::split(path)?;
        let dir = self.node(self.walk(&segments)?)?;
        if !dir.is_dir() {
            return Err(FsError::NotADirectory(utils::join(&segments)));
        }
        Ok(dir.children().filter_map(move |id| self.get(id)))
    }

    /// Renders the whole tree, one node per line.
    ///
    /// The first line is `/`. Children of the root start at column zero and each level below
    /// is indented four more spaces. Directories print as `name/`, files as
    /// `name  (file, N bytes)`.
    pub fn render(&self) -> String {
        let mut out = String::from("/\n");
        let Some(root) = self.get(self.root()) else {
            return out;
        };

        // Children are pushed in reverse so they pop in name order.
        let mut stack: Vec<_> = root.children().map(|id| (id, 0)).collect();
        stack.reverse();
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            let _ = match node.content() {
                Some(content) => writeln!(
                    out,
                    "{}{}  (file, {} bytes)",
                    INDENT.repeat(depth),
                    node.name(),
                    content.len()
                ),
                None => writeln!(out, "{}{node}", INDENT.repeat(depth)),
            };
            let first = stack.len();
            stack.extend(node.children().map(|child| (child, depth + 1)));
            stack[first..].reverse();
        }
        out
    }
}
