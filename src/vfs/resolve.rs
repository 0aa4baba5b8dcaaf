//! Path resolution: strict lookup and the creating walk used by `mkdir` and `mkfile`.

use tracing::trace;

use crate::FsError;
use crate::core::{Result, utils};
use crate::vfs::node::{Node, NodeId};
use crate::vfs::tree::Tree;

impl Tree {
    /// Returns the node at an absolute `path`.
    ///
    /// `/` (and any run of separators) resolves to the root. Fails with `InvalidPath` for a
    /// relative or otherwise malformed path, and with `NotFound` at the first segment that has
    /// no matching child.
    pub fn resolve(&self, path: &str) -> Result<NodeId> {
        let segments = utils::split(path)?;
        self.walk(&segments)
    }

    /// Returns true if `path` resolves to a node.
    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok()
    }

    /// Checks if `path` is a directory.
    pub fn is_dir(&self, path: &str) -> Result<bool> {
        let id = self.resolve(path)?;
        Ok(self.node(id)?.is_dir())
    }

    /// Checks if `path` is a regular file.
    pub fn is_file(&self, path: &str) -> Result<bool> {
        let id = self.resolve(path)?;
        Ok(self.node(id)?.is_file())
    }

    pub(crate) fn walk(&self, segments: &[&str]) -> Result<NodeId> {
        let mut cursor = self.root();
        for (depth, segment) in segments.iter().enumerate() {
            cursor = self
                .find_child(cursor, segment)
                .ok_or_else(|| FsError::NotFound(utils::join(&segments[..=depth])))?;
            trace!(segment, ?cursor, "resolved");
        }
        Ok(cursor)
    }

    /// Walks `segments` from the root, creating every missing one as a directory.
    ///
    /// Directories created before a failure stay in the tree. Fails with `NotADirectory` when a
    /// segment names an existing file.
    pub(crate) fn walk_creating(&mut self, segments: &[&str]) -> Result<NodeId> {
        let mut cursor = self.root();
        for (depth, segment) in segments.iter().enumerate() {
            cursor = match self.find_child(cursor, segment) {
                Some(next) if self.node(next)?.is_dir() => next,
                Some(_) => return Err(FsError::NotADirectory(utils::join(&segments[..=depth]))),
                None => {
                    let dir = self.alloc(Node::directory(segment))?;
                    if let Err(e) = self.link(cursor, dir) {
                        self.release(dir);
                        return Err(e);
                    }
                    trace!(segment, depth, "created directory");
                    dir
                }
            };
        }
        Ok(cursor)
    }
}
