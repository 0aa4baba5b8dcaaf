//! Structural mutators and content access, all built on the resolver and the child-set
//! primitive.

use tracing::debug;

use crate::FsError;
use crate::core::{Result, utils};
use crate::vfs::node::{Node, NodeId};
use crate::vfs::tree::Tree;

impl Tree {
    /// Creates directory and all it parents (if needed).
    ///
    /// Creating an existing directory is a no-op that returns it; `/` returns the root.
    /// Fails with `NotADirectory` if a file occupies any segment of `path`, the last one
    /// included. Directories created before such a failure are kept.
    pub fn mkdir(&mut self, path: &str) -> Result<NodeId> {
        let segments = utils::split(path)?;
        let before = self.len();
        let dir = self.walk_creating(&segments)?;
        let created = self.len() - before;
        if created > 0 {
            debug!(path, created, "directory created");
        }
        Ok(dir)
    }

    /// Creates a file at `path`, or replaces the content of the file already there.
    ///
    /// Missing parent directories are created. An existing file keeps its identity and only
    /// its content changes. Fails with `InvalidPath` if the final segment is empty and with
    /// `NotAFile` if a directory occupies `path`.
    pub fn mkfile<C: AsRef<[u8]>>(&mut self, path: &str, content: C) -> Result<NodeId> {
        let (mut segments, name) = utils::split_parent(path)?;
        let content = copy_content(content.as_ref())?;
        let parent = self.walk_creating(&segments)?;

        if let Some(existing) = self.find_child(parent, name) {
            let bytes = content.len();
            if !self.node_mut(existing)?.set_content(content) {
                segments.push(name);
                return Err(FsError::NotAFile(utils::join(&segments)));
            }
            debug!(path, bytes, "file overwritten");
            return Ok(existing);
        }

        let bytes = content.len();
        let file = self.alloc(Node::file(name, content))?;
        if let Err(e) = self.link(parent, file) {
            self.release(file);
            return Err(e);
        }
        debug!(path, bytes, "file created");
        Ok(file)
    }

    /// Reads the entire content of the file at `path`.
    pub fn read(&self, path: &str) -> Result<&[u8]> {
        let segments = utils::split(path)?;
        let id = self.walk(&segments)?;
        self.node(id)?
            .content()
            .ok_or_else(|| FsError::NotAFile(utils::join(&segments)))
    }

    /// Removes the node at `path` together with its whole subtree.
    ///
    /// The root cannot be removed (`Forbidden`).
    pub fn rm(&mut self, path: &str) -> Result<()> {
        let segments = utils::split(path)?;
        if segments.is_empty() {
            return Err(FsError::Forbidden(utils::join(&segments)));
        }
        let target = self.walk(&segments)?;
        self.unlink(target)?;
        let destroyed = self.teardown(target);
        debug!(path, destroyed, "removed");
        Ok(())
    }

    /// Moves the node at `src_path` into the directory at `dest_dir_path`, keeping its name.
    ///
    /// The node keeps its identity, content and subtree. Nothing changes unless the move
    /// succeeds. Fails with
    /// - `Forbidden` if `src_path` is the root,
    /// - `NotADirectory` if `dest_dir_path` is a file,
    /// - `CyclicMove` if the destination is the source or lies inside it,
    /// - `NameConflict` if the destination already has a child with the source's name.
    pub fn mv(&mut self, src_path: &str, dest_dir_path: &str) -> Result<()> {
        let src_segments = utils::split(src_path)?;
        let dest_segments = utils::split(dest_dir_path)?;

        let src = self.walk(&src_segments)?;
        let Some(old_parent) = self.node(src)?.parent() else {
            return Err(FsError::Forbidden(utils::join(&src_segments)));
        };
        let dest = self.walk(&dest_segments)?;
        let dest_node = self.node(dest)?;
        if !dest_node.is_dir() {
            return Err(FsError::NotADirectory(utils::join(&dest_segments)));
        }
        if self.is_ancestor_or_self(src, dest) {
            return Err(FsError::CyclicMove {
                src: utils::join(&src_segments),
                dest: utils::join(&dest_segments),
            });
        }
        let name = self.node(src)?.name();
        if dest_node.child(name).is_some() {
            let mut conflict = dest_segments.clone();
            conflict.push(name);
            return Err(FsError::NameConflict(utils::join(&conflict)));
        }

        self.unlink(src)?;
        if let Err(e) = self.link(dest, src) {
            self.link(old_parent, src)?;
            return Err(e);
        }
        debug!(src = src_path, dest = dest_dir_path, "moved");
        Ok(())
    }
}

fn copy_content(content: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(content.len())
        .map_err(|e| FsError::ResourceExhausted(e.to_string()))?;
    buf.extend_from_slice(content);
    Ok(buf)
}
