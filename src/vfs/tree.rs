//! This module provides the node arena behind the in-memory namespace and the child-set
//! primitive every mutator is built on.

use tracing::warn;

use crate::FsError;
use crate::core::{Result, utils};
use crate::vfs::node::{Node, NodeId};

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// An in-memory hierarchical namespace of directories and files.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]: a directory holds the
/// handles of its children keyed by name, and every node holds the handle of its parent.
/// Paths are absolute, `/`-separated; repeated and trailing separators are ignored, and
/// `.`/`..` are ordinary names.
///
/// ### Invariants
///
/// 1. **Root existence**: exactly one root directory exists; it has no parent and is never
///    removed or moved.
/// 2. **Uniqueness**: a name appears at most once among the children of a directory.
/// 3. **Parent consistency**: a node is in `parent`'s child set iff its parent handle is
///    `parent`.
/// 4. **Acyclicity**: no node is its own ancestor.
///
/// ### Thread Safety
///
/// `Tree` has no internal locking. If several threads need it, guard the whole value with one
/// lock (e.g. `Mutex<Tree>`) held for the duration of each operation.
///
/// ### Example
///
/// ```
/// use vfs_tree::Tree;
///
/// let mut tree = Tree::new();
/// tree.mkfile("/etc/passwd", b"root:x:0:0\n").unwrap();
/// assert!(tree.is_dir("/etc").unwrap());
///
/// tree.mv("/etc/passwd", "/").unwrap();
/// assert_eq!(tree.read("/passwd").unwrap(), b"root:x:0:0\n");
///
/// tree.rm("/etc").unwrap();
/// assert!(!tree.exists("/etc"));
/// ```
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    live: usize,
}

#[allow(clippy::len_without_is_empty)]
impl Tree {
    /// Creates a tree holding only the root directory.
    pub fn new() -> Self {
        let root = NodeId {
            index: 0,
            generation: 0,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::directory("")),
            }],
            free: Vec::new(),
            root,
            live: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, the root included.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns the node behind `id`, or `None` if it has been destroyed.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id)
            .ok_or_else(|| FsError::NotFound(format!("node #{}", id.index)))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.get_mut(id)
            .ok_or_else(|| FsError::NotFound(format!("node #{}", id.index)))
    }

    /// Returns the absolute path of a live node.
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        let mut names = Vec::new();
        let mut cursor = self.get(id)?;
        while let Some(parent) = cursor.parent() {
            names.push(cursor.name());
            cursor = self.get(parent)?;
        }
        names.reverse();
        Some(utils::join(&names))
    }

    /// Stores a detached node and returns its handle.
    ///
    /// Fails with `ResourceExhausted` when the arena cannot grow; the tree is unchanged then.
    pub(crate) fn alloc(&mut self, node: Node) -> Result<NodeId> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            self.live += 1;
            return Ok(NodeId {
                index,
                generation: slot.generation,
            });
        }

        let index = u32::try_from(self.slots.len())
            .map_err(|_| FsError::ResourceExhausted("node index space".to_string()))?;
        self.slots
            .try_reserve(1)
            .map_err(|e| FsError::ResourceExhausted(e.to_string()))?;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        self.live += 1;
        Ok(NodeId {
            index,
            generation: 0,
        })
    }

    /// Takes a node out of the arena, invalidating every handle to it.
    ///
    /// Child handles inside the returned record are left untouched.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<Node> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        self.live -= 1;

        // A slot whose generation would wrap is retired rather than recycled.
        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                if self.free.try_reserve(1).is_ok() {
                    self.free.push(id.index);
                } else {
                    warn!(index = id.index, "free list full, arena slot not recycled");
                }
            }
            None => slot.generation = u32::MAX,
        }
        Some(node)
    }

    /// Looks up a child of `parent` by name.
    pub(crate) fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.get(parent).and_then(|node| node.child(name))
    }

    /// Inserts a detached `child` into the child set of directory `parent`.
    ///
    /// Fails without changing anything if `parent` is a file or already has a child with the
    /// same name.
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let name = self.node(child)?.name().to_string();
        let parent_node = self.node_mut(parent)?;
        let parent_name = parent_node.name().to_string();
        let children = parent_node
            .children_mut()
            .ok_or(FsError::NotADirectory(parent_name))?;
        if children.contains_key(&name) {
            return Err(FsError::NameConflict(name));
        }
        children.insert(name, child);
        self.node_mut(child)?.set_parent(Some(parent));
        Ok(())
    }

    /// Removes `child` from its parent's child set and clears its parent handle.
    ///
    /// The root, or any node without a parent, cannot be unlinked.
    pub(crate) fn unlink(&mut self, child: NodeId) -> Result<()> {
        let node = self.node(child)?;
        let name = node.name().to_string();
        let parent = node
            .parent()
            .ok_or_else(|| FsError::Forbidden(utils::SEPARATOR.to_string()))?;
        let removed = self
            .node_mut(parent)?
            .children_mut()
            .and_then(|children| children.remove(&name));
        debug_assert_eq!(removed, Some(child), "child set out of sync with parent handle");
        self.node_mut(child)?.set_parent(None);
        Ok(())
    }

    /// Returns true if `ancestor` is `node` itself or lies on the path from `node` up to the
    /// root.
    pub(crate) fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.get(id).and_then(Node::parent);
        }
        false
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod arena {
        use super::*;

        #[test]
        fn test_new_tree() {
            let tree = Tree::new();
            let root = tree.get(tree.root()).unwrap();
            assert!(root.is_dir());
            assert_eq!(root.name(), "");
            assert_eq!(root.parent(), None);
            assert_eq!(tree.len(), 1);
            assert_eq!(tree.path_of(tree.root()).unwrap(), "/");
        }

        #[test]
        fn test_alloc_and_release() -> Result<()> {
            let mut tree = Tree::new();
            let id = tree.alloc(Node::directory("tmp"))?;
            assert_eq!(tree.len(), 2);
            assert_eq!(tree.get(id).unwrap().name(), "tmp");

            let node = tree.release(id).unwrap();
            assert_eq!(node.name(), "tmp");
            assert_eq!(tree.len(), 1);
            assert!(tree.get(id).is_none());
            assert!(tree.release(id).is_none());
            Ok(())
        }

        #[test]
        fn test_stale_handle_after_slot_reuse() -> Result<()> {
            let mut tree = Tree::new();
            let old = tree.alloc(Node::file("a", b"1".to_vec()))?;
            tree.release(old);
            let new = tree.alloc(Node::file("b", b"2".to_vec()))?;

            assert_eq!(old.index, new.index);
            assert!(tree.get(old).is_none());
            assert_eq!(tree.get(new).unwrap().name(), "b");
            Ok(())
        }
    }

    mod child_set {
        use super::*;

        #[test]
        fn test_link_sets_parent() -> Result<()> {
            let mut tree = Tree::new();
            let root = tree.root();
            let dir = tree.alloc(Node::directory("home"))?;
            tree.link(root, dir)?;

            assert_eq!(tree.find_child(root, "home"), Some(dir));
            assert_eq!(tree.get(dir).unwrap().parent(), Some(root));
            assert_eq!(tree.path_of(dir).unwrap(), "/home");
            Ok(())
        }

        #[test]
        fn test_link_name_conflict() -> Result<()> {
            let mut tree = Tree::new();
            let root = tree.root();
            let first = tree.alloc(Node::directory("x"))?;
            let second = tree.alloc(Node::file("x", Vec::new()))?;
            tree.link(root, first)?;

            assert_eq!(tree.link(root, second), Err(FsError::NameConflict("x".into())));
            assert_eq!(tree.find_child(root, "x"), Some(first));
            assert_eq!(tree.get(second).unwrap().parent(), None);
            Ok(())
        }

        #[test]
        fn test_link_into_file() -> Result<()> {
            let mut tree = Tree::new();
            let root = tree.root();
            let file = tree.alloc(Node::file("f", Vec::new()))?;
            tree.link(root, file)?;
            let child = tree.alloc(Node::directory("d"))?;

            assert!(matches!(tree.link(file, child), Err(FsError::NotADirectory(_))));
            Ok(())
        }

        #[test]
        fn test_unlink() -> Result<()> {
            let mut tree = Tree::new();
            let root = tree.root();
            let dir = tree.alloc(Node::directory("var"))?;
            tree.link(root, dir)?;
            tree.unlink(dir)?;

            assert_eq!(tree.find_child(root, "var"), None);
            assert_eq!(tree.get(dir).unwrap().parent(), None);
            assert!(tree.path_of(dir).is_some());
            Ok(())
        }

        #[test]
        fn test_unlink_root_forbidden() {
            let mut tree = Tree::new();
            let root = tree.root();
            assert!(matches!(tree.unlink(root), Err(FsError::Forbidden(_))));
        }

        #[test]
        fn test_is_ancestor_or_self() -> Result<()> {
            let mut tree = Tree::new();
            let root = tree.root();
            let a = tree.alloc(Node::directory("a"))?;
            let b = tree.alloc(Node::directory("b"))?;
            tree.link(root, a)?;
            tree.link(a, b)?;

            assert!(tree.is_ancestor_or_self(a, b));
            assert!(tree.is_ancestor_or_self(a, a));
            assert!(tree.is_ancestor_or_self(root, b));
            assert!(!tree.is_ancestor_or_self(b, a));
            Ok(())
        }
    }
}
