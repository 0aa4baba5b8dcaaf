//! An in-memory hierarchical namespace: a simulated file system tree of directories and
//! files addressed by absolute paths.
//!
//! ### Overview
//!
//! `vfs-tree` keeps the whole namespace in one [`Tree`] value. Nodes live in an arena and are
//! addressed by [`NodeId`] handles; each directory owns a child set unique by name and every
//! node knows its parent.
//!
//! **Key ideas**:
//! - **Explicit state**: every operation takes the tree it works on; there is no global root.
//! - **Checked handles**: a handle to a destroyed node resolves to `None`, never to garbage.
//! - **Depth safety**: removing or destroying a subtree walks it with an explicit work-list,
//!   so arbitrarily deep trees never exhaust the call stack.
//! - **Typed errors**: every failure is an [`FsError`] and leaves the tree as it was, except
//!   for intermediate directories created on the way (see [`Tree::mkdir`]).
//!
//! ```
//! use vfs_tree::{FsError, Tree};
//!
//! let mut tree = Tree::new();
//! tree.mkdir("/home/user/crab").unwrap();
//! tree.mkfile("/etc/passwd", b"root:x:0:0\n").unwrap();
//!
//! assert_eq!(tree.read("/etc/passwd").unwrap(), b"root:x:0:0\n");
//! assert_eq!(tree.rm("/"), Err(FsError::Forbidden("/".into())));
//!
//! let destroyed = tree.destroy();
//! assert_eq!(destroyed, 6);
//! ```

mod core;
mod error;
mod vfs;

pub use crate::core::{Result, utils};
pub use error::FsError;
pub use vfs::{Node, NodeId, NodeKind, Tree};
