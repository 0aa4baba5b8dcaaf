use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// Stable handle to a node stored in a [`Tree`](crate::Tree).
///
/// The generation makes a handle to a destroyed node dangle safely: once its slot is
/// released, [`Tree::get`](crate::Tree::get) returns `None` for it, even if the slot
/// has since been reused by another node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NodeData {
    Directory { children: BTreeMap<String, NodeId> },
    File { content: Vec<u8> },
}

/// A directory or file record.
///
/// Directories own a child set unique by name; files own an opaque byte blob.
/// The variant is fixed at creation, so a file never has children and a directory never
/// has content.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    data: NodeData,
}

impl Node {
    pub(crate) fn directory(name: &str) -> Node {
        Node {
            name: name.to_string(),
            parent: None,
            data: NodeData::Directory {
                children: BTreeMap::new(),
            },
        }
    }

    pub(crate) fn file(name: &str, content: Vec<u8>) -> Node {
        Node {
            name: name.to_string(),
            parent: None,
            data: NodeData::File { content },
        }
    }

    /// Segment naming this node inside its parent. Empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Directory { .. } => NodeKind::Directory,
            NodeData::File { .. } => NodeKind::File,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind() == NodeKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == NodeKind::Directory
    }

    /// Owning directory, `None` for the root and for detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// File content, `None` for a directory.
    pub fn content(&self) -> Option<&[u8]> {
        match &self.data {
            NodeData::File { content } => Some(content),
            NodeData::Directory { .. } => None,
        }
    }

    /// Looks up an immediate child by name. Always `None` for a file.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        match &self.data {
            NodeData::Directory { children } => children.get(name).copied(),
            NodeData::File { .. } => None,
        }
    }

    /// Immediate children in name order. Empty for a file.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        let children = match &self.data {
            NodeData::Directory { children } => Some(children.values().copied()),
            NodeData::File { .. } => None,
        };
        children.into_iter().flatten()
    }

    pub fn child_count(&self) -> usize {
        match &self.data {
            NodeData::Directory { children } => children.len(),
            NodeData::File { .. } => 0,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// Replaces file content in place. Returns false for a directory.
    pub(crate) fn set_content(&mut self, new_content: Vec<u8>) -> bool {
        match &mut self.data {
            NodeData::File { content } => {
                *content = new_content;
                true
            }
            NodeData::Directory { .. } => false,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut BTreeMap<String, NodeId>> {
        match &mut self.data {
            NodeData::Directory { children } => Some(children),
            NodeData::File { .. } => None,
        }
    }

    /// Consumes the record, handing back the child handles it owned.
    pub(crate) fn into_children(self) -> Vec<NodeId> {
        match self.data {
            NodeData::Directory { children } => children.into_values().collect(),
            NodeData::File { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for Node {
    /// Listing form: `name/` for a directory, `name` for a file.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data {
            NodeData::Directory { .. } => write!(f, "{}/", self.name),
            NodeData::File { .. } => write!(f, "{}", self.name),
        }
    }
}
