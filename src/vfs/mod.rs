mod node;
mod ops;
mod render;
mod resolve;
mod teardown;
mod tree;

pub use node::{Node, NodeId, NodeKind};
pub use tree::Tree;
