//! Error kinds reported by tree operations.

use thiserror::Error;

/// Errors returned by [`Tree`](crate::Tree) operations.
///
/// Every variant carries the path (or path prefix) the operation failed on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsError {
    /// Path is not absolute, contains a NUL byte, or has an empty final segment
    #[error("invalid path: '{0}'")]
    InvalidPath(String),

    /// Strict resolution found no child for a segment
    #[error("{0} does not exist")]
    NotFound(String),

    /// Expected a directory, found a file
    #[error("{0} is not a directory")]
    NotADirectory(String),

    /// Expected a file, found a directory
    #[error("{0} is not a file")]
    NotAFile(String),

    /// The operation is not allowed on the root
    #[error("operation not permitted on {0}")]
    Forbidden(String),

    #[error("cannot move {src} into its own subtree at {dest}")]
    CyclicMove { src: String, dest: String },

    /// The directory already holds a child with this name
    #[error("{0} already exists")]
    NameConflict(String),

    /// Node storage could not be grown
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
}
