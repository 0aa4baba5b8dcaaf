use crate::FsError;

pub type Result<T> = std::result::Result<T, FsError>;

pub mod utils {
    //! Absolute path parsing shared by every tree operation.

    use super::Result;
    use crate::FsError;

    pub const SEPARATOR: char = '/';

    /// Splits an absolute path into its non-empty segments.
    ///
    /// Repeated separators collapse and a trailing separator is ignored, so `/a//b/` yields
    /// `["a", "b"]` and `/` yields no segments at all.
    /// A path that does not start with `/` or contains a NUL byte is an `InvalidPath`.
    pub fn split(path: &str) -> Result<Vec<&str>> {
        if !path.starts_with(SEPARATOR) {
            return Err(FsError::InvalidPath(path.to_string()));
        }
        if path.contains('\0') {
            return Err(FsError::InvalidPath(path.escape_default().to_string()));
        }
        Ok(path.split(SEPARATOR).filter(|s| !s.is_empty()).collect())
    }

    /// Splits a file path into its parent segments and final name.
    ///
    /// Fails with `InvalidPath` when the final segment is empty, i.e. the path is the root
    /// or ends with a separator.
    pub fn split_parent(path: &str) -> Result<(Vec<&str>, &str)> {
        if path.ends_with(SEPARATOR) {
            return Err(FsError::InvalidPath(path.to_string()));
        }
        let mut segments = split(path)?;
        match segments.pop() {
            Some(name) => Ok((segments, name)),
            None => Err(FsError::InvalidPath(path.to_string())),
        }
    }

    /// Builds the normalized absolute path for `segments`.
    pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
        if segments.is_empty() {
            return SEPARATOR.to_string();
        }
        let mut path = String::new();
        for segment in segments {
            path.push(SEPARATOR);
            path.push_str(segment.as_ref());
        }
        path
    }

    /// Returns true if a well-formed `path` denotes the root.
    pub fn is_virtual_root(path: &str) -> bool {
        path.starts_with(SEPARATOR) && path.chars().all(|c| c == SEPARATOR)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_split_nested_path() {
            assert_eq!(split("/docs/notes/todo.txt").unwrap(), vec!["docs", "notes", "todo.txt"]);
        }

        #[test]
        fn test_split_root() {
            assert!(split("/").unwrap().is_empty());
            assert!(split("///").unwrap().is_empty());
        }

        #[test]
        fn test_split_collapses_separators() {
            assert_eq!(split("//a///b/").unwrap(), vec!["a", "b"]);
        }

        #[test]
        fn test_split_keeps_dot_segments() {
            assert_eq!(split("/a/./../b").unwrap(), vec!["a", ".", "..", "b"]);
        }

        #[test]
        fn test_split_relative_path() {
            assert!(matches!(split("a/b"), Err(FsError::InvalidPath(_))));
            assert!(matches!(split(""), Err(FsError::InvalidPath(_))));
        }

        #[test]
        fn test_split_nul_byte() {
            assert!(matches!(split("/a\0b"), Err(FsError::InvalidPath(_))));
        }

        #[test]
        fn test_split_parent() {
            let (parent, name) = split_parent("/a/b/c.txt").unwrap();
            assert_eq!(parent, vec!["a", "b"]);
            assert_eq!(name, "c.txt");

            let (parent, name) = split_parent("//top").unwrap();
            assert!(parent.is_empty());
            assert_eq!(name, "top");
        }

        #[test]
        fn test_split_parent_empty_name() {
            assert!(matches!(split_parent("/"), Err(FsError::InvalidPath(_))));
            assert!(matches!(split_parent("/a/"), Err(FsError::InvalidPath(_))));
            assert!(matches!(split_parent("a"), Err(FsError::InvalidPath(_))));
        }

        #[test]
        fn test_join() {
            assert_eq!(join::<&str>(&[]), "/");
            assert_eq!(join(&["a", "b"]), "/a/b");
        }

        #[test]
        fn test_is_virtual_root() {
            assert!(is_virtual_root("/"));
            assert!(is_virtual_root("///"));
            assert!(!is_virtual_root("/a"));
            assert!(!is_virtual_root(""));
        }
    }
}
