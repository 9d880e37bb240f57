//! Error types for the VFS crate.

use thiserror::Error;
use treefuse_model::TreeError;

/// Errors returned by individual filesystem operations.
///
/// Each variant maps to the POSIX error code the bridge replies with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsError {
    /// Path does not resolve to a node.
    #[error("No such file or directory")]
    NotFound,

    /// File operation on a directory.
    #[error("Is a directory")]
    IsADirectory,

    /// Directory operation on a file.
    #[error("Not a directory")]
    NotADirectory,

    /// Open with an access mode other than read-only.
    #[error("Permission denied")]
    AccessDenied,

    /// Node content has no byte representation.
    #[error("Invalid or incomplete multibyte or wide character")]
    InvalidEncoding,
}

impl FsError {
    /// POSIX error code for this error.
    pub fn errno(&self) -> i32 {
        match self {
            FsError::NotFound => libc::ENOENT,
            FsError::IsADirectory => libc::EISDIR,
            FsError::NotADirectory => libc::ENOTDIR,
            FsError::AccessDenied => libc::EACCES,
            FsError::InvalidEncoding => libc::EILSEQ,
        }
    }
}

/// Errors that can occur while setting up a mount.
#[derive(Debug, Error)]
pub enum VfsError {
    /// The tree has no root node.
    #[error("Cannot mount an empty tree")]
    EmptyTree,

    /// The root has no children; empty directories are not supported.
    #[error("Cannot mount a tree with {count} node(s): empty directories, including the root, are not supported")]
    TooFewNodes { count: usize },

    /// Tree could not be loaded.
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// Mount operation failed.
    #[error("Mount failed: {0}")]
    MountFailed(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_mapping() {
        assert_eq!(FsError::NotFound.errno(), libc::ENOENT);
        assert_eq!(FsError::IsADirectory.errno(), libc::EISDIR);
        assert_eq!(FsError::NotADirectory.errno(), libc::ENOTDIR);
        assert_eq!(FsError::AccessDenied.errno(), libc::EACCES);
        assert_eq!(FsError::InvalidEncoding.errno(), libc::EILSEQ);
    }

    #[test]
    fn test_too_few_nodes_message() {
        let err: VfsError = VfsError::TooFewNodes { count: 1 };
        assert!(err.to_string().contains("1 node(s)"));
    }
}
