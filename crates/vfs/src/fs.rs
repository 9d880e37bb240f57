//! Path-based filesystem operations over a [`TreeProvider`].
//!
//! These are the four calls a filesystem bridge needs to serve a read-only
//! mount. Every call resolves its path from scratch; no state is kept
//! between calls.

use treefuse_model::{Attributes, NodeStat, Tree};

use crate::error::FsError;
use crate::node::NodeView;
use crate::provider::TreeProvider;

/// Listing entry for the directory itself.
pub const CURRENT_DIR_ENTRY: &str = ".";

/// Listing entry for the parent directory.
pub const PARENT_DIR_ENTRY: &str = "..";

/// Access mode bits of `open` flags.
const ACCESS_MODE_MASK: i32 = libc::O_RDONLY | libc::O_WRONLY | libc::O_RDWR;

/// Read-only filesystem over a borrowed tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeFs<'t> {
    provider: TreeProvider<'t>,
}

impl<'t> TreeFs<'t> {
    /// Create a filesystem over `tree`.
    pub fn new(tree: &'t Tree) -> Self {
        Self::with_provider(TreeProvider::new(tree))
    }

    /// Create a filesystem from an existing provider.
    pub fn with_provider(provider: TreeProvider<'t>) -> Self {
        Self { provider }
    }

    /// Get the provider used for path resolution.
    pub fn provider(&self) -> &TreeProvider<'t> {
        &self.provider
    }

    /// Resolve `path` or fail with [`FsError::NotFound`].
    fn resolve(&self, path: &str) -> Result<NodeView<'t>, FsError> {
        self.provider.lookup_path(path).ok_or(FsError::NotFound)
    }

    /// Get the attributes of the node at `path`.
    ///
    /// Directories report their metadata override or the directory
    /// defaults. Files report their override or the file defaults, with an
    /// unset size taken from the content length.
    ///
    /// # Arguments
    /// * `path` - Path to the node
    pub fn get_attributes(&self, path: &str) -> Result<Attributes, FsError> {
        let view: NodeView<'t> = self.resolve(path)?;

        let attrs: Attributes = if self.provider.is_directory(&view) {
            view.stat().cloned().unwrap_or_else(NodeStat::directory).resolve(0)
        } else {
            let content_len: u64 = view.content().map_or(0, |c| c.len() as u64);
            view.stat().cloned().unwrap_or_else(NodeStat::file).resolve(content_len)
        };

        tracing::debug!("getattr {:?}: mode {:o}, size {}", path, attrs.mode, attrs.size);
        Ok(attrs)
    }

    /// Check that the node at `path` may be opened with `flags`.
    ///
    /// Only read-only access is permitted, for files and directories
    /// alike. Nothing is allocated; reads resolve the path again.
    ///
    /// # Arguments
    /// * `path` - Path to the node
    /// * `flags` - `open(2)` flags
    pub fn open(&self, path: &str, flags: i32) -> Result<(), FsError> {
        self.resolve(path)?;

        if flags & ACCESS_MODE_MASK != libc::O_RDONLY {
            tracing::debug!("open {:?}: denied, flags {:#o}", path, flags);
            return Err(FsError::AccessDenied);
        }
        Ok(())
    }

    /// Read up to `length` bytes at `offset` from the file at `path`.
    ///
    /// Reads past the end are clamped: an offset at or beyond the content
    /// length yields an empty buffer, and a length running past the end
    /// is shortened. Short reads are never padded.
    ///
    /// # Arguments
    /// * `path` - Path to the file
    /// * `length` - Maximum number of bytes to return
    /// * `offset` - Byte offset to start at
    pub fn read(&self, path: &str, length: usize, offset: u64) -> Result<Vec<u8>, FsError> {
        let view: NodeView<'t> = self.resolve(path)?;
        if self.provider.is_directory(&view) {
            return Err(FsError::IsADirectory);
        }
        let content: &[u8] = view.content().ok_or(FsError::InvalidEncoding)?;

        let data: &[u8] = match usize::try_from(offset) {
            Ok(start) if start < content.len() => {
                let end: usize = start.saturating_add(length).min(content.len());
                &content[start..end]
            }
            _ => &[],
        };

        tracing::debug!(
            "read {:?}: {} of {} bytes at offset {}",
            path,
            data.len(),
            length,
            offset
        );
        Ok(data.to_vec())
    }

    /// List the entries of the directory at `path`.
    ///
    /// The listing starts with `.` and `..`, followed by the child tags in
    /// tree order. A node without children is not a directory.
    ///
    /// # Arguments
    /// * `path` - Path to the directory
    pub fn list_directory(&self, path: &str) -> Result<Vec<String>, FsError> {
        let view: NodeView<'t> = self.resolve(path)?;
        if !self.provider.is_directory(&view) {
            return Err(FsError::NotADirectory);
        }

        let mut entries: Vec<String> =
            vec![CURRENT_DIR_ENTRY.to_string(), PARENT_DIR_ENTRY.to_string()];
        entries.extend(self.provider.child_tags(&view).map(str::to_string));

        tracing::debug!("readdir {:?}: {} entries", path, entries.len());
        Ok(entries)
    }
}
