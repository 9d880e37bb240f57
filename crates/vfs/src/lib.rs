//! Read-only FUSE filesystem backed by an in-memory tree.
//!
//! Every node of a [`treefuse_model::Tree`] becomes a filesystem entry:
//! nodes with children are directories, nodes without children are regular
//! files whose content is the node's byte payload.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: FUSE Interface (fuser::Filesystem impl, inode <-> path)
//! Layer 2: Filesystem Operations (get_attributes, open, read, list_directory)
//! Layer 1: Tree Provider (lookup_path, is_directory)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use treefuse_model::load_tree;
//! use treefuse_vfs::{mount, MountOptions};
//!
//! let tree = load_tree(Path::new("tree.json"))?;
//! mount(&tree, Path::new("/mnt/tree"), &MountOptions::default())?;
//! ```

pub mod error;
pub mod fs;
pub mod mount;
pub mod node;
pub mod options;
pub mod provider;

#[cfg(feature = "fuse")]
pub mod fuse;

pub use error::{FsError, VfsError};
pub use fs::TreeFs;
pub use mount::{validate_tree, MIN_TREE_NODES};
pub use node::{NodeContent, NodeHandle, NodeView};
pub use options::MountOptions;
pub use provider::TreeProvider;

#[cfg(feature = "fuse")]
pub use fuse::TreeFuse;
#[cfg(feature = "fuse")]
pub use mount::mount;
