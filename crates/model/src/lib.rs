//! Tree data model for treefuse.
//!
//! This crate provides the in-memory tree that treefuse mounts as a
//! read-only filesystem:
//! - [`Tree`] / [`Node`]: rooted tree of tagged nodes with ordered children
//! - [`NodePayload`]: bytes, bytes plus a metadata override, or structured data
//! - [`NodeStat`] / [`Attributes`]: metadata records before and after size
//!   resolution
//!
//! Trees are built through [`Tree::create_node`] or decoded from a nested
//! JSON description with [`decode_tree`].
//!
//! # Example
//!
//! ```
//! use treefuse_model::{NodeStat, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.create_node("root", None, None)?;
//! let dir = tree.create_node("a", Some(root), None)?;
//! tree.create_node("b", Some(dir), Some("hello".into()))?;
//! tree.create_node(
//!     "secret",
//!     Some(root),
//!     Some((b"hidden".to_vec(), NodeStat::file_with_mode(0o400)).into()),
//! )?;
//! assert_eq!(tree.len(), 4);
//! # Ok::<(), treefuse_model::TreeError>(())
//! ```

pub mod error;
pub mod payload;
pub mod stat;
pub mod tree;

mod decode;

pub use decode::{build_tree, decode_tree, load_tree, NodeDescription, StatDescription};
pub use error::TreeError;
pub use payload::{NodePayload, StructuredValue};
pub use stat::{Attributes, NodeStat, StatSize};
pub use tree::{Node, NodeId, Tree, TreeId};
