//! Error types for tree operations.

use thiserror::Error;

use crate::tree::NodeId;

/// Errors that can occur while building or decoding a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Tree already has a root node")]
    DuplicateRoot,

    #[error("Parent node not found: {0}")]
    ParentNotFound(NodeId),

    #[error("Node '{parent}' already has a child tagged '{tag}'")]
    DuplicateTag { parent: String, tag: String },

    #[error("Invalid tag {tag:?}: {reason}")]
    InvalidTag { tag: String, reason: &'static str },

    #[error("Node '{tag}' has conflicting payload fields: {fields}")]
    ConflictingPayload { tag: String, fields: &'static str },
}
