//! Node views handed out by path resolution.

use treefuse_model::{NodeId, NodePayload, NodeStat, TreeId};

/// Opaque reference from a [`NodeView`] back to its backing tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    tree: TreeId,
    node: NodeId,
}

impl NodeHandle {
    pub(crate) fn new(tree: TreeId, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// Identity of the tree this handle belongs to.
    pub fn tree_id(&self) -> TreeId {
        self.tree
    }

    /// Backing node identifier.
    pub fn node_id(&self) -> NodeId {
        self.node
    }
}

/// Content of a node, normalized from its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeContent<'t> {
    /// No content supplied.
    Absent,
    /// Byte content, possibly empty.
    Bytes(&'t [u8]),
    /// Payload with no byte representation.
    Unreadable,
}

/// A resolved node: its content and optional metadata override.
///
/// Borrowed from the tree it was resolved in.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView<'t> {
    handle: NodeHandle,
    content: NodeContent<'t>,
    stat: Option<&'t NodeStat>,
}

impl<'t> NodeView<'t> {
    /// Unpack a node payload.
    ///
    /// # Arguments
    /// * `handle` - Handle of the node the payload belongs to
    /// * `payload` - The node's payload, if any
    pub(crate) fn from_payload(handle: NodeHandle, payload: Option<&'t NodePayload>) -> Self {
        let (content, stat): (NodeContent<'t>, Option<&'t NodeStat>) = match payload {
            None => (NodeContent::Absent, None),
            Some(NodePayload::Bytes(bytes)) => (NodeContent::Bytes(bytes), None),
            Some(NodePayload::WithStat(bytes, stat)) => (NodeContent::Bytes(bytes), Some(stat)),
            Some(NodePayload::Structured(_)) => (NodeContent::Unreadable, None),
        };
        Self {
            handle,
            content,
            stat,
        }
    }

    /// Get the handle of the backing node.
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    /// Get the normalized content.
    pub fn raw_content(&self) -> NodeContent<'t> {
        self.content
    }

    /// Get the byte content.
    ///
    /// # Returns
    /// The bytes (empty when none were supplied), or `None` if the payload
    /// has no byte representation.
    pub fn content(&self) -> Option<&'t [u8]> {
        match self.content {
            NodeContent::Absent => Some(&[]),
            NodeContent::Bytes(bytes) => Some(bytes),
            NodeContent::Unreadable => None,
        }
    }

    /// Get the metadata override, if any.
    pub fn stat(&self) -> Option<&'t NodeStat> {
        self.stat
    }
}
