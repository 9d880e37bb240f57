//! Node payload definitions.

use crate::stat::NodeStat;

/// Structured node data, as decoded from JSON.
pub use serde_json::Value as StructuredValue;

/// Data attached to a tree node.
///
/// A node without a payload is served as an empty file with default
/// metadata. Directories ignore byte content but honour a metadata override.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    /// Raw file content with default metadata.
    Bytes(Vec<u8>),
    /// File content together with a metadata override.
    WithStat(Vec<u8>, NodeStat),
    /// Structured data that has no byte representation.
    ///
    /// Nodes carrying it resolve and list normally, but reading them fails.
    Structured(StructuredValue),
}

impl NodePayload {
    /// Get the byte content, if this payload has one.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            NodePayload::Bytes(b) | NodePayload::WithStat(b, _) => Some(b),
            NodePayload::Structured(_) => None,
        }
    }

    /// Get the metadata override, if any.
    pub fn stat(&self) -> Option<&NodeStat> {
        match self {
            NodePayload::WithStat(_, stat) => Some(stat),
            NodePayload::Bytes(_) | NodePayload::Structured(_) => None,
        }
    }
}

impl From<Vec<u8>> for NodePayload {
    fn from(bytes: Vec<u8>) -> Self {
        NodePayload::Bytes(bytes)
    }
}

impl From<&[u8]> for NodePayload {
    fn from(bytes: &[u8]) -> Self {
        NodePayload::Bytes(bytes.to_vec())
    }
}

impl From<&str> for NodePayload {
    fn from(text: &str) -> Self {
        NodePayload::Bytes(text.as_bytes().to_vec())
    }
}

impl From<(Vec<u8>, NodeStat)> for NodePayload {
    fn from((bytes, stat): (Vec<u8>, NodeStat)) -> Self {
        NodePayload::WithStat(bytes, stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_payload() {
        let payload: NodePayload = NodePayload::from("hello");
        assert_eq!(payload.bytes(), Some(&b"hello"[..]));
        assert!(payload.stat().is_none());
    }

    #[test]
    fn test_with_stat_payload() {
        let stat: NodeStat = NodeStat::file_with_mode(0o600);
        let payload: NodePayload = NodePayload::from((b"data".to_vec(), stat.clone()));
        assert_eq!(payload.bytes(), Some(&b"data"[..]));
        assert_eq!(payload.stat(), Some(&stat));
    }

    #[test]
    fn test_structured_payload_has_no_bytes() {
        let payload: NodePayload = NodePayload::Structured(serde_json::json!({"k": 1}));
        assert!(payload.bytes().is_none());
        assert!(payload.stat().is_none());
    }
}
