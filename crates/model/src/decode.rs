//! Tree decoding from a nested JSON description.

use std::path::Path;
use std::time::{Duration, SystemTime};

use serde::Deserialize;

use crate::error::TreeError;
use crate::payload::NodePayload;
use crate::stat::{NodeStat, StatSize};
use crate::tree::{NodeId, Tree};

/// One node of a JSON tree description.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDescription {
    /// Entry name.
    pub tag: String,
    /// UTF-8 text content.
    #[serde(default)]
    pub content: Option<String>,
    /// Raw byte content.
    #[serde(default)]
    pub bytes: Option<Vec<u8>>,
    /// Structured payload without a byte representation.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Metadata override.
    #[serde(default)]
    pub stat: Option<StatDescription>,
    /// Child nodes, in listing order.
    #[serde(default)]
    pub children: Vec<NodeDescription>,
}

/// Metadata override in a JSON tree description.
///
/// `mode` holds permission bits only; the type bits follow from whether the
/// node has children. Times are seconds since the Unix epoch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatDescription {
    pub mode: Option<u32>,
    pub nlink: Option<u32>,
    pub size: Option<u64>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub atime: Option<u64>,
    pub mtime: Option<u64>,
    pub ctime: Option<u64>,
}

impl StatDescription {
    /// Build the metadata record for a node.
    ///
    /// # Arguments
    /// * `is_directory` - Whether the described node has children
    pub fn to_stat(&self, is_directory: bool) -> NodeStat {
        let mut stat: NodeStat = match (is_directory, self.mode) {
            (true, Some(mode)) => NodeStat::directory_with_mode(mode),
            (true, None) => NodeStat::directory(),
            (false, Some(mode)) => NodeStat::file_with_mode(mode),
            (false, None) => NodeStat::file(),
        };
        if let Some(nlink) = self.nlink {
            stat.nlink = nlink;
        }
        if let Some(size) = self.size {
            stat.size = StatSize::Resolved(size);
        }
        stat.uid = self.uid.unwrap_or(0);
        stat.gid = self.gid.unwrap_or(0);
        stat.atime = epoch_secs(self.atime);
        stat.mtime = epoch_secs(self.mtime);
        stat.ctime = epoch_secs(self.ctime);
        stat
    }
}

fn epoch_secs(secs: Option<u64>) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.unwrap_or(0))
}

impl NodeDescription {
    /// Convert this node's payload fields into a [`NodePayload`].
    fn payload(&self) -> Result<Option<NodePayload>, TreeError> {
        let content: Option<Vec<u8>> = match (&self.content, &self.bytes) {
            (Some(_), Some(_)) => {
                return Err(TreeError::ConflictingPayload {
                    tag: self.tag.clone(),
                    fields: "'content' and 'bytes'",
                })
            }
            (Some(text), None) => Some(text.as_bytes().to_vec()),
            (None, Some(bytes)) => Some(bytes.clone()),
            (None, None) => None,
        };

        if let Some(data) = &self.data {
            if content.is_some() || self.stat.is_some() {
                return Err(TreeError::ConflictingPayload {
                    tag: self.tag.clone(),
                    fields: "'data' and 'content'/'bytes'/'stat'",
                });
            }
            return Ok(Some(NodePayload::Structured(data.clone())));
        }

        let payload: Option<NodePayload> = match (&self.stat, content) {
            (Some(stat), content) => Some(NodePayload::WithStat(
                content.unwrap_or_default(),
                stat.to_stat(!self.children.is_empty()),
            )),
            (None, Some(content)) => Some(NodePayload::Bytes(content)),
            (None, None) => None,
        };
        Ok(payload)
    }
}

/// Decode a tree from a nested JSON description.
///
/// # Arguments
/// * `json` - JSON document whose top-level object is the root node
///
/// # Returns
/// The decoded tree.
pub fn decode_tree(json: &str) -> Result<Tree, TreeError> {
    let root: NodeDescription = serde_json::from_str(json)?;
    build_tree(&root)
}

/// Read and decode a JSON tree description from a file.
///
/// # Arguments
/// * `path` - Path to the JSON document
pub fn load_tree(path: &Path) -> Result<Tree, TreeError> {
    let json: String = std::fs::read_to_string(path)?;
    decode_tree(&json)
}

/// Build a tree from an already parsed description.
pub fn build_tree(root: &NodeDescription) -> Result<Tree, TreeError> {
    let mut tree: Tree = Tree::new();
    let mut pending: Vec<(&NodeDescription, Option<NodeId>)> = vec![(root, None)];

    while let Some((desc, parent)) = pending.pop() {
        let id: NodeId = tree.create_node(desc.tag.clone(), parent, desc.payload()?)?;
        // Reverse so children are created, and listed, in document order
        for child in desc.children.iter().rev() {
            pending.push((child, Some(id)));
        }
    }

    Ok(tree)
}
