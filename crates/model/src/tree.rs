//! Rooted tree of tagged nodes.
//!
//! Nodes live in an arena owned by the [`Tree`] and are addressed by
//! [`NodeId`]. Children keep their insertion order, which is the order
//! directory listings report them in.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::TreeError;
use crate::payload::NodePayload;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(u64);

/// Identifier of a node within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its tree's arena (the root is 0).
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single node in a [`Tree`].
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    payload: Option<NodePayload>,
}

impl Node {
    /// Get the node ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the tag (the entry name under the parent).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get the parent node ID, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Get child node IDs in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Check if this node has any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Get the payload, if any.
    pub fn payload(&self) -> Option<&NodePayload> {
        self.payload.as_ref()
    }
}

/// A rooted, acyclic tree of tagged nodes.
///
/// Nodes can only be attached below an existing parent, so a tree built
/// through [`Tree::create_node`] always has a single root, one parent per
/// non-root node and no cycles. Tags are unique among siblings.
#[derive(Debug)]
pub struct Tree {
    id: TreeId,
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            id: TreeId(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed)),
            nodes: Vec::new(),
        }
    }

    /// Get this tree's identity.
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Add a node to the tree.
    ///
    /// # Arguments
    /// * `tag` - Entry name; non-empty, no `/` or NUL, not `.` or `..`
    /// * `parent` - Parent node, or `None` to create the root
    /// * `payload` - Optional node data
    ///
    /// # Returns
    /// The ID of the new node.
    pub fn create_node(
        &mut self,
        tag: impl Into<String>,
        parent: Option<NodeId>,
        payload: Option<NodePayload>,
    ) -> Result<NodeId, TreeError> {
        let tag: String = tag.into();
        validate_tag(&tag)?;

        let id: NodeId = NodeId(self.nodes.len());
        match parent {
            None => {
                if !self.nodes.is_empty() {
                    return Err(TreeError::DuplicateRoot);
                }
            }
            Some(parent_id) => {
                let parent_node: &Node =
                    self.get(parent_id).ok_or(TreeError::ParentNotFound(parent_id))?;
                let duplicate: bool = parent_node
                    .children
                    .iter()
                    .any(|&child| self.nodes[child.0].tag == tag);
                if duplicate {
                    return Err(TreeError::DuplicateTag {
                        parent: parent_node.tag.clone(),
                        tag,
                    });
                }
                self.nodes[parent_id.0].children.push(id);
            }
        }

        self.nodes.push(Node {
            id,
            tag,
            parent,
            children: Vec::new(),
            payload,
        });
        Ok(id)
    }

    /// Get the root node ID, `None` for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.nodes.first().map(|n| n.id)
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if `id` names a node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the ID of the node at an arena position.
    ///
    /// # Arguments
    /// * `index` - Arena position, as returned by [`NodeId::index`]
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).map(|n| n.id)
    }

    /// Get the children of a node, in insertion order.
    ///
    /// Returns an empty iterator for unknown IDs.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |child| &self.nodes[child.0])
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Number of edges between the root and `id`.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut current: &Node = self.get(id)?;
        let mut depth: usize = 0;
        while let Some(parent) = current.parent {
            current = &self.nodes[parent.0];
            depth += 1;
        }
        Some(depth)
    }

    /// Absolute `/`-delimited path of a node (`/` for the root).
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        let mut tags: Vec<&str> = Vec::new();
        let mut current: &Node = self.get(id)?;
        while let Some(parent) = current.parent {
            tags.push(&current.tag);
            current = &self.nodes[parent.0];
        }
        if tags.is_empty() {
            return Some("/".to_string());
        }
        let mut path: String = String::new();
        for tag in tags.iter().rev() {
            path.push('/');
            path.push_str(tag);
        }
        Some(path)
    }
}

/// Check that a tag can be used as a path segment.
fn validate_tag(tag: &str) -> Result<(), TreeError> {
    let reason: Option<&'static str> = if tag.is_empty() {
        Some("tag must not be empty")
    } else if tag.contains('/') {
        Some("tag must not contain '/'")
    } else if tag.contains('\0') {
        Some("tag must not contain NUL")
    } else if tag == "." || tag == ".." {
        Some("tag is reserved")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(TreeError::InvalidTag {
            tag: tag.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build root -> dir1 -> dirchild, root -> rootchild.
    fn sample_tree() -> (Tree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree: Tree = Tree::new();
        let root: NodeId = tree.create_node("root", None, None).unwrap();
        let dir1: NodeId = tree.create_node("dir1", Some(root), None).unwrap();
        let dirchild: NodeId = tree
            .create_node("dirchild", Some(dir1), Some("dirchild content".into()))
            .unwrap();
        let rootchild: NodeId = tree
            .create_node("rootchild", Some(root), Some("rootchild content".into()))
            .unwrap();
        (tree, root, dir1, dirchild, rootchild)
    }

    #[test]
    fn test_empty_tree() {
        let tree: Tree = Tree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.root().is_none());
    }

    #[test]
    fn test_create_nodes() {
        let (tree, root, dir1, dirchild, rootchild) = sample_tree();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(root.index(), 0);

        let dir_node: &Node = tree.get(dir1).unwrap();
        assert_eq!(dir_node.tag(), "dir1");
        assert_eq!(dir_node.parent(), Some(root));
        assert_eq!(dir_node.children(), &[dirchild]);
        assert!(dir_node.has_children());

        let leaf: &Node = tree.get(rootchild).unwrap();
        assert!(!leaf.has_children());
        assert_eq!(leaf.payload().and_then(|p| p.bytes()), Some(&b"rootchild content"[..]));
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree: Tree = Tree::new();
        let root: NodeId = tree.create_node("root", None, None).unwrap();
        for tag in ["zeta", "alpha", "mid"] {
            tree.create_node(tag, Some(root), None).unwrap();
        }

        let tags: Vec<&str> = tree.children(root).map(|n| n.tag()).collect();
        assert_eq!(tags, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_second_root_rejected() {
        let mut tree: Tree = Tree::new();
        tree.create_node("root", None, None).unwrap();
        let result: Result<NodeId, TreeError> = tree.create_node("other", None, None);
        assert!(matches!(result, Err(TreeError::DuplicateRoot)));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut tree: Tree = Tree::new();
        tree.create_node("root", None, None).unwrap();
        let result: Result<NodeId, TreeError> = tree.create_node("a", Some(NodeId(7)), None);
        assert!(matches!(result, Err(TreeError::ParentNotFound(NodeId(7)))));
    }

    #[test]
    fn test_duplicate_sibling_tag_rejected() {
        let (mut tree, root, dir1, _, _) = sample_tree();
        let result: Result<NodeId, TreeError> = tree.create_node("dir1", Some(root), None);
        assert!(matches!(result, Err(TreeError::DuplicateTag { .. })));

        // Same tag under a different parent is fine
        assert!(tree.create_node("dir1", Some(dir1), None).is_ok());
    }

    #[test]
    fn test_invalid_tags_rejected() {
        let mut tree: Tree = Tree::new();
        let root: NodeId = tree.create_node("root", None, None).unwrap();
        for tag in ["", "a/b", "nul\0", ".", ".."] {
            let result: Result<NodeId, TreeError> = tree.create_node(tag, Some(root), None);
            assert!(
                matches!(result, Err(TreeError::InvalidTag { .. })),
                "tag {:?} should be rejected",
                tag
            );
        }
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_path_of() {
        let (tree, root, dir1, dirchild, rootchild) = sample_tree();
        assert_eq!(tree.path_of(root).as_deref(), Some("/"));
        assert_eq!(tree.path_of(dir1).as_deref(), Some("/dir1"));
        assert_eq!(tree.path_of(dirchild).as_deref(), Some("/dir1/dirchild"));
        assert_eq!(tree.path_of(rootchild).as_deref(), Some("/rootchild"));
        assert_eq!(tree.path_of(NodeId(99)), None);
    }

    #[test]
    fn test_depth_and_parent() {
        let (tree, root, dir1, dirchild, _) = sample_tree();
        assert_eq!(tree.depth(root), Some(0));
        assert_eq!(tree.depth(dirchild), Some(2));
        assert_eq!(tree.parent(dirchild), Some(dir1));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn test_node_at() {
        let (tree, _, dir1, _, _) = sample_tree();
        assert_eq!(tree.node_at(dir1.index()), Some(dir1));
        assert_eq!(tree.node_at(100), None);
        assert!(tree.contains(dir1));
        assert!(!tree.contains(NodeId(100)));
    }

    #[test]
    fn test_tree_ids_are_unique() {
        let a: Tree = Tree::new();
        let b: Tree = Tree::new();
        assert_ne!(a.id(), b.id());
    }
}
