//! Path resolution over a backing tree.

use treefuse_model::{Node, NodeId, Tree};

use crate::node::{NodeHandle, NodeView};

/// Path separator used by the filesystem.
pub const PATH_SEPARATOR: char = '/';

/// Resolves filesystem paths to [`NodeView`]s of a borrowed tree.
///
/// Holds no mutable state, so a single provider can serve concurrent
/// requests.
#[derive(Debug, Clone, Copy)]
pub struct TreeProvider<'t> {
    tree: &'t Tree,
}

impl<'t> TreeProvider<'t> {
    /// Create a provider over `tree`.
    pub fn new(tree: &'t Tree) -> Self {
        Self { tree }
    }

    /// Get the backing tree.
    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    /// Find the node at `path`.
    ///
    /// The empty path and `/` name the root. Leading separators are
    /// stripped; every remaining segment must equal a child's tag exactly.
    /// Children are scanned in tree order.
    ///
    /// # Arguments
    /// * `path` - `/`-delimited path
    ///
    /// # Returns
    /// The view of the node, or `None` if any segment does not match.
    pub fn lookup_path(&self, path: &str) -> Option<NodeView<'t>> {
        let tree: &'t Tree = self.tree;
        let mut current: &'t Node = tree.get(tree.root()?)?;

        let relative: &str = path.trim_start_matches(PATH_SEPARATOR);
        if !relative.is_empty() {
            for segment in relative.split(PATH_SEPARATOR) {
                match tree.children(current.id()).find(|c| c.tag() == segment) {
                    Some(child) => current = child,
                    None => {
                        tracing::trace!(
                            "lookup {:?}: no child {:?} under {}",
                            path,
                            segment,
                            current.id()
                        );
                        return None;
                    }
                }
            }
        }

        let handle: NodeHandle = NodeHandle::new(tree.id(), current.id());
        Some(NodeView::from_payload(handle, current.payload()))
    }

    /// Check whether the node behind `view` has any children.
    ///
    /// # Panics
    /// If `view` was not returned by a provider over this tree.
    pub fn is_directory(&self, view: &NodeView<'_>) -> bool {
        self.node(view).has_children()
    }

    /// Tags of the children of the node behind `view`, in tree order.
    ///
    /// # Panics
    /// If `view` was not returned by a provider over this tree.
    pub fn child_tags(&self, view: &NodeView<'_>) -> impl Iterator<Item = &'t str> + 't {
        let tree: &'t Tree = self.tree;
        tree.children(self.node(view).id()).map(|c| c.tag())
    }

    /// Resolve a view back to its backing node.
    fn node(&self, view: &NodeView<'_>) -> &'t Node {
        let handle: NodeHandle = view.handle();
        assert_eq!(
            handle.tree_id(),
            self.tree.id(),
            "node view was not issued by this tree provider"
        );
        let id: NodeId = handle.node_id();
        match self.tree.get(id) {
            Some(node) => node,
            None => panic!("node view refers to unknown node {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treefuse_model::NodePayload;

    /// root -> a -> b ("hello"), root -> c (empty)
    fn sample_tree() -> Tree {
        let mut tree: Tree = Tree::new();
        let root: NodeId = tree.create_node("root", None, None).unwrap();
        let a: NodeId = tree.create_node("a", Some(root), None).unwrap();
        tree.create_node("b", Some(a), Some(NodePayload::from("hello")))
            .unwrap();
        tree.create_node("c", Some(root), None).unwrap();
        tree
    }

    #[test]
    fn test_lookup_root() {
        let tree: Tree = sample_tree();
        let provider: TreeProvider<'_> = TreeProvider::new(&tree);

        for path in ["", "/", "//"] {
            let view: NodeView<'_> = provider.lookup_path(path).unwrap();
            assert_eq!(Some(view.handle().node_id()), tree.root(), "path {:?}", path);
            assert!(provider.is_directory(&view));
        }
    }

    #[test]
    fn test_lookup_nested_file() {
        let tree: Tree = sample_tree();
        let provider: TreeProvider<'_> = TreeProvider::new(&tree);

        let view: NodeView<'_> = provider.lookup_path("/a/b").unwrap();
        assert_eq!(view.content(), Some(&b"hello"[..]));
        assert!(!provider.is_directory(&view));

        // Leading separator is optional
        let same: NodeView<'_> = provider.lookup_path("a/b").unwrap();
        assert_eq!(same.handle(), view.handle());
    }

    #[test]
    fn test_lookup_missing_segment() {
        let tree: Tree = sample_tree();
        let provider: TreeProvider<'_> = TreeProvider::new(&tree);

        assert!(provider.lookup_path("/a/missing").is_none());
        assert!(provider.lookup_path("/missing").is_none());
        assert!(provider.lookup_path("/a/b/deeper").is_none());
    }

    #[test]
    fn test_lookup_is_exact() {
        let tree: Tree = sample_tree();
        let provider: TreeProvider<'_> = TreeProvider::new(&tree);

        assert!(provider.lookup_path("/A").is_none());
        assert!(provider.lookup_path("/a/./b").is_none());
        assert!(provider.lookup_path("/a/../c").is_none());
        assert!(provider.lookup_path("/a//b").is_none());
        assert!(provider.lookup_path("/a/").is_none());
    }

    #[test]
    fn test_lookup_in_empty_tree() {
        let tree: Tree = Tree::new();
        let provider: TreeProvider<'_> = TreeProvider::new(&tree);
        assert!(provider.lookup_path("/").is_none());
    }

    #[test]
    fn test_is_directory_classification() {
        let tree: Tree = sample_tree();
        let provider: TreeProvider<'_> = TreeProvider::new(&tree);

        let a: NodeView<'_> = provider.lookup_path("/a").unwrap();
        let c: NodeView<'_> = provider.lookup_path("/c").unwrap();
        assert!(provider.is_directory(&a));
        assert!(!provider.is_directory(&c));
    }

    #[test]
    fn test_child_tags_in_tree_order() {
        let tree: Tree = sample_tree();
        let provider: TreeProvider<'_> = TreeProvider::new(&tree);

        let root: NodeView<'_> = provider.lookup_path("/").unwrap();
        let tags: Vec<&str> = provider.child_tags(&root).collect();
        assert_eq!(tags, vec!["a", "c"]);
    }

    #[test]
    #[should_panic(expected = "not issued by this tree provider")]
    fn test_foreign_view_panics() {
        let tree: Tree = sample_tree();
        let other: Tree = sample_tree();
        let provider: TreeProvider<'_> = TreeProvider::new(&tree);
        let other_provider: TreeProvider<'_> = TreeProvider::new(&other);

        let foreign: NodeView<'_> = other_provider.lookup_path("/a").unwrap();
        provider.is_directory(&foreign);
    }
}
