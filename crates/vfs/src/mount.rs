//! Tree validation and the blocking mount entrypoint.

#[cfg(feature = "fuse")]
use std::path::Path;

use treefuse_model::Tree;

use crate::error::VfsError;
#[cfg(feature = "fuse")]
use crate::fuse::TreeFuse;
#[cfg(feature = "fuse")]
use crate::options::MountOptions;

/// Smallest tree that can be mounted: a root with one child.
pub const MIN_TREE_NODES: usize = 2;

/// Check that `tree` can be served.
///
/// # Errors
/// * [`VfsError::EmptyTree`] if the tree has no root
/// * [`VfsError::TooFewNodes`] if the root has no children
pub fn validate_tree(tree: &Tree) -> Result<(), VfsError> {
    if tree.root().is_none() {
        return Err(VfsError::EmptyTree);
    }
    if tree.len() < MIN_TREE_NODES {
        return Err(VfsError::TooFewNodes { count: tree.len() });
    }
    Ok(())
}

/// Mount `tree` read-only at `mountpoint` and serve requests until the
/// filesystem is unmounted.
///
/// # Arguments
/// * `tree` - Tree to serve
/// * `mountpoint` - Existing directory to mount over
/// * `options` - Mount configuration
#[cfg(feature = "fuse")]
pub fn mount(tree: &Tree, mountpoint: &Path, options: &MountOptions) -> Result<(), VfsError> {
    validate_tree(tree)?;

    tracing::info!(
        "Mounting {} node tree at {} (fs_name={}, ttl={:?})",
        tree.len(),
        mountpoint.display(),
        options.fs_name,
        options.attr_ttl
    );

    let fs: TreeFuse<'_> = TreeFuse::new(tree, options);
    fuser::mount2(fs, mountpoint, &options.to_fuser_options())
        .map_err(|e| VfsError::MountFailed(format!("{}: {}", mountpoint.display(), e)))?;

    tracing::info!("Unmounted {}", mountpoint.display());
    Ok(())
}
