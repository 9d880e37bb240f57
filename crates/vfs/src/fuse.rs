//! FUSE filesystem implementation.
//!
//! Translates inode-based `fuser` requests into the path-based [`TreeFs`]
//! operations. Inode numbers are derived from node positions in the tree
//! (root is inode 1), so no inode table is kept.

#[cfg(feature = "fuse")]
mod impl_fuse {
    use std::ffi::OsStr;
    use std::time::{Duration, UNIX_EPOCH};

    use fuser::{
        FileAttr, FileType, Filesystem, ReplyAttr, ReplyData, ReplyDirectory, ReplyEntry,
        ReplyOpen, Request, FUSE_ROOT_ID,
    };
    use treefuse_model::{Attributes, NodeId, Tree};

    use crate::error::FsError;
    use crate::fs::{TreeFs, CURRENT_DIR_ENTRY, PARENT_DIR_ENTRY};
    use crate::node::NodeView;
    use crate::options::MountOptions;

    /// Block size reported to the kernel.
    const BLOCK_SIZE: u32 = 512;

    /// Read-only FUSE filesystem serving a borrowed tree.
    pub struct TreeFuse<'t> {
        /// Path-based operations.
        fs: TreeFs<'t>,
        /// Kernel attribute and entry cache timeout.
        ttl: Duration,
    }

    impl<'t> TreeFuse<'t> {
        /// Create a FUSE filesystem over `tree`.
        ///
        /// # Arguments
        /// * `tree` - Tree to serve; must outlive the mount session
        /// * `options` - Mount configuration
        pub fn new(tree: &'t Tree, options: &MountOptions) -> Self {
            Self {
                fs: TreeFs::new(tree),
                ttl: options.attr_ttl,
            }
        }

        fn tree(&self) -> &'t Tree {
            self.fs.provider().tree()
        }

        /// Path of the node behind an inode number.
        fn path_for(&self, ino: u64) -> Option<String> {
            let index: usize = usize::try_from(ino.checked_sub(FUSE_ROOT_ID)?).ok()?;
            let id: NodeId = self.tree().node_at(index)?;
            self.tree().path_of(id)
        }

        /// Resolve a path to its view and FUSE attributes.
        fn entry_for(&self, path: &str) -> Result<(NodeView<'t>, FileAttr), FsError> {
            let view: NodeView<'t> = self
                .fs
                .provider()
                .lookup_path(path)
                .ok_or(FsError::NotFound)?;
            let attrs: Attributes = self.fs.get_attributes(path)?;
            let attr: FileAttr = to_file_attr(ino_for(view.handle().node_id()), &attrs);
            Ok((view, attr))
        }
    }

    /// Inode number of a node.
    pub fn ino_for(id: NodeId) -> u64 {
        id.index() as u64 + FUSE_ROOT_ID
    }

    /// Join a directory path and an entry name.
    fn join_path(parent: &str, name: &str) -> String {
        if parent.ends_with('/') {
            format!("{}{}", parent, name)
        } else {
            format!("{}/{}", parent, name)
        }
    }

    /// Kernel file type for resolved attributes.
    fn file_type(attrs: &Attributes) -> FileType {
        if attrs.is_directory() {
            FileType::Directory
        } else {
            FileType::RegularFile
        }
    }

    /// Convert resolved attributes to FUSE file attributes.
    pub fn to_file_attr(ino: u64, attrs: &Attributes) -> FileAttr {
        FileAttr {
            ino,
            size: attrs.size,
            blocks: attrs.size.div_ceil(BLOCK_SIZE as u64),
            atime: attrs.atime,
            mtime: attrs.mtime,
            ctime: attrs.ctime,
            crtime: UNIX_EPOCH,
            kind: file_type(attrs),
            perm: attrs.permissions(),
            nlink: attrs.nlink,
            uid: attrs.uid,
            gid: attrs.gid,
            rdev: 0,
            blksize: BLOCK_SIZE,
            flags: 0,
        }
    }

    impl Filesystem for TreeFuse<'_> {
        fn lookup(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEntry) {
            let name_str: &str = match name.to_str() {
                Some(n) => n,
                None => {
                    tracing::warn!("lookup: non UTF-8 name {:?} under inode {}", name, parent);
                    reply.error(libc::ENOENT);
                    return;
                }
            };

            let parent_path: String = match self.path_for(parent) {
                Some(p) => p,
                None => {
                    reply.error(libc::ENOENT);
                    return;
                }
            };

            match self.entry_for(&join_path(&parent_path, name_str)) {
                Ok((_, attr)) => reply.entry(&self.ttl, &attr, 0),
                Err(e) => reply.error(e.errno()),
            }
        }

        fn getattr(&mut self, _req: &Request<'_>, ino: u64, _fh: Option<u64>, reply: ReplyAttr) {
            let path: String = match self.path_for(ino) {
                Some(p) => p,
                None => {
                    reply.error(libc::ENOENT);
                    return;
                }
            };

            match self.entry_for(&path) {
                Ok((_, attr)) => reply.attr(&self.ttl, &attr),
                Err(e) => reply.error(e.errno()),
            }
        }

        fn readdir(
            &mut self,
            _req: &Request<'_>,
            ino: u64,
            _fh: u64,
            offset: i64,
            mut reply: ReplyDirectory,
        ) {
            let path: String = match self.path_for(ino) {
                Some(p) => p,
                None => {
                    reply.error(libc::ENOENT);
                    return;
                }
            };

            let names: Vec<String> = match self.fs.list_directory(&path) {
                Ok(names) => names,
                Err(e) => {
                    reply.error(e.errno());
                    return;
                }
            };

            let parent_ino: u64 = self
                .tree()
                .node_at((ino - FUSE_ROOT_ID) as usize)
                .and_then(|id| self.tree().parent(id))
                .map_or(ino, ino_for);

            let mut entries: Vec<(u64, FileType, String)> = Vec::with_capacity(names.len());
            for name in names {
                let entry: (u64, FileType) = match name.as_str() {
                    CURRENT_DIR_ENTRY => (ino, FileType::Directory),
                    PARENT_DIR_ENTRY => (parent_ino, FileType::Directory),
                    child => match self.entry_for(&join_path(&path, child)) {
                        Ok((_, attr)) => (attr.ino, attr.kind),
                        Err(e) => {
                            reply.error(e.errno());
                            return;
                        }
                    },
                };
                entries.push((entry.0, entry.1, name));
            }

            let skip: usize = usize::try_from(offset).unwrap_or(0);
            for (i, (e_ino, kind, name)) in entries.iter().enumerate().skip(skip) {
                if reply.add(*e_ino, (i + 1) as i64, *kind, name) {
                    break;
                }
            }
            reply.ok();
        }

        fn open(&mut self, _req: &Request<'_>, ino: u64, flags: i32, reply: ReplyOpen) {
            let path: String = match self.path_for(ino) {
                Some(p) => p,
                None => {
                    reply.error(libc::ENOENT);
                    return;
                }
            };

            match self.fs.open(&path, flags) {
                Ok(()) => reply.opened(0, 0),
                Err(e) => reply.error(e.errno()),
            }
        }

        fn read(
            &mut self,
            _req: &Request<'_>,
            ino: u64,
            _fh: u64,
            offset: i64,
            size: u32,
            _flags: i32,
            _lock_owner: Option<u64>,
            reply: ReplyData,
        ) {
            let offset: u64 = match u64::try_from(offset) {
                Ok(o) => o,
                Err(_) => {
                    tracing::warn!("read: negative offset {} on inode {}", offset, ino);
                    reply.error(libc::EINVAL);
                    return;
                }
            };

            let path: String = match self.path_for(ino) {
                Some(p) => p,
                None => {
                    reply.error(libc::ENOENT);
                    return;
                }
            };

            match self.fs.read(&path, size as usize, offset) {
                Ok(data) => reply.data(&data),
                Err(e) => reply.error(e.errno()),
            }
        }
    }

}

#[cfg(feature = "fuse")]
pub use impl_fuse::{ino_for, to_file_attr, TreeFuse};
