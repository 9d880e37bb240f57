//! Metadata records for tree nodes.
//!
//! Consumers attach a [`NodeStat`] to a node to override the attributes the
//! filesystem reports for it. A `NodeStat` may leave its size unset; it is
//! resolved into an [`Attributes`] value, whose size is always concrete,
//! before anything is handed to a reader.

use std::time::SystemTime;

/// File type mask (`S_IFMT`).
pub const S_IFMT: u32 = 0o170000;

/// Directory type bits (`S_IFDIR`).
pub const S_IFDIR: u32 = 0o040000;

/// Regular file type bits (`S_IFREG`).
pub const S_IFREG: u32 = 0o100000;

/// Default directory permissions (rwxr-xr-x).
pub const DEFAULT_DIR_PERMS: u32 = 0o755;

/// Default file permissions (r--r--r--).
pub const DEFAULT_FILE_PERMS: u32 = 0o444;

/// Permission bits mask, including setuid/setgid/sticky.
const PERMS_MASK: u32 = 0o7777;

/// Size of a [`NodeStat`], which may be left for the filesystem to infer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatSize {
    /// No size supplied; inferred from content when resolved.
    #[default]
    Unset,
    /// Explicit size in bytes.
    Resolved(u64),
}

impl StatSize {
    /// Get the explicit size, if any.
    pub fn get(&self) -> Option<u64> {
        match self {
            StatSize::Unset => None,
            StatSize::Resolved(size) => Some(*size),
        }
    }
}

/// Consumer-supplied metadata for a node.
///
/// Prefer [`NodeStat::directory_with_mode`] and [`NodeStat::file_with_mode`];
/// the struct fields are public for callers who need to set stat values
/// directly, but inconsistent values (a file mode on a node with children,
/// say) are passed through to the kernel unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStat {
    /// Full mode: type bits and permission bits.
    pub mode: u32,
    /// Hard link count.
    pub nlink: u32,
    /// Size in bytes, possibly unset.
    pub size: StatSize,
    /// Owner user ID.
    pub uid: u32,
    /// Owner group ID.
    pub gid: u32,
    /// Last access time.
    pub atime: SystemTime,
    /// Last modification time.
    pub mtime: SystemTime,
    /// Last status change time.
    pub ctime: SystemTime,
}

impl NodeStat {
    /// Create a record with the given mode and link count and every other
    /// field at its zero value.
    ///
    /// # Arguments
    /// * `mode` - Full mode (type and permission bits)
    /// * `nlink` - Hard link count
    pub fn new(mode: u32, nlink: u32) -> Self {
        Self {
            mode,
            nlink,
            size: StatSize::Unset,
            uid: 0,
            gid: 0,
            atime: SystemTime::UNIX_EPOCH,
            mtime: SystemTime::UNIX_EPOCH,
            ctime: SystemTime::UNIX_EPOCH,
        }
    }

    /// Default directory record: mode `040755`, two links.
    pub fn directory() -> Self {
        Self::directory_with_mode(DEFAULT_DIR_PERMS)
    }

    /// Directory record with custom permission bits.
    ///
    /// # Arguments
    /// * `perms` - Permission bits (e.g. `0o700`); type bits are ignored
    pub fn directory_with_mode(perms: u32) -> Self {
        Self::new(S_IFDIR | (perms & PERMS_MASK), 2)
    }

    /// Default file record: mode `0100444`, one link, size unset.
    pub fn file() -> Self {
        Self::file_with_mode(DEFAULT_FILE_PERMS)
    }

    /// File record with custom permission bits.
    ///
    /// # Arguments
    /// * `perms` - Permission bits (e.g. `0o644`); type bits are ignored
    pub fn file_with_mode(perms: u32) -> Self {
        Self::new(S_IFREG | (perms & PERMS_MASK), 1)
    }

    /// Set an explicit size, overriding the size inferred from content.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = StatSize::Resolved(size);
        self
    }

    /// Set the hard link count.
    pub fn with_nlink(mut self, nlink: u32) -> Self {
        self.nlink = nlink;
        self
    }

    /// Set the owner.
    ///
    /// # Arguments
    /// * `uid` - Owner user ID
    /// * `gid` - Owner group ID
    pub fn with_owner(mut self, uid: u32, gid: u32) -> Self {
        self.uid = uid;
        self.gid = gid;
        self
    }

    /// Set access, modification and change times.
    pub fn with_times(mut self, atime: SystemTime, mtime: SystemTime, ctime: SystemTime) -> Self {
        self.atime = atime;
        self.mtime = mtime;
        self.ctime = ctime;
        self
    }

    /// If the size is not yet set, use the length of `content`.
    ///
    /// An explicit size is never replaced.
    pub fn ensure_size_from(&mut self, content: &[u8]) {
        if self.size == StatSize::Unset {
            self.size = StatSize::Resolved(content.len() as u64);
        }
    }

    /// Resolve into the attributes exposed to readers.
    ///
    /// # Arguments
    /// * `fallback_size` - Size to report when none was set explicitly
    pub fn resolve(self, fallback_size: u64) -> Attributes {
        Attributes {
            mode: self.mode,
            nlink: self.nlink,
            size: self.size.get().unwrap_or(fallback_size),
            uid: self.uid,
            gid: self.gid,
            atime: self.atime,
            mtime: self.mtime,
            ctime: self.ctime,
        }
    }
}

/// Resolved attributes of a node as reported to the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    /// Full mode: type and permission bits.
    pub mode: u32,
    /// Hard link count.
    pub nlink: u32,
    /// Size in bytes.
    pub size: u64,
    /// Owner user ID.
    pub uid: u32,
    /// Owner group ID.
    pub gid: u32,
    /// Last access time.
    pub atime: SystemTime,
    /// Last modification time.
    pub mtime: SystemTime,
    /// Last status change time.
    pub ctime: SystemTime,
}

impl Attributes {
    /// Type bits of the mode (`mode & S_IFMT`).
    pub fn file_type(&self) -> u32 {
        self.mode & S_IFMT
    }

    /// Check if the mode describes a directory.
    pub fn is_directory(&self) -> bool {
        self.file_type() == S_IFDIR
    }

    /// Check if the mode describes a regular file.
    pub fn is_file(&self) -> bool {
        self.file_type() == S_IFREG
    }

    /// Permission bits of the mode.
    pub fn permissions(&self) -> u16 {
        (self.mode & PERMS_MASK) as u16
    }
}
