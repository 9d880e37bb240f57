//! Configuration options for mounting a tree.

use std::time::Duration;

/// Default filesystem name shown in the mount table.
pub const DEFAULT_FS_NAME: &str = "treefuse";

/// Default kernel attribute and entry cache timeout.
pub const DEFAULT_ATTR_TTL: Duration = Duration::from_secs(1);

/// Configuration for a read-only tree mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountOptions {
    /// Filesystem name shown in the mount table.
    pub fs_name: String,
    /// How long the kernel may cache attributes and lookups.
    pub attr_ttl: Duration,
    /// Allow users other than the mounting user to access the mount.
    pub allow_other: bool,
    /// Unmount automatically when the serving process exits.
    pub auto_unmount: bool,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            fs_name: DEFAULT_FS_NAME.to_string(),
            attr_ttl: DEFAULT_ATTR_TTL,
            allow_other: false,
            auto_unmount: true,
        }
    }
}

impl MountOptions {
    /// Set the filesystem name.
    ///
    /// # Arguments
    /// * `name` - Name shown in the mount table
    pub fn with_fs_name(mut self, name: impl Into<String>) -> Self {
        self.fs_name = name.into();
        self
    }

    /// Set the attribute and entry cache timeout.
    pub fn with_attr_ttl(mut self, ttl: Duration) -> Self {
        self.attr_ttl = ttl;
        self
    }

    /// Set whether other users may access the mount.
    pub fn with_allow_other(mut self, allow_other: bool) -> Self {
        self.allow_other = allow_other;
        self
    }

    /// Set whether the mount is removed when the process exits.
    pub fn with_auto_unmount(mut self, auto_unmount: bool) -> Self {
        self.auto_unmount = auto_unmount;
        self
    }

    /// Build the `fuser` mount option list. The mount is always read-only.
    #[cfg(feature = "fuse")]
    pub fn to_fuser_options(&self) -> Vec<fuser::MountOption> {
        use fuser::MountOption;

        let mut options: Vec<MountOption> =
            vec![MountOption::RO, MountOption::FSName(self.fs_name.clone())];
        if self.allow_other {
            options.push(MountOption::AllowOther);
        }
        if self.auto_unmount {
            options.push(MountOption::AutoUnmount);
        }
        options
    }
}
