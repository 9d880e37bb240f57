//! Example: Mount a JSON tree description as a read-only FUSE filesystem.
//!
//! Usage:
//!   cargo run -p treefuse-vfs --example mount_tree -- <tree.json> <mountpoint> [options]
//!
//! Example tree:
//!   {"tag": "root", "children": [
//!       {"tag": "a", "children": [{"tag": "b", "content": "hello"}]},
//!       {"tag": "secret", "content": "hidden", "stat": {"mode": 256}}
//!   ]}
//!
//! Set `RUST_LOG=treefuse_vfs=debug` to trace every filesystem operation.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use treefuse_model::{load_tree, Tree};
use treefuse_vfs::{mount, validate_tree, MountOptions, VfsError};

/// Mount a JSON tree description as a read-only filesystem.
#[derive(Debug, Parser)]
#[command(name = "mount_tree")]
struct CliArgs {
    /// JSON tree description
    tree: PathBuf,

    /// Existing directory to mount over
    mountpoint: PathBuf,

    /// Filesystem name shown in the mount table
    #[arg(long, default_value = "treefuse")]
    fs_name: String,

    /// Kernel attribute cache timeout in seconds
    #[arg(long, default_value_t = 1)]
    ttl_secs: u64,

    /// Allow other users to access the mount
    #[arg(long)]
    allow_other: bool,

    /// Keep the mount after this process exits
    #[arg(long)]
    no_auto_unmount: bool,
}

impl CliArgs {
    fn mount_options(&self) -> MountOptions {
        MountOptions::default()
            .with_fs_name(self.fs_name.clone())
            .with_attr_ttl(Duration::from_secs(self.ttl_secs))
            .with_allow_other(self.allow_other)
            .with_auto_unmount(!self.no_auto_unmount)
    }
}

fn run(args: &CliArgs) -> Result<(), VfsError> {
    let tree: Tree = load_tree(&args.tree)?;
    validate_tree(&tree)?;
    println!(
        "Loaded {} nodes from {}",
        tree.len(),
        args.tree.display()
    );
    println!("Mounting at {} (Ctrl+C to unmount)", args.mountpoint.display());

    mount(&tree, &args.mountpoint, &args.mount_options())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: CliArgs = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
