//! Backend issuing real syscalls through `custodiahook-core`.

use std::path::Path;

use custodiahook_common::error::Result;
use custodiahook_core::{filesystem, namespace};

use super::MountBackend;

/// Backend acting on the live system. Requires `CAP_SYS_ADMIN`.
#[derive(Debug, Default)]
pub struct HostMountBackend;

impl HostMountBackend {
    /// Creates the host backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MountBackend for HostMountBackend {
    fn join_mount_namespace(&mut self, pid: libc::pid_t) -> Result<()> {
        namespace::mount::join_mount_namespace(pid)
    }

    fn create_dir_all(&mut self, dir: &Path) -> Result<()> {
        filesystem::path::create_dir_tree(dir)
    }

    fn create_placeholder(&mut self, path: &Path) -> Result<()> {
        filesystem::path::create_placeholder(path)
    }

    fn bind_mount(&mut self, source: &Path, target: &Path, readonly: bool) -> Result<()> {
        filesystem::mount::bind_mount(source, target, readonly)
    }
}
