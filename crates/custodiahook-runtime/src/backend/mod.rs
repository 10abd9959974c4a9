//! OS seam for the executor.
//!
//! The executor only speaks to the kernel through [`MountBackend`], so the
//! pipeline can be exercised without privileges.

pub mod host;

use std::path::Path;

use custodiahook_common::error::Result;

pub use host::HostMountBackend;

/// Namespace and mount primitives the executor needs.
pub trait MountBackend {
    /// Joins the mount namespace of `pid` for the rest of the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace handle cannot be opened or joined.
    fn join_mount_namespace(&mut self, pid: libc::pid_t) -> Result<()>;

    /// Creates `dir` and its missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error for anything other than "already exists".
    fn create_dir_all(&mut self, dir: &Path) -> Result<()>;

    /// Creates an empty mount target at `path` unless one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    fn create_placeholder(&mut self, path: &Path) -> Result<()>;

    /// Bind-mounts `source` on `target`, optionally remounting read-only.
    ///
    /// # Errors
    ///
    /// Returns an error if either mount step fails.
    fn bind_mount(&mut self, source: &Path, target: &Path, readonly: bool) -> Result<()>;
}
