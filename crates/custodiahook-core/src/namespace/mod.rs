//! Linux namespace handling.
//!
//! The hook never creates namespaces; it only joins the mount namespace
//! of the container process via `setns(2)`.

pub mod mount;

use std::path::PathBuf;

/// Path of the mount-namespace handle for `pid`.
#[must_use]
pub fn mount_ns_path(pid: libc::pid_t) -> PathBuf {
    PathBuf::from(format!("/proc/{pid}/ns/mnt"))
}
