//! Mount namespace joining.
//!
//! After [`join_mount_namespace`] returns, every path lookup and mount
//! performed by this process happens in the target's mount view. The
//! association is per thread, so the caller must be single-threaded.

use custodiahook_common::error::{HookError, Result};

/// Joins the mount namespace of process `pid`.
///
/// The namespace handle is closed before returning, on success and failure alike.
///
/// # Errors
///
/// Returns [`HookError::NamespaceJoin`] if `/proc/<pid>/ns/mnt` cannot be
/// opened or if `setns(2)` fails.
#[cfg(target_os = "linux")]
pub fn join_mount_namespace(pid: libc::pid_t) -> Result<()> {
    use nix::sched::{CloneFlags, setns};

    let path = super::mount_ns_path(pid);
    let handle = std::fs::File::open(&path).map_err(|e| HookError::NamespaceJoin {
        path: path.clone(),
        source: e,
    })?;

    setns(&handle, CloneFlags::CLONE_NEWNS).map_err(|e| HookError::NamespaceJoin {
        path: path.clone(),
        source: e.into(),
    })?;
    tracing::debug!(pid, path = %path.display(), "joined mount namespace");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error: mount namespaces require Linux.
#[cfg(not(target_os = "linux"))]
pub fn join_mount_namespace(pid: libc::pid_t) -> Result<()> {
    Err(HookError::NamespaceJoin {
        path: super::mount_ns_path(pid),
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "Linux required for mount namespaces",
        ),
    })
}
