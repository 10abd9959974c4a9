//! Applies a mount decision inside the container's mount namespace.

use custodiahook_common::error::Result;
use custodiahook_common::types::MountDecision;

use crate::backend::MountBackend;

/// Result of [`apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The decision required no mount; nothing was touched.
    Skipped,
    /// The socket is bind-mounted read-only at the destination.
    Mounted,
}

/// Joins the mount namespace of `pid` and bind-mounts the socket read-only.
///
/// Nothing happens, not even the namespace join, when the decision needs
/// no mount. The calling process must be single-threaded: the namespace
/// join only affects the calling thread. A failed read-only remount is not
/// rolled back.
///
/// # Errors
///
/// Propagates the backend's namespace, path-creation or mount error.
pub fn apply<B: MountBackend>(
    backend: &mut B,
    pid: libc::pid_t,
    decision: &MountDecision,
) -> Result<Applied> {
    if !decision.needs_mount() {
        return Ok(Applied::Skipped);
    }

    backend.join_mount_namespace(pid)?;
    backend.create_dir_all(decision.destination_dir())?;
    backend.create_placeholder(&decision.destination)?;

    tracing::info!(
        source = %decision.source.display(),
        target = %decision.destination.display(),
        "will try to mount broker socket"
    );
    backend.bind_mount(&decision.source, &decision.destination, true)?;
    Ok(Applied::Mounted)
}
