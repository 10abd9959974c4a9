//! Decides whether the broker socket must be bind-mounted into the container.

use std::path::{Path, PathBuf};

use custodiahook_common::types::{BundleConfig, MountDecision};

/// Computes the mount decision for `source` and a container rooted at `rootfs`,
/// given the mounts `bundle` already declares.
///
/// The existence check runs against the host filesystem. A missing socket
/// is not an error: the broker is optional.
#[must_use]
pub fn decide(source: &Path, rootfs: &Path, bundle: &BundleConfig) -> MountDecision {
    let source_present = std::fs::metadata(source).is_ok();
    let already_declared = bundle.declares(source);
    let destination = reroot(rootfs, source);

    if !source_present {
        tracing::debug!(source = %source.display(), "broker socket absent on host, nothing to do");
    } else if already_declared {
        tracing::debug!(
            source = %source.display(),
            "already present as a mount point in container configuration, skipping"
        );
    }

    MountDecision {
        source: source.to_path_buf(),
        destination,
        source_present,
        already_declared,
    }
}

/// Places the absolute path `path` under `rootfs`.
#[must_use]
pub fn reroot(rootfs: &Path, path: &Path) -> PathBuf {
    rootfs.join(path.strip_prefix("/").unwrap_or(path))
}
