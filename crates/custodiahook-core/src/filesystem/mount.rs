//! Read-only bind mounts.

use std::path::Path;

use custodiahook_common::error::{HookError, MountStep, Result};

/// Bind-mounts `source` onto `target`, then remounts it read-only when asked.
///
/// A failed remount leaves the writable bind in place.
///
/// # Errors
///
/// Returns [`HookError::Mount`] naming the step whose `mount(2)` call failed.
#[cfg(target_os = "linux")]
pub fn bind_mount(source: &Path, target: &Path, readonly: bool) -> Result<()> {
    use nix::mount::{MsFlags, mount};

    let fail = |step: MountStep| {
        move |e: nix::errno::Errno| HookError::Mount {
            step,
            source_path: source.to_path_buf(),
            target: target.to_path_buf(),
            source: e.into(),
        }
    };

    mount(
        Some(source),
        target,
        Some("bind"),
        MsFlags::MS_BIND,
        None::<&str>,
    )
    .map_err(fail(MountStep::Bind))?;
    tracing::debug!(
        source = %source.display(),
        target = %target.display(),
        "created bind mount"
    );

    if readonly {
        mount(
            Some(source),
            target,
            Some("bind"),
            MsFlags::MS_REMOUNT | MsFlags::MS_BIND | MsFlags::MS_RDONLY,
            Some(""),
        )
        .map_err(fail(MountStep::RemountReadOnly))?;
        tracing::debug!(target = %target.display(), "remounted bind mount read-only");
    }
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error: bind mounts require Linux.
#[cfg(not(target_os = "linux"))]
pub fn bind_mount(source: &Path, target: &Path, _readonly: bool) -> Result<()> {
    Err(HookError::Mount {
        step: MountStep::Bind,
        source_path: source.to_path_buf(),
        target: target.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "Linux required for bind mounts",
        ),
    })
}
