//! Mount-point creation.

use std::fs::{DirBuilder, OpenOptions};
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};
use std::path::Path;

use custodiahook_common::constants::CREATE_MODE;
use custodiahook_common::error::{HookError, Result};

/// Creates `dir` and every missing ancestor with mode `0755`.
///
/// Directories that already exist are left untouched.
///
/// # Errors
///
/// Returns [`HookError::PathCreation`] for any failure other than "already exists".
pub fn create_dir_tree(dir: &Path) -> Result<()> {
    DirBuilder::new()
        .recursive(true)
        .mode(CREATE_MODE)
        .create(dir)
        .map_err(|e| HookError::PathCreation {
            path: dir.to_path_buf(),
            source: e,
        })?;
    tracing::debug!(path = %dir.display(), "mount directory ready");
    Ok(())
}

/// Creates an empty file at `path` to serve as a bind-mount target.
///
/// Anything already present at `path` is kept as is; after a previous
/// bind this is the mounted socket itself, which cannot be opened.
///
/// # Errors
///
/// Returns [`HookError::PathCreation`] if the file cannot be created.
pub fn create_placeholder(path: &Path) -> Result<()> {
    if path.symlink_metadata().is_ok() {
        tracing::debug!(path = %path.display(), "mount target already exists");
        return Ok(());
    }

    let _file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .mode(CREATE_MODE)
        .custom_flags(libc::O_CLOEXEC)
        .open(path)
        .map_err(|e| HookError::PathCreation {
            path: path.to_path_buf(),
            source: e,
        })?;
    tracing::debug!(path = %path.display(), "created mount target");
    Ok(())
}
