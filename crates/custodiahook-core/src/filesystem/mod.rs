//! Filesystem preparation inside the container rootfs.
//!
//! Creates the mount point for the broker socket and bind-mounts it.

pub mod mount;
pub mod path;
