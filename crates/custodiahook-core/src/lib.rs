//! # custodiahook-core
//!
//! Low-level Linux primitives used by the custodiahook executor.
//!
//! This crate provides safe wrappers over:
//! - **Namespaces**: joining an existing mount namespace through `/proc/<pid>/ns/mnt`.
//! - **Filesystem**: directory-tree and placeholder creation, and read-only bind mounts.
//!
//! Non-Linux builds compile stubs that fail with a descriptive error.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod filesystem;
pub mod namespace;
