//! OCI hook pipeline for exposing the custodia broker socket to containers.
//!
//! A run reads the runtime state from stdin, selects the lifecycle, and on
//! prestart reads the bundle config, decides whether the socket needs a
//! mount, and performs it inside the container's mount namespace.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod backend;
pub mod decision;
pub mod executor;
pub mod extract;
pub mod lifecycle;
pub mod reader;
pub mod tree;
