//! # custodiahook-common
//!
//! Shared types, error definitions, configuration and constants used
//! across the custodiahook workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and knows nothing about namespaces or mounts.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
