//! Unified error types for the custodiahook workspace.
//!
//! Every error is fatal to the invocation. [`HookError::kind`] groups the
//! variants into the categories reported in logs.

use std::collections::TryReserveError;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum HookError {
    /// The input stream yielded no bytes.
    #[error("failed to read {origin}: is empty")]
    EmptyInput {
        /// Human-readable name of the stream.
        origin: String,
    },

    /// Reading the input stream failed before end of stream.
    #[error("failed to read {origin}: error encountered on read: {source}")]
    Read {
        /// Human-readable name of the stream.
        origin: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The read buffer could not be grown.
    #[error("failed to read {origin}: failed to allocate buffer: {source}")]
    Alloc {
        /// Human-readable name of the stream.
        origin: String,
        /// Underlying allocation error.
        source: TryReserveError,
    },

    /// The document is not valid JSON.
    #[error("parse error in {origin}: {source}")]
    Parse {
        /// Human-readable name of the document.
        origin: String,
        /// Parser error, carrying line and column.
        source: serde_json::Error,
    },

    /// A required field is absent or has the wrong JSON type.
    #[error("{field} not found in {document}")]
    MissingField {
        /// Which document was queried.
        document: Document,
        /// Dotted path of the missing field.
        field: String,
    },

    /// The state document carries no `bundlePath`, so there is no config file to open.
    #[error("failed to open config file: bundlePath not found in state")]
    BundlePathMissing,

    /// The bundle configuration file could not be opened.
    #[error("failed to open config file {path}: {source}")]
    ConfigOpen {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Opening or joining the target mount namespace failed.
    #[error("failed to join mount namespace {path}: {source}")]
    NamespaceJoin {
        /// Path of the namespace handle.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// A directory or placeholder file could not be created.
    #[error("failed to create {path}: {source}")]
    PathCreation {
        /// Path that could not be created.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// One of the two bind-mount steps failed.
    #[error("failed to {step} {source_path} on {target}: {source}")]
    Mount {
        /// Which mount step failed.
        step: MountStep,
        /// Host path being mounted.
        source_path: PathBuf,
        /// Mount point inside the container rootfs.
        target: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// The invocation does not name a usable lifecycle.
    #[error("command not recognized: {message}")]
    Usage {
        /// Description of the rejected invocation.
        message: String,
    },
}

impl HookError {
    /// Returns the category this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput { .. } | Self::Read { .. } | Self::Alloc { .. } => {
                ErrorKind::InputRead
            }
            Self::Parse { .. } => ErrorKind::Parse,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::BundlePathMissing | Self::ConfigOpen { .. } => ErrorKind::ConfigOpen,
            Self::NamespaceJoin { .. } => ErrorKind::NamespaceJoin,
            Self::PathCreation { .. } => ErrorKind::PathCreation,
            Self::Mount { .. } => ErrorKind::Mount,
            Self::Usage { .. } => ErrorKind::Usage,
        }
    }

    /// Builds a [`HookError::MissingField`].
    pub fn missing(document: Document, field: impl Into<String>) -> Self {
        Self::MissingField {
            document,
            field: field.into(),
        }
    }
}

/// Category of a [`HookError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input stream empty, unreadable, or unallocatable.
    InputRead,
    /// Malformed JSON.
    Parse,
    /// Required JSON field absent or mistyped.
    MissingField,
    /// Bundle config could not be located or opened.
    ConfigOpen,
    /// Mount namespace could not be opened or joined.
    NamespaceJoin,
    /// Destination directory or file could not be created.
    PathCreation,
    /// Bind mount or read-only remount failed.
    Mount,
    /// Unrecognized lifecycle invocation.
    Usage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InputRead => "input_read",
            Self::Parse => "parse",
            Self::MissingField => "missing_field",
            Self::ConfigOpen => "config_open",
            Self::NamespaceJoin => "namespace_join",
            Self::PathCreation => "path_creation",
            Self::Mount => "mount",
            Self::Usage => "usage",
        };
        f.write_str(name)
    }
}

/// The two JSON documents a hook invocation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    /// Runtime-supplied container state, read from stdin.
    State,
    /// Bundle `config.json`.
    Config,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State => write!(f, "state"),
            Self::Config => write!(f, "config"),
        }
    }
}

/// The mount step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountStep {
    /// The initial `MS_BIND` mount.
    Bind,
    /// The `MS_REMOUNT | MS_RDONLY` pass.
    RemountReadOnly,
}

impl fmt::Display for MountStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind => write!(f, "bind mount"),
            Self::RemountReadOnly => write!(f, "remount read-only"),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, HookError>;
