//! Runtime configuration for a single hook invocation.

use std::path::PathBuf;

/// Settings the hook runs with.
///
/// There is no configuration file; the defaults come from
/// [`crate::constants`] and the CLI may relocate the socket directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Host directory containing the broker socket.
    pub socket_dir: PathBuf,
    /// File name of the broker socket.
    pub socket_name: String,
    /// Read increment for non-seekable input streams.
    pub chunk_size: usize,
}

impl HookConfig {
    /// Absolute host path of the broker socket.
    #[must_use]
    pub fn socket_path(&self) -> PathBuf {
        self.socket_dir.join(&self.socket_name)
    }
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            socket_dir: PathBuf::from(crate::constants::CUSTODIA_DIR),
            socket_name: crate::constants::CUSTODIA_SOCKET.to_owned(),
            chunk_size: crate::constants::CHUNK_SIZE,
        }
    }
}
