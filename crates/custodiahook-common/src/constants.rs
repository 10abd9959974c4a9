//! Well-known paths and defaults.

/// Host directory holding the credential-broker socket.
pub const CUSTODIA_DIR: &str = "/var/run/custodia";

/// File name of the credential-broker socket inside [`CUSTODIA_DIR`].
pub const CUSTODIA_SOCKET: &str = "custodia.sock";

/// Name of the bundle configuration file inside the bundle directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Increment used when reading a stream of unknown size.
pub const CHUNK_SIZE: usize = 4096;

/// Environment prefix carrying a systemd-style container UUID.
pub const CONTAINER_UUID_PREFIX: &str = "container_uuid=";

/// Mode for directories and the placeholder file created inside the rootfs.
pub const CREATE_MODE: u32 = 0o755;

/// Lifecycle argument selecting the prestart behavior.
pub const PRESTART: &str = "prestart";

/// Lifecycle argument selecting the poststop behavior.
pub const POSTSTOP: &str = "poststop";

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "CUSTODIA_HOOK_LOG";

/// Binary name, also used as the log target.
pub const BIN_NAME: &str = "custodiahook";
