//! Domain types extracted from the state and config documents.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{HookError, Result};

/// Identifier of the container a hook runs for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds an ID from a systemd-style UUID, dropping every `-`.
    #[must_use]
    pub fn from_uuid(uuid: &str) -> Self {
        Self(uuid.chars().filter(|c| *c != '-').collect())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// View over the runtime-supplied state document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerState {
    /// Host path of the container root filesystem.
    pub rootfs: PathBuf,
    /// PID of the container process; `0` once it has exited.
    pub pid: i32,
    /// Container ID as reported by the runtime.
    pub id: ContainerId,
    /// Bundle directory, if the runtime supplied one.
    pub bundle_path: Option<PathBuf>,
}

impl ContainerState {
    /// Path of the bundle's `config.json`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::BundlePathMissing`] if the state carried no `bundlePath`.
    pub fn config_path(&self) -> Result<PathBuf> {
        self.bundle_path
            .as_deref()
            .map(|bundle| bundle.join(crate::constants::CONFIG_FILE_NAME))
            .ok_or(HookError::BundlePathMissing)
    }
}

/// View over the bundle `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleConfig {
    /// `destination` of every entry in `mounts`, in order.
    pub mount_destinations: Vec<String>,
    /// Whether `process.args` was present.
    pub process_args_present: bool,
    /// `process.env` entries, in order.
    pub process_env: Vec<String>,
}

impl BundleConfig {
    /// Returns the container ID carried by `container_uuid=` in the environment.
    ///
    /// Every matching entry overrides the previous one, so the last wins.
    #[must_use]
    pub fn container_uuid(&self) -> Option<ContainerId> {
        self.process_env
            .iter()
            .rev()
            .find_map(|entry| entry.strip_prefix(crate::constants::CONTAINER_UUID_PREFIX))
            .map(ContainerId::from_uuid)
    }

    /// Whether the runtime already mounts something at `destination`.
    ///
    /// Destinations compare as exact strings, without path normalization.
    #[must_use]
    pub fn declares(&self, destination: &Path) -> bool {
        self.mount_destinations
            .iter()
            .any(|d| Path::new(d).as_os_str() == destination.as_os_str())
    }
}

/// Outcome of the mount decision for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountDecision {
    /// Host path of the broker socket.
    pub source: PathBuf,
    /// Same path re-rooted under the container rootfs.
    pub destination: PathBuf,
    /// Whether the socket exists on the host.
    pub source_present: bool,
    /// Whether the runtime's own config already mounts the socket.
    pub already_declared: bool,
}

impl MountDecision {
    /// Whether the executor has anything to do.
    #[must_use]
    pub const fn needs_mount(&self) -> bool {
        self.source_present && !self.already_declared
    }

    /// Directory that must exist to hold the placeholder.
    #[must_use]
    pub fn destination_dir(&self) -> &Path {
        self.destination.parent().unwrap_or(&self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_hyphens_are_stripped() {
        assert_eq!(ContainerId::from_uuid("ab-cd-12-34").as_str(), "abcd1234");
    }

    #[test]
    fn last_container_uuid_wins() {
        let config = BundleConfig {
            process_env: vec![
                "PATH=/usr/bin".into(),
                "container_uuid=11-22".into(),
                "container_uuid=33-44".into(),
            ],
            ..BundleConfig::default()
        };
        assert_eq!(config.container_uuid(), Some(ContainerId::new("3344")));
    }

    #[test]
    fn container_uuid_absent_without_prefix() {
        let config = BundleConfig {
            process_env: vec!["xcontainer_uuid=1".into(), "HOME=/root".into()],
            ..BundleConfig::default()
        };
        assert_eq!(config.container_uuid(), None);
    }

    #[test]
    fn declares_matches_exact_destination_only() {
        let config = BundleConfig {
            mount_destinations: vec!["/proc".into(), "/var/run/custodia/custodia.sock".into()],
            ..BundleConfig::default()
        };
        assert!(config.declares(Path::new("/var/run/custodia/custodia.sock")));
        assert!(!config.declares(Path::new("/var/run/custodia")));
        assert!(!config.declares(Path::new("/var/run/custodia/custodia.sock/")));
    }

    #[test]
    fn config_path_requires_bundle() {
        let mut state = ContainerState {
            rootfs: PathBuf::from("/rootfs"),
            pid: 1,
            id: ContainerId::new("abc"),
            bundle_path: None,
        };
        assert!(matches!(
            state.config_path(),
            Err(HookError::BundlePathMissing)
        ));
        state.bundle_path = Some(PathBuf::from("/bundle"));
        assert_eq!(
            state.config_path().unwrap(),
            PathBuf::from("/bundle/config.json")
        );
    }

    #[test]
    fn decision_needs_mount_only_when_present_and_undeclared() {
        let mut decision = MountDecision {
            source: PathBuf::from("/var/run/custodia/custodia.sock"),
            destination: PathBuf::from("/c1/var/run/custodia/custodia.sock"),
            source_present: true,
            already_declared: false,
        };
        assert!(decision.needs_mount());
        assert_eq!(decision.destination_dir(), Path::new("/c1/var/run/custodia"));
        decision.already_declared = true;
        assert!(!decision.needs_mount());
        decision.already_declared = false;
        decision.source_present = false;
        assert!(!decision.needs_mount());
    }
}
