//! Field extraction from the state and config documents.

use std::path::PathBuf;

use custodiahook_common::error::{Document, HookError, Result};
use custodiahook_common::types::{BundleConfig, ContainerId, ContainerState};
use serde_json::Value;

use crate::tree::{ParsedTree, lookup};

/// Extracts the container state.
///
/// `root`, `pid` and `id` are required; `bundlePath` is optional here and
/// only becomes fatal when the config file is needed.
///
/// # Errors
///
/// Returns [`HookError::MissingField`] if a required field is absent or
/// mistyped. A `pid` outside the `i32` range counts as mistyped.
pub fn extract_state(tree: &ParsedTree) -> Result<ContainerState> {
    let rootfs = tree
        .get_str(&["root"])
        .ok_or_else(|| HookError::missing(Document::State, "root"))?;
    let pid = tree
        .get_i64(&["pid"])
        .and_then(|pid| i32::try_from(pid).ok())
        .ok_or_else(|| HookError::missing(Document::State, "pid"))?;
    let id = tree
        .get_str(&["id"])
        .ok_or_else(|| HookError::missing(Document::State, "id"))?;
    let bundle_path = tree.get_str(&["bundlePath"]).map(PathBuf::from);

    tracing::debug!(rootfs, pid, id, bundle = ?bundle_path, "extracted container state");
    Ok(ContainerState {
        rootfs: PathBuf::from(rootfs),
        pid,
        id: ContainerId::new(id),
        bundle_path,
    })
}

/// Extracts the bundle config.
///
/// # Errors
///
/// Returns [`HookError::MissingField`] if `mounts` or `process.args` is not
/// an array, or if any mount lacks a string `destination`.
pub fn extract_config(tree: &ParsedTree) -> Result<BundleConfig> {
    let mounts = tree
        .get_array(&["mounts"])
        .ok_or_else(|| HookError::missing(Document::Config, "mounts"))?;
    let mount_destinations = mounts
        .iter()
        .enumerate()
        .map(|(i, mount)| {
            lookup(mount, &["destination"])
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| {
                    HookError::missing(Document::Config, format!("mounts[{i}].destination"))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    if tree.get_array(&["process", "args"]).is_none() {
        return Err(HookError::missing(Document::Config, "process.args"));
    }

    let process_env = tree
        .get_array(&["process", "env"])
        .map(|env| {
            env.iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    tracing::debug!(mounts = mount_destinations.len(), "extracted bundle config");
    Ok(BundleConfig {
        mount_destinations,
        process_args_present: true,
        process_env,
    })
}

/// Container ID after applying a `container_uuid=` override from the config.
#[must_use]
pub fn effective_container_id(state: &ContainerState, config: &BundleConfig) -> ContainerId {
    match config.container_uuid() {
        Some(uuid) => {
            tracing::debug!(
                from = %state.id,
                to = %uuid,
                "container id overridden by container_uuid"
            );
            uuid
        }
        None => state.id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> ParsedTree {
        ParsedTree::new(value)
    }

    #[test]
    fn state_fields_round_trip() {
        let tree = parse(json!({
            "root": "/rootfs",
            "pid": 1234,
            "id": "abc",
            "bundlePath": "/bundle"
        }));
        let state = extract_state(&tree).expect("extract");
        assert_eq!(state.rootfs, PathBuf::from("/rootfs"));
        assert_eq!(state.pid, 1234);
        assert_eq!(state.id.as_str(), "abc");
        assert_eq!(state.bundle_path, Some(PathBuf::from("/bundle")));
    }

    #[test]
    fn state_without_bundle_path_still_extracts() {
        let tree = parse(json!({ "root": "/rootfs", "pid": 0, "id": "abc" }));
        let state = extract_state(&tree).expect("extract");
        assert_eq!(state.bundle_path, None);
    }

    #[test]
    fn state_missing_pid_is_fatal() {
        let tree = parse(json!({ "root": "/rootfs", "id": "abc" }));
        match extract_state(&tree).unwrap_err() {
            HookError::MissingField { document, field } => {
                assert_eq!(document, Document::State);
                assert_eq!(field, "pid");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn state_mistyped_fields_count_as_missing() {
        let cases = [
            (json!({ "root": 1, "pid": 1, "id": "a" }), "root"),
            (json!({ "root": "/r", "pid": "1", "id": "a" }), "pid"),
            (json!({ "root": "/r", "pid": 1.5, "id": "a" }), "pid"),
            (json!({ "root": "/r", "pid": 4_294_967_296_i64, "id": "a" }), "pid"),
            (json!({ "root": "/r", "pid": 1, "id": null }), "id"),
        ];
        for (value, expected) in cases {
            let err = extract_state(&parse(value)).unwrap_err();
            assert!(
                matches!(&err, HookError::MissingField { field, .. } if field == expected),
                "expected missing {expected}, got {err}"
            );
        }
    }

    #[test]
    fn config_collects_destinations_in_order() {
        let tree = parse(json!({
            "mounts": [
                { "destination": "/proc", "type": "proc" },
                { "destination": "/var/run/custodia/custodia.sock" }
            ],
            "process": { "args": ["sh"] }
        }));
        let config = extract_config(&tree).expect("extract");
        assert_eq!(
            config.mount_destinations,
            vec!["/proc", "/var/run/custodia/custodia.sock"]
        );
        assert!(config.process_args_present);
        assert!(config.process_env.is_empty());
    }

    #[test]
    fn config_requires_mounts_and_args() {
        let no_mounts = parse(json!({ "process": { "args": [] } }));
        assert!(matches!(
            extract_config(&no_mounts).unwrap_err(),
            HookError::MissingField { ref field, .. } if field == "mounts"
        ));

        let no_args = parse(json!({ "mounts": [], "process": { "env": [] } }));
        assert!(matches!(
            extract_config(&no_args).unwrap_err(),
            HookError::MissingField { ref field, .. } if field == "process.args"
        ));
    }

    #[test]
    fn config_mount_without_destination_is_fatal() {
        let tree = parse(json!({
            "mounts": [{ "destination": "/proc" }, { "source": "/tmp" }],
            "process": { "args": [] }
        }));
        assert!(matches!(
            extract_config(&tree).unwrap_err(),
            HookError::MissingField { ref field, .. } if field == "mounts[1].destination"
        ));
    }

    #[test]
    fn container_uuid_overrides_id_without_hyphens() {
        let state = extract_state(&parse(json!({ "root": "/r", "pid": 1, "id": "abc" })))
            .expect("state");
        let config = extract_config(&parse(json!({
            "mounts": [],
            "process": { "args": [], "env": ["PATH=/bin", 7, "container_uuid=ab-cd-12-34"] }
        })))
        .expect("config");
        assert_eq!(effective_container_id(&state, &config).as_str(), "abcd1234");
    }

    #[test]
    fn id_kept_without_container_uuid() {
        let state = extract_state(&parse(json!({ "root": "/r", "pid": 1, "id": "abc" })))
            .expect("state");
        let config = BundleConfig::default();
        assert_eq!(effective_container_id(&state, &config).as_str(), "abc");
    }
}
