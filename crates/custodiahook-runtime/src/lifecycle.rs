//! Hook entry point: lifecycle selection and the prestart pipeline.
//!
//! The state's `pid` is authoritative. A live pid always means prestart,
//! even when the runtime passed some other lifecycle argument; the mismatch
//! is logged and otherwise ignored. A zero pid means poststop, which only
//! validates the state document, again logging an unexpected argument.
//! The one rejected combination is an explicit `prestart` with a zero pid:
//! there is no process whose namespace could be joined.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::os::fd::AsFd;
use std::path::PathBuf;

use custodiahook_common::config::HookConfig;
use custodiahook_common::constants::{POSTSTOP, PRESTART};
use custodiahook_common::error::{HookError, Result};
use custodiahook_common::types::ContainerState;

use crate::backend::MountBackend;
use crate::decision::decide;
use crate::executor::{Applied, apply};
use crate::extract::{effective_container_id, extract_config, extract_state};
use crate::reader::read_document;

/// Name given to the state stream in logs and errors.
pub const STATE_ORIGIN: &str = "state data from standard input";

/// The lifecycle point a hook invocation serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Container created, process not yet started.
    Prestart,
    /// Container process has exited.
    Poststop,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prestart => f.write_str(PRESTART),
            Self::Poststop => f.write_str(POSTSTOP),
        }
    }
}

/// What a successful invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Poststop: state validated, nothing else done.
    Poststop,
    /// Prestart, but the broker socket does not exist on the host.
    SocketAbsent,
    /// Prestart, but the runtime already mounts the socket itself.
    AlreadyDeclared,
    /// Prestart, socket bind-mounted read-only at `destination`.
    Mounted {
        /// Mount point inside the container rootfs.
        destination: PathBuf,
    },
}

/// Chooses the lifecycle from the invocation argument and the state pid.
///
/// # Errors
///
/// Returns [`HookError::Usage`] for a negative pid and for `prestart` with a
/// zero pid.
pub fn select_lifecycle(argument: Option<&str>, pid: i32) -> Result<Lifecycle> {
    match (argument, pid) {
        (_, pid) if pid < 0 => Err(HookError::Usage {
            message: format!("invalid pid {pid} in state"),
        }),
        (None | Some(PRESTART), pid) if pid > 0 => Ok(Lifecycle::Prestart),
        (Some(other), pid) if pid > 0 => {
            tracing::warn!(
                argument = other,
                pid,
                "lifecycle argument ignored, pid selects prestart"
            );
            Ok(Lifecycle::Prestart)
        }
        (None | Some(POSTSTOP), _) => Ok(Lifecycle::Poststop),
        (Some(PRESTART), _) => Err(HookError::Usage {
            message: format!("{PRESTART} with pid 0"),
        }),
        (Some(other), _) => {
            tracing::warn!(argument = other, "lifecycle argument ignored, pid 0 selects poststop");
            Ok(Lifecycle::Poststop)
        }
    }
}

/// Runs one hook invocation.
///
/// `state_stream` supplies the state document (stdin in production).
/// On poststop the bundle config is never opened.
///
/// # Errors
///
/// Returns the first error hit; nothing is retried or rolled back.
pub fn run_hook<R, B>(
    argument: Option<&str>,
    state_stream: &mut R,
    config: &HookConfig,
    backend: &mut B,
) -> Result<HookOutcome>
where
    R: Read + AsFd,
    B: MountBackend,
{
    let state_tree = read_document(state_stream, config.chunk_size, STATE_ORIGIN)?.parse()?;
    let state = extract_state(&state_tree)?;

    let lifecycle = select_lifecycle(argument, state.pid)?;
    tracing::info!(id = %state.id, pid = state.pid, %lifecycle, "hook invoked");

    match lifecycle {
        Lifecycle::Poststop => Ok(HookOutcome::Poststop),
        Lifecycle::Prestart => prestart(&state, config, backend),
    }
}

fn prestart<B: MountBackend>(
    state: &ContainerState,
    config: &HookConfig,
    backend: &mut B,
) -> Result<HookOutcome> {
    let config_path = state.config_path()?;
    let mut config_file = File::open(&config_path).map_err(|e| HookError::ConfigOpen {
        path: config_path.clone(),
        source: e,
    })?;
    let origin = config_path.display().to_string();
    let bundle =
        extract_config(&read_document(&mut config_file, config.chunk_size, &origin)?.parse()?)?;
    drop(config_file);

    let id = effective_container_id(state, &bundle);
    let decision = decide(&config.socket_path(), &state.rootfs, &bundle);

    if !decision.source_present {
        return Ok(HookOutcome::SocketAbsent);
    }
    if decision.already_declared {
        return Ok(HookOutcome::AlreadyDeclared);
    }

    match apply(backend, state.pid, &decision)? {
        Applied::Mounted => {
            tracing::info!(%id, target = %decision.destination.display(), "broker socket mounted");
            Ok(HookOutcome::Mounted {
                destination: decision.destination,
            })
        }
        Applied::Skipped => Ok(HookOutcome::AlreadyDeclared),
    }
}
