//! Argument parsing and dispatch.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use custodiahook_common::config::HookConfig;
use custodiahook_common::constants::{BIN_NAME, CUSTODIA_DIR};
use custodiahook_runtime::backend::HostMountBackend;
use custodiahook_runtime::lifecycle::{HookOutcome, run_hook};

use crate::logging::LogSink;

/// custodiahook: expose the custodia broker socket inside OCI containers.
///
/// Reads the container state from standard input.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Lifecycle point: `prestart` or `poststop`.
    pub lifecycle: Option<String>,

    /// Further arguments supplied by the runtime; ignored.
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Host directory holding `custodia.sock`.
    #[arg(long, env = "CUSTODIA_HOOK_SOCKET_DIR", default_value = CUSTODIA_DIR)]
    pub socket_dir: PathBuf,

    /// Log destination.
    #[arg(long, value_enum, default_value_t = LogSink::Syslog)]
    pub log_sink: LogSink,

    /// Emit logs as JSON lines (stderr sink only).
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Hook settings derived from the arguments.
    pub fn hook_config(&self) -> HookConfig {
        HookConfig {
            socket_dir: self.socket_dir.clone(),
            ..HookConfig::default()
        }
    }
}

/// Runs the hook against stdin and the live system.
///
/// # Errors
///
/// Returns an error if any pipeline step fails.
pub fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.hook_config();
    let mut backend = HostMountBackend::new();
    let mut stdin = std::io::stdin();

    let outcome = run_hook(cli.lifecycle.as_deref(), &mut stdin, &config, &mut backend)
        .with_context(|| {
            format!(
                "{BIN_NAME} {}",
                cli.lifecycle.as_deref().unwrap_or("<no lifecycle>")
            )
        })?;

    match outcome {
        HookOutcome::Mounted { destination } => {
            tracing::debug!(target = %destination.display(), "done");
        }
        HookOutcome::SocketAbsent | HookOutcome::AlreadyDeclared | HookOutcome::Poststop => {
            tracing::debug!(?outcome, "nothing to mount");
        }
    }
    Ok(())
}
