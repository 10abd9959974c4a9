//! # custodiahook
//!
//! OCI lifecycle hook. On prestart it bind-mounts the host's custodia
//! broker socket, read-only, into the new container's mount namespace.
//! Poststop is accepted and does nothing beyond validating the state.

mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_sink, cli.log_json);

    match cli::execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let kind = e
                .downcast_ref::<custodiahook_common::error::HookError>()
                .map(|err| err.kind().to_string());
            tracing::error!(kind = kind.as_deref().unwrap_or("other"), "{e:#}");
            ExitCode::FAILURE
        }
    }
}
