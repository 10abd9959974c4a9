//! Log initialization.
//!
//! Hook output goes to the system log by default, tagged `custodiahook` under
//! the user facility. `--log-sink stderr` sends it to the runtime's captured
//! stderr instead, where `--log-json` selects the JSON formatter.

use std::ffi::CStr;

use clap::ValueEnum;
use custodiahook_common::constants::LOG_ENV;
use syslog_tracing::{Facility, Options, Syslog};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Identity attached to every system log record.
const SYSLOG_IDENTITY: &CStr = c"custodiahook";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Where log records are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogSink {
    /// The system log (`syslog(3)`).
    #[default]
    Syslog,
    /// Standard error.
    Stderr,
}

/// Installs the global subscriber. The filter comes from `CUSTODIA_HOOK_LOG`,
/// defaulting to `info`.
///
/// Falls back to stderr when the system log cannot be opened.
pub fn init(sink: LogSink, json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let (layer, fell_back) = match sink {
        LogSink::Syslog => match syslog_layer() {
            Some(layer) => (layer, false),
            None => (stderr_layer(json), true),
        },
        LogSink::Stderr => (stderr_layer(json), false),
    };

    tracing_subscriber::registry().with(layer).with(filter).init();
    if fell_back {
        tracing::warn!("system log unavailable, logging to stderr");
    }
}

fn syslog_layer() -> Option<BoxedLayer> {
    let writer = Syslog::new(SYSLOG_IDENTITY, Options::LOG_PID, Facility::User)?;
    Some(
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .without_time()
            .boxed(),
    )
}

fn stderr_layer(json: bool) -> BoxedLayer {
    let layer = fmt::layer().with_writer(std::io::stderr).with_ansi(false);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}
