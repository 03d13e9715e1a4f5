//! Log setup for the `headerlint` binary.
//!
//! Findings and the run summary are printed to stdout; log lines always go to
//! stderr so that `headerlint check > findings.txt` captures findings only.
//! Without `RUST_LOG` the filter covers headerlint's own crates at the level
//! the CLI picks (`WARN`, or `DEBUG` with `--verbose`). With `--json` every
//! line is one JSON object carrying the `headerlint.file` span of the file
//! being checked.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events pass the default filter.
const LOG_TARGETS: [&str; 2] = ["headerlint_core", "headerlint"];

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Only the first call in a process has an
/// effect.
pub fn init_tracing(json: bool, level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };
    // a subscriber set by an embedding host or an earlier call stays in place
    installed.ok();
}
