//! Logging setup shared by the binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const AMMA_TARGETS: [&str; 7] = [
    "amma",
    "amma_core",
    "amma_database",
    "amma_interface",
    "amma_models",
    "amma_narrative",
    "amma_error",
];

/// Default filter: AMMA crates at `info` (or `debug` when verbose),
/// everything else at `warn`.
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut directives = vec!["warn".to_string()];
    directives.extend(AMMA_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}

/// Initialize console logging on stderr.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_console_telemetry(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
