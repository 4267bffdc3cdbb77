use tracing_subscriber::EnvFilter;

/// Output format for the global tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, single-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Build the env filter, honouring `RUST_LOG` and falling back to `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global tracing subscriber.
///
/// Returns `false` when a subscriber was already installed (e.g. by a test
/// harness); that case is not an error.
pub fn init(format: LogFormat, default_directive: &str) -> bool {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(default_directive));
    match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}
