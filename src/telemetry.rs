//! Optional stderr logging for `chart-literal` tools.
//!
//! Parsing and serialization report through `tracing` only. Hosts that
//! already run a subscriber get the events for free; standalone tools can
//! call [`init_default_tracing`] to see them, including the parser echo.

/// Filter used when `RUST_LOG` is unset: this crate at `info`, which keeps
/// the parser echo visible, everything else at `warn`.
pub const DEFAULT_LOG_FILTER: &str = "warn,chart_literal=info";

/// Installs a compact stderr subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_LOG_FILTER`].
///
/// `false` means nothing was installed: either the `telemetry` feature is off
/// or the process already has a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
