//! Telemetry helpers for hosts embedding `pie-layout`.
//!
//! Layout code only emits `tracing` events; installing a subscriber is left to
//! the host. `init_default_tracing` is a convenience for tools and tests that
//! just want the events printed.

/// Environment variable consulted before falling back to `default_directive`.
pub const LOG_ENV_VAR: &str = "PIE_LAYOUT_LOG";

/// Installs a compact `fmt` subscriber when the `telemetry` feature is enabled.
///
/// The filter is read from [`LOG_ENV_VAR`] and falls back to
/// `default_directive` (for example `"info"` or `"pie_layout=debug"`).
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host application.
#[must_use]
pub fn init_default_tracing(default_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_directive;
        false
    }
}
