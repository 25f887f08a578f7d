//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at application startup; later calls are no-ops. `RUST_LOG`
/// overrides the profile's default filter.
///
/// # Profiles
///
/// - **Development**: Human-readable logs, `vardiff=debug`
/// - **Production**: JSON structured logs, `vardiff=info`
/// - **Test**: Bare registry; use `init_test_capture()` to record events
///
/// # Example
///
/// ```
/// use vardiff_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        // try_init: the host may already own the global subscriber
        let _ = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("vardiff=debug")),
                )
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("vardiff=info")),
                )
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init().map_err(Into::into),
        };
    });
}
