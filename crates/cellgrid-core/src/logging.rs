#![forbid(unsafe_code)]

//! Structured logging facade.
//!
//! Logging is compiled out unless the `tracing` feature is enabled. Call
//! sites in the layout crate gate on their own `tracing` feature, so a host
//! that never turns it on pays nothing.
//!
//! With `tracing-json`, [`init_json_logging`] installs a JSON subscriber
//! filtered by `RUST_LOG` (default `info`).

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a global JSON subscriber honoring `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init_json_logging();
        assert!(!init_json_logging());
    }
}
