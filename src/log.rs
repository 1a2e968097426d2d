//! Conditional logging macros.
//!
//! When the `tracing` feature is enabled, these re-export `tracing` macros.
//! When disabled, they expand to no-ops for zero runtime overhead.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

// A bare `warn` would clash with the builtin lint attribute.
#[cfg(not(feature = "tracing"))]
pub(crate) use {log_debug as debug, log_trace as trace, log_warn as warn};

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_accept_fields_and_messages() {
        crate::log::debug!(gap = 0.9, "checking");
        crate::log::trace!("tracing {}", 0.9);
        crate::log::warn!(name = "interior_gap", "rejected setting");
    }
}
