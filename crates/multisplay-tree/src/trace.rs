//! Logging macros that cost nothing unless the `tracing` feature is on.
//!
//! With the feature enabled they forward to the `tracing` crate, so the
//! embedding application's subscriber decides what is printed:
//!
//! ```bash
//! RUST_LOG=multisplay_tree=trace cargo test --features tracing
//! ```

#![allow(unused_macros)]

/// Trace-level event (per rotation / per switch granularity).
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level event (per map operation granularity).
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;
