//! Telemetry integration (optional).
//!
//! With the `telemetry` feature these macros forward to `tracing`. Without
//! it they expand to nothing, so the core stays free of logging overhead on
//! embedded targets.

#[cfg(feature = "telemetry")]
macro_rules! swarm_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "telemetry"))]
macro_rules! swarm_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "telemetry")]
macro_rules! swarm_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "telemetry"))]
macro_rules! swarm_trace {
    ($($arg:tt)*) => {};
}
