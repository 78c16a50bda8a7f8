//! Logging for the library side.
//!
//! With the `tracing` feature (on for the binary) these are the `tracing`
//! macros. A plain library build swallows every call, arguments included, so
//! layout and rendering stay free of logging cost.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

/// Per-sentence summaries: what was laid out, rasterized or written.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

/// Per-step detail inside the layout passes.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// Input that is drawn anyway but probably not what was meant.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace, warn};
