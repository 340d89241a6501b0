//! ags-core: stable foundation for agsflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (float checks and piecewise-linear series)
//! - timing (scoped wall-clock timers reported through tracing)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
