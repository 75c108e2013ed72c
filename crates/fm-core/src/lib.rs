//! fm-core: stable foundation for fuelmix.
//!
//! Contains:
//! - units (volume units + text parsing)
//! - numeric (Real + tolerances + float helpers)

pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use numeric::*;
pub use units::*;
