//! dc-core: stable foundation for demandcalc.
//!
//! Contains:
//! - units (uom SI types + kW/kV/A constructors, line current formulas)
//! - numeric (finiteness check, decimal rounding)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{DcError, DcResult};
pub use numeric::*;
pub use units::*;
