//! Hand-written contract implementations.
//!
//! ## Implemented Menu
//!
//! - [`CalendarDate`] ("date" feature): a date with a single-scalar form,
//!   exchanged as a `YYYY-MM-DD` string.

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "date")]
mod date;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "date")]
pub use date::CalendarDate;
