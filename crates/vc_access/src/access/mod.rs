//! The property access contract.
//!
//! ## Menu
//!
//! - [`PropertyAccess`]: read, write, classify and instantiate properties by name.
//! - [`Typed`]: static shape access for concrete types.
//! - [`AccessError`]: failures reported by the contract.
//! - [`path`]: `a.b[2]{key}` paths resolved through the contract.

// -----------------------------------------------------------------------------
// Modules

mod contract;
mod error;

pub mod path;

// -----------------------------------------------------------------------------
// Exports

pub use contract::{PropertyAccess, Typed};
pub use error::AccessError;
