//! Static shape information for participating types.
//!
//! ## Menu
//!
//! - [`ScalarKind`]: the primitive leaf kinds (`bool`, signed, unsigned, float, string).
//! - [`MapShell`]: the container implementation a map property is declared with.
//! - [`TypeIdent`]: identity of a user type, plus whether it satisfies the
//!   contract (it has a factory) and whether it converts to a single scalar.
//! - [`TypeTag`]: the declared semantic type of a property.
//! - [`PropertyDescriptor`]: a property name and its [`TypeTag`], with the
//!   classified [`ContainerKind`](crate::ContainerKind).
//! - [`TypeShape`]: the ordered descriptor table of one type.
//! - [`ShapeCell`]: lazy static storage for a [`TypeShape`].

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod descriptor;
mod type_tag;

// -----------------------------------------------------------------------------
// Exports

pub use cell::ShapeCell;
pub use descriptor::{PropertyDescriptor, PropertyNames, TypeShape};
pub use type_tag::{MapShell, ScalarKind, TypeIdent, TypeTag};
