#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::vc_access::...` paths, and `macro_utils::Manifest`
// cannot tell whether it is expanding inside this crate. The alias keeps the
// generated paths valid in our own unit tests.
extern crate self as vc_access;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod access;
pub mod factory;
pub mod impls;
pub mod info;
pub mod kind;
pub mod property;
pub mod value;
pub mod variant;
pub mod walk;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use access::{AccessError, PropertyAccess, Typed};
pub use kind::ContainerKind;
pub use property::{Property, Shared};
pub use value::{MapKey, MapValue, ObjectRef, Scalar, Value};
pub use vc_access_derive as derive;
