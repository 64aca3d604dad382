//! See following macros:
//!
//! - [`PropertyAccess`]
//! - [`variant_base!`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static ACCESS_ATTRIBUTE_NAME: &str = "access";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Property Access Derivation
///
/// `#[derive(PropertyAccess)]` implements the following traits:
///
/// - `Typed`
/// - `PropertyAccess`
/// - `Property` and `Element`, so the type can be nested in other types
///
/// Every named field becomes one property, in declaration order. Field types
/// must implement `Property`. The type itself must implement `Default`
/// (the zero state created by factories) and `Clone` (nested values are
/// copied in and out).
///
/// Generic types, tuple structs and enums are rejected.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(PropertyAccess, Default, Clone)]
/// struct Foo {
///     #[access(rename = "displayName")]
///     display_name: String,
///     #[access(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// - `rename = ".."`: the exposed property name. Names must be unique.
/// - `skip`: the field is not a property. Its type needs no `Property` impl.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(PropertyAccess, Default, Clone)]
/// #[access(type_path = "app::model::Foo", variant_base = FooBase)]
/// struct Foo { /* ... */ }
/// ```
///
/// - `type_path = ".."`: overrides the default `module_path!()::Name`.
/// - `variant_base = Name`: also generates a single-variant base enum
///   `Name`, see [`variant_base!`].
#[proc_macro_derive(PropertyAccess, attributes(access))]
pub fn derive_property_access(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impls::match_access_impls(&ast)
}

/// # Variant Base Generation
///
/// Generates a closed enum with one variant per listed contract type.
///
/// ```rust, ignore
/// variant_base! {
///     #[derive(Debug)]
///     pub enum Shape {
///         Circle,
///         Square,
///         Label(text::Label),
///     }
/// }
/// ```
///
/// A bare name is both the variant and the wrapped type. `Name(Type)` wraps
/// a type by path.
///
/// The enum receives `From<T>` for each wrapped type, `TryFrom<Shape>` for
/// each wrapped type, `VariantBase`, and a `PropertyAccess` implementation
/// that forwards to the active variant.
#[proc_macro]
pub fn variant_base(input: TokenStream) -> TokenStream {
    let parser = parse_macro_input!(input as derive_data::VariantBaseParser);
    impls::impl_variant_base(&parser.into_meta(path::vc_access())).into()
}
