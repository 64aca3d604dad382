//! Paths into `vc_access` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `vc_access` crate.
///
/// 1. For crates that depend on `vc_access`, `::vc_access` is returned.
/// 2. For crates that depend on `vc_props`, `::vc_props::access` is returned.
/// 3. Otherwise `::vc_access` is returned, which may be incorrect.
///
/// This reads the builder's `Cargo.toml`, so the path is resolved once per
/// expansion and passed along.
pub(crate) fn vc_access() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_access"))
}

/// Everything the generated code uses lives in one module.
#[inline(always)]
pub(crate) fn macro_exports_(vc_access_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_access_path::__macro_exports
    }
}
