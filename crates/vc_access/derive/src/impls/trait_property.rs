use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::AccessStruct;

/// Generate implementation code for `Property` and `Element`.
///
/// A derived type nested in another is held by value, so conversion clones
/// it into a fresh object handle and back. Readers that only look can
/// borrow it through `as_access` instead.
pub(crate) fn impl_trait_property(info: &AccessStruct) -> TokenStream {
    let real_ident = info.ident();

    quote! {
        impl __vc::Property for #real_ident {
            #[inline]
            fn type_tag() -> __vc::TypeTag {
                __vc::TypeTag::Opaque(&__IDENT)
            }

            #[inline]
            fn to_value(&self) -> __vc::Value {
                __vc::object_to_value(self)
            }

            #[inline]
            fn from_value(
                value: __vc::Value,
            ) -> ::core::result::Result<Self, __vc::ConvertError> {
                __vc::object_from_value(value)
            }

            #[inline]
            fn as_access(&self) -> ::core::option::Option<&dyn __vc::PropertyAccess> {
                ::core::option::Option::Some(self)
            }
        }

        impl __vc::Element for #real_ident {}
    }
}
