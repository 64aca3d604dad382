use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::AccessStruct;

/// Generate implementation code for `PropertyAccess`.
///
/// Both accessors are a single `match` on the property name.
pub(crate) fn impl_struct_access(info: &AccessStruct) -> TokenStream {
    let real_ident = info.ident();

    let get_arms = info.fields().iter().map(|field| {
        let ident = field.ident;
        let name = &field.name;
        quote! {
            #name => ::core::result::Result::Ok(__vc::Property::to_value(&self.#ident)),
        }
    });

    let ref_arms = info.fields().iter().map(|field| {
        let ident = field.ident;
        let name = &field.name;
        quote! {
            #name => ::core::result::Result::Ok(__vc::Property::as_access(&self.#ident)),
        }
    });

    let set_arms = info.fields().iter().map(|field| {
        let ident = field.ident;
        let name = &field.name;
        quote! {
            #name => __vc::set_field(&__IDENT, #name, &mut self.#ident, __value),
        }
    });

    // A struct without properties never reads `__value`.
    let allow_unused = info
        .fields()
        .is_empty()
        .then(|| quote!(#[allow(unused_variables)]));

    quote! {
        impl __vc::PropertyAccess for #real_ident {
            #[inline]
            fn shape(&self) -> &'static __vc::TypeShape {
                <Self as __vc::Typed>::type_shape()
            }

            fn get_property(
                &self,
                __name: &str,
            ) -> ::core::result::Result<__vc::Value, __vc::AccessError> {
                match __name {
                    #(#get_arms)*
                    _ => ::core::result::Result::Err(__vc::AccessError::unknown(&__IDENT, __name)),
                }
            }

            fn property_ref(
                &self,
                __name: &str,
            ) -> ::core::result::Result<
                ::core::option::Option<&dyn __vc::PropertyAccess>,
                __vc::AccessError,
            > {
                match __name {
                    #(#ref_arms)*
                    _ => ::core::result::Result::Err(__vc::AccessError::unknown(&__IDENT, __name)),
                }
            }

            #allow_unused
            fn set_property(
                &mut self,
                __name: &str,
                __value: __vc::Value,
            ) -> ::core::result::Result<(), __vc::AccessError> {
                match __name {
                    #(#set_arms)*
                    _ => ::core::result::Result::Err(__vc::AccessError::unknown(&__IDENT, __name)),
                }
            }
        }
    }
}
