use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::VariantBaseMeta;

/// Generate a variant base enum and its implementations.
///
/// Only the enum is emitted at item level. Conversions, `VariantBase` and
/// the forwarding `PropertyAccess` live in an anonymous const.
pub(crate) fn impl_variant_base(meta: &VariantBaseMeta) -> TokenStream {
    let macro_exports_ = crate::path::macro_exports_(&meta.vc_access_path);
    let attrs = &meta.attrs;
    let vis = &meta.vis;
    let base = &meta.ident;

    let idents: Vec<_> = meta.variants.iter().map(|entry| &entry.ident).collect();
    let types: Vec<_> = meta.variants.iter().map(|entry| &entry.ty).collect();
    let names: Vec<_> = idents.iter().map(ToString::to_string).collect();

    let conversions = meta.variants.iter().map(|entry| {
        let ident = &entry.ident;
        let ty = &entry.ty;
        quote! {
            impl ::core::convert::From<#ty> for #base {
                #[inline]
                fn from(value: #ty) -> Self {
                    Self::#ident(value)
                }
            }

            impl ::core::convert::TryFrom<#base> for #ty {
                type Error = #base;

                #[allow(unreachable_patterns)]
                fn try_from(value: #base) -> ::core::result::Result<Self, #base> {
                    match value {
                        #base::#ident(inner) => ::core::result::Result::Ok(inner),
                        other => ::core::result::Result::Err(other),
                    }
                }
            }
        }
    });

    quote! {
        #(#attrs)*
        #vis enum #base {
            #( #idents(#types), )*
        }

        const _: () = {
            use #macro_exports_ as __vc;

            #(#conversions)*

            impl __vc::VariantBase for #base {
                const VARIANTS: &'static [&'static str] = &[#(#names),*];

                fn variant_name(&self) -> &'static str {
                    match self {
                        #( Self::#idents(_) => #names, )*
                    }
                }

                fn as_variant(&self) -> &dyn __vc::PropertyAccess {
                    match self {
                        #( Self::#idents(inner) => inner, )*
                    }
                }

                fn as_variant_mut(&mut self) -> &mut dyn __vc::PropertyAccess {
                    match self {
                        #( Self::#idents(inner) => inner, )*
                    }
                }

                fn new_variant(type_path: &str) -> ::core::option::Option<Self> {
                    #(
                        if type_path == <#types as __vc::Typed>::type_ident().type_path() {
                            return ::core::option::Option::Some(
                                Self::#idents(<#types as ::core::default::Default>::default()),
                            );
                        }
                    )*
                    ::core::option::Option::None
                }
            }

            impl __vc::PropertyAccess for #base {
                #[inline]
                fn shape(&self) -> &'static __vc::TypeShape {
                    __vc::VariantBase::as_variant(self).shape()
                }

                #[inline]
                fn get_property(
                    &self,
                    name: &str,
                ) -> ::core::result::Result<__vc::Value, __vc::AccessError> {
                    __vc::VariantBase::as_variant(self).get_property(name)
                }

                #[inline]
                fn property_ref(
                    &self,
                    name: &str,
                ) -> ::core::result::Result<
                    ::core::option::Option<&dyn __vc::PropertyAccess>,
                    __vc::AccessError,
                > {
                    __vc::VariantBase::as_variant(self).property_ref(name)
                }

                #[inline]
                fn set_property(
                    &mut self,
                    name: &str,
                    value: __vc::Value,
                ) -> ::core::result::Result<(), __vc::AccessError> {
                    __vc::VariantBase::as_variant_mut(self).set_property(name, value)
                }

                #[inline]
                fn scalar_form(&self) -> ::core::option::Option<__vc::Scalar> {
                    __vc::VariantBase::as_variant(self).scalar_form()
                }

                #[inline]
                fn set_scalar_form(
                    &mut self,
                    scalar: __vc::Scalar,
                ) -> ::core::result::Result<(), __vc::AccessError> {
                    __vc::VariantBase::as_variant_mut(self).set_scalar_form(scalar)
                }
            }
        };
    }
}
