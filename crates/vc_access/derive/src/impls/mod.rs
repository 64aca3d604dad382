// -----------------------------------------------------------------------------
// Modules

mod struct_access;
mod trait_property;
mod trait_typed;
mod variant_base;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use variant_base::impl_variant_base;

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::{AccessStruct, VariantBaseMeta};
use struct_access::impl_struct_access;
use trait_property::impl_trait_property;
use trait_typed::impl_trait_typed;

/// Provided for `#[derive(PropertyAccess)]`.
pub(crate) fn match_access_impls(ast: &DeriveInput) -> TokenStream {
    let info = match AccessStruct::from_input(ast, crate::path::vc_access()) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let vc_access_path = info.vc_access_path();
    let macro_exports_ = crate::path::macro_exports_(vc_access_path);
    let real_ident = info.ident();
    let type_name = real_ident.to_string();
    let type_path = info.type_path_expression();

    let typed_impl = impl_trait_typed(&info);
    let access_impl = impl_struct_access(&info);
    let property_impl = impl_trait_property(&info);

    // The enum must be visible next to the struct, so it stays outside the
    // anonymous const.
    let variant_base = info.attrs().variant_base.as_ref().map(|base| {
        impl_variant_base(&VariantBaseMeta::single(
            vc_access_path.clone(),
            info.vis().clone(),
            base.clone(),
            real_ident,
        ))
    });

    TokenStream::from(quote! {
        const _: () = {
            use #macro_exports_ as __vc;

            fn __factory() -> __vc::ObjectRef {
                __vc::default_object::<#real_ident>()
            }

            static __IDENT: __vc::TypeIdent =
                __vc::TypeIdent::new(#type_path, #type_name).with_factory(__factory);

            #typed_impl

            #access_impl

            #property_impl
        };

        #variant_base
    })
}
