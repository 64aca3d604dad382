use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::AccessStruct;

/// Generate implementation code for `Typed`.
///
/// Expects `__vc` and `__IDENT` in scope. The shape is built on first use,
/// one descriptor per property:
///
/// ```ignore
/// __vc::PropertyDescriptor::of::<FieldType>("name")
/// ```
pub(crate) fn impl_trait_typed(info: &AccessStruct) -> TokenStream {
    let real_ident = info.ident();

    let descriptors = info.fields().iter().map(|field| {
        let ty = field.ty;
        let name = &field.name;
        quote! {
            __vc::PropertyDescriptor::of::<#ty>(#name)
        }
    });

    let len = info.fields().len();

    quote! {
        impl __vc::Typed for #real_ident {
            #[inline]
            fn type_ident() -> &'static __vc::TypeIdent {
                &__IDENT
            }

            fn type_shape() -> &'static __vc::TypeShape {
                static CELL: __vc::ShapeCell = __vc::ShapeCell::new();
                CELL.get_or_init(|| {
                    let properties: [__vc::PropertyDescriptor; #len] = [
                        #(#descriptors),*
                    ];
                    __vc::TypeShape::new(&__IDENT, properties)
                })
            }
        }
    }
}
