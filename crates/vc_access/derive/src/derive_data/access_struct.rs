use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, Path, Type, Visibility};

use super::{FieldAttributes, TypeAttributes};

/// One property of a derived struct.
pub(crate) struct AccessField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// The exposed name.
    pub name: String,
}

/// A parsed `#[derive(PropertyAccess)]` input.
pub(crate) struct AccessStruct<'a> {
    vc_access_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    vis: &'a Visibility,
    fields: Vec<AccessField<'a>>,
}

impl<'a> AccessStruct<'a> {
    pub fn from_input(ast: &'a DeriveInput, vc_access_path: Path) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`PropertyAccess` cannot be derived for generic types",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Some(&fields.named),
                Fields::Unit => None,
                Fields::Unnamed(fields) => {
                    return Err(syn::Error::new(
                        fields.span(),
                        "`PropertyAccess` requires named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`PropertyAccess` cannot be derived for enums, see `variant_base!`",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`PropertyAccess` cannot be derived for unions",
                ));
            }
        };

        let mut fields = Vec::new();
        let mut seen = HashSet::new();
        let mut errors: Option<syn::Error> = None;

        for field in named.into_iter().flatten() {
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if field_attrs.skip {
                continue;
            }
            // Named fields always carry an ident.
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let name = match &field_attrs.rename {
                Some(lit) => lit.value(),
                None => ident.to_string().trim_start_matches("r#").to_owned(),
            };
            if !seen.insert(name.clone()) {
                let err = syn::Error::new(field.span(), format!("duplicate property name `{name}`"));
                match &mut errors {
                    Some(errors) => errors.combine(err),
                    None => errors = Some(err),
                }
                continue;
            }
            fields.push(AccessField {
                ident,
                ty: &field.ty,
                name,
            });
        }

        if let Some(errors) = errors {
            return Err(errors);
        }

        Ok(Self {
            vc_access_path,
            attrs,
            ident: &ast.ident,
            vis: &ast.vis,
            fields,
        })
    }

    #[inline]
    pub fn vc_access_path(&self) -> &Path {
        &self.vc_access_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn vis(&self) -> &Visibility {
        self.vis
    }

    #[inline]
    pub fn fields(&self) -> &[AccessField<'a>] {
        &self.fields
    }

    /// The `&'static str` expression of the type path.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// concat!(module_path!(), "::", "Foo")
    /// ```
    pub fn type_path_expression(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => quote!(#lit),
            None => {
                let name = self.ident.to_string();
                quote! {
                    ::core::concat!(::core::module_path!(), "::", #name)
                }
            }
        }
    }
}
