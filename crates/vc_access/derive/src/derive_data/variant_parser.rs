use std::collections::HashSet;

use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::token::Paren;
use syn::{Attribute, Ident, Path, Token, Type, TypePath, Visibility, braced, parenthesized};

/// One variant: `Name` or `Name(Type)`.
pub(crate) struct VariantEntry {
    pub ident: Ident,
    pub ty: Type,
}

impl Parse for VariantEntry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let ident: Ident = input.parse()?;
        let ty = if input.peek(Paren) {
            let inner;
            parenthesized!(inner in input);
            inner.parse()?
        } else {
            Type::Path(TypePath {
                qself: None,
                path: Path::from(ident.clone()),
            })
        };
        Ok(Self { ident, ty })
    }
}

/// The input of [`variant_base!`](crate::variant_base).
///
/// Format: `#[attrs] vis enum Name { Variant, Variant(Type), .. }`
pub(crate) struct VariantBaseParser {
    attrs: Vec<Attribute>,
    vis: Visibility,
    ident: Ident,
    variants: Vec<VariantEntry>,
}

impl Parse for VariantBaseParser {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        input.parse::<Token![enum]>()?;
        let ident: Ident = input.parse()?;

        let content;
        let brace = braced!(content in input);
        let entries = Punctuated::<VariantEntry, Token![,]>::parse_terminated(&content)?;
        if entries.is_empty() {
            return Err(syn::Error::new(
                brace.span.join(),
                "a variant base needs at least one variant",
            ));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.ident.to_string()) {
                return Err(syn::Error::new(
                    entry.ident.span(),
                    format!("duplicate variant `{}`", entry.ident),
                ));
            }
        }

        Ok(Self {
            attrs,
            vis,
            ident,
            variants: entries.into_iter().collect(),
        })
    }
}

impl VariantBaseParser {
    pub fn into_meta(self, vc_access_path: Path) -> VariantBaseMeta {
        VariantBaseMeta {
            vc_access_path,
            attrs: self.attrs,
            vis: self.vis,
            ident: self.ident,
            variants: self.variants,
        }
    }
}

/// Everything needed to generate a variant base enum.
pub(crate) struct VariantBaseMeta {
    pub vc_access_path: Path,
    /// Forwarded to the enum.
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
    pub variants: Vec<VariantEntry>,
}

impl VariantBaseMeta {
    /// The single-variant base of `#[access(variant_base = Name)]`.
    pub fn single(vc_access_path: Path, vis: Visibility, ident: Ident, variant: &Ident) -> Self {
        Self {
            vc_access_path,
            attrs: Vec::new(),
            vis,
            ident,
            variants: vec![VariantEntry {
                ident: variant.clone(),
                ty: Type::Path(TypePath {
                    qself: None,
                    path: Path::from(variant.clone()),
                }),
            }],
        }
    }
}
