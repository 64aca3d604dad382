use syn::meta::ParseNestedMeta;
use syn::{Attribute, Ident, LitStr};

use crate::ACCESS_ATTRIBUTE_NAME;

fn duplicate(meta: &ParseNestedMeta, name: &str) -> syn::Error {
    meta.error(format!("duplicate `{name}` attribute"))
}

// -----------------------------------------------------------------------------
// Type Attributes

/// `#[access(..)]` on the type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `type_path = "a::b::Name"`
    pub type_path: Option<LitStr>,
    /// `variant_base = Name`
    pub variant_base: Option<Ident>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(ACCESS_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    if this.type_path.is_some() {
                        return Err(duplicate(&meta, "type_path"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "`type_path` cannot be empty"));
                    }
                    this.type_path = Some(lit);
                    Ok(())
                } else if meta.path.is_ident("variant_base") {
                    if this.variant_base.is_some() {
                        return Err(duplicate(&meta, "variant_base"));
                    }
                    this.variant_base = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown type attribute, expected `type_path` or `variant_base`"))
                }
            })?;
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// Field Attributes

/// `#[access(..)]` on a field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `rename = "name"`
    pub rename: Option<LitStr>,
    /// `skip`
    pub skip: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(ACCESS_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if this.rename.is_some() {
                        return Err(duplicate(&meta, "rename"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "property name cannot be empty"));
                    }
                    this.rename = Some(lit);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    if this.skip {
                        return Err(duplicate(&meta, "skip"));
                    }
                    this.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown field attribute, expected `rename` or `skip`"))
                }
            })?;
        }
        if this.skip && this.rename.is_some() {
            return Err(syn::Error::new(
                this.rename.as_ref().map_or_else(proc_macro2::Span::call_site, LitStr::span),
                "`rename` has no effect on a skipped field",
            ));
        }
        Ok(this)
    }
}
