//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod access_struct;
mod attributes;
mod variant_parser;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use access_struct::AccessStruct;
pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use variant_parser::{VariantBaseMeta, VariantBaseParser};
