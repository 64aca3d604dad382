use thiserror::Error;

use crate::info::TypeIdent;
use crate::property::ConvertError;

/// A failure reported by [`PropertyAccess`](crate::PropertyAccess).
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("`{type_path}` has no property `{name}`")]
    UnknownProperty {
        type_path: &'static str,
        name: String,
    },

    #[error("property `{name}` of `{type_path}` rejected the value: {source}")]
    TypeMismatch {
        type_path: &'static str,
        name: &'static str,
        #[source]
        source: ConvertError,
    },

    #[error("`{operation}` is not supported by property `{name}` of `{type_path}`")]
    UnsupportedOperation {
        type_path: &'static str,
        name: &'static str,
        operation: &'static str,
    },

    #[error("no factory creates `{object_type}` for property `{name}` of `{type_path}`")]
    NoFactory {
        type_path: &'static str,
        name: &'static str,
        object_type: &'static str,
    },
}

impl AccessError {
    #[cold]
    pub fn unknown(owner: &TypeIdent, name: &str) -> Self {
        Self::UnknownProperty {
            type_path: owner.type_path(),
            name: name.to_owned(),
        }
    }

    #[cold]
    pub fn mismatch(owner: &TypeIdent, name: &'static str, source: ConvertError) -> Self {
        Self::TypeMismatch {
            type_path: owner.type_path(),
            name,
            source,
        }
    }

    #[cold]
    pub fn unsupported(owner: &TypeIdent, name: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            type_path: owner.type_path(),
            name,
            operation,
        }
    }

    #[cold]
    pub fn no_factory(owner: &TypeIdent, name: &'static str, object: &TypeIdent) -> Self {
        Self::NoFactory {
            type_path: owner.type_path(),
            name,
            object_type: object.type_path(),
        }
    }

    /// Returns the name of the property the error refers to.
    pub fn property_name(&self) -> &str {
        match self {
            Self::UnknownProperty { name, .. } => name,
            Self::TypeMismatch { name, .. }
            | Self::UnsupportedOperation { name, .. }
            | Self::NoFactory { name, .. } => name,
        }
    }
}
