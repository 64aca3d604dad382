use thiserror::Error;

use crate::access::AccessError;
use crate::access::path::PropertyPath;
use crate::info::ScalarKind;

/// A failure during export, import, deep copy or diff.
///
/// Every variant carries the path at which it occurred. A failed import may
/// leave the target partially populated.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum WalkError {
    #[error("at `{path}`: {source}")]
    Access {
        path: PropertyPath,
        #[source]
        source: AccessError,
    },

    #[error("at `{path}`: expected {expected}, found {found}")]
    ShapeMismatch {
        path: PropertyPath,
        expected: &'static str,
        found: &'static str,
    },

    #[error("at `{path}`: map key `{key}` is not a valid {expected}")]
    InvalidKey {
        path: PropertyPath,
        key: String,
        expected: ScalarKind,
    },

    #[error("at `{path}`: map key `{key}` collides with an earlier key")]
    DuplicateKey { path: PropertyPath, key: String },

    #[error("at `{path}`: cycle back to an instance of `{type_path}`")]
    CyclicGraph {
        path: PropertyPath,
        type_path: &'static str,
    },

    #[error("at `{path}`: nesting exceeds the limit of {limit}")]
    DepthExceeded { path: PropertyPath, limit: usize },

    #[error("at `{path}`: object is borrowed elsewhere")]
    ObjectBusy { path: PropertyPath },
}

impl WalkError {
    /// Returns the path at which the error occurred.
    pub fn path(&self) -> &PropertyPath {
        match self {
            Self::Access { path, .. }
            | Self::ShapeMismatch { path, .. }
            | Self::InvalidKey { path, .. }
            | Self::DuplicateKey { path, .. }
            | Self::CyclicGraph { path, .. }
            | Self::DepthExceeded { path, .. }
            | Self::ObjectBusy { path } => path,
        }
    }
}
