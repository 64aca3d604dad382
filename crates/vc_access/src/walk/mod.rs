//! Generic graph walking: export, import, deep copy and structural diff.
//!
//! Everything here works through [`PropertyAccess`] alone. The walker never
//! holds on to an instance between calls.
//!
//! ```
//! use vc_access::derive::PropertyAccess;
//! use vc_access::walk::{self, Node};
//!
//! #[derive(PropertyAccess, Default, Clone)]
//! struct Person {
//!     name: Option<String>,
//!     age: Option<i32>,
//! }
//!
//! let person = Person { name: Some("Ada".into()), age: None };
//! let node = walk::export(&person).unwrap();
//! assert_eq!(node.get("name"), Some(&Node::scalar("Ada")));
//! assert_eq!(node.get("age"), Some(&Node::Null));
//!
//! let back: Person = walk::import(&node).unwrap();
//! assert_eq!(back.name.as_deref(), Some("Ada"));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod config;
mod copy;
mod diff;
mod error;
mod export;
mod import;
mod node;

#[cfg(feature = "serde")]
mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use config::WalkConfig;
pub use diff::{Difference, DifferenceKind, diff_nodes};
pub use error::WalkError;
pub use node::{MapNode, Node, ObjectNode};

use crate::access::PropertyAccess;
use crate::value::ObjectRef;

use export::Exporter;
use import::Importer;

// -----------------------------------------------------------------------------
// Walker

/// Runs walks with one [`WalkConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Walker {
    config: WalkConfig,
}

impl Walker {
    #[inline]
    pub const fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub const fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Converts `root` into a [`Node`] tree, fields in property order.
    pub fn export(&self, root: &dyn PropertyAccess) -> Result<Node, WalkError> {
        Exporter::new(&self.config).export_root(root)
    }

    /// Writes `node` into an existing instance.
    ///
    /// Existing nested objects are merged into, and empty slots are filled
    /// from the factory. On error the target may be partially written.
    pub fn import_into(
        &self,
        node: &Node,
        target: &mut dyn PropertyAccess,
    ) -> Result<(), WalkError> {
        Importer::new(&self.config).import_root(node, target)
    }

    /// Builds a new `T` from `node`.
    pub fn import<T: PropertyAccess + Default>(&self, node: &Node) -> Result<T, WalkError> {
        let mut target = T::default();
        self.import_into(node, &mut target)?;
        Ok(target)
    }

    /// Copies `root` into a fresh instance created from its identity type.
    pub fn deep_copy(&self, root: &dyn PropertyAccess) -> Result<ObjectRef, WalkError> {
        copy::deep_copy(&self.config, root)
    }

    pub fn deep_copy_typed<T: PropertyAccess + Default>(&self, root: &T) -> Result<T, WalkError> {
        copy::deep_copy_typed(&self.config, root)
    }

    /// Exports both sides and lists their differences.
    pub fn diff(
        &self,
        left: &dyn PropertyAccess,
        right: &dyn PropertyAccess,
    ) -> Result<Vec<Difference>, WalkError> {
        let left = self.export(left)?;
        let right = self.export(right)?;
        Ok(diff_nodes(&left, &right))
    }

    pub fn structurally_equal(
        &self,
        left: &dyn PropertyAccess,
        right: &dyn PropertyAccess,
    ) -> Result<bool, WalkError> {
        self.diff(left, right).map(|diffs| diffs.is_empty())
    }
}

// -----------------------------------------------------------------------------
// Default walker shortcuts

/// [`Walker::export`] with the default configuration.
#[inline]
pub fn export(root: &dyn PropertyAccess) -> Result<Node, WalkError> {
    Walker::default().export(root)
}

/// [`Walker::import_into`] with the default configuration.
#[inline]
pub fn import_into(node: &Node, target: &mut dyn PropertyAccess) -> Result<(), WalkError> {
    Walker::default().import_into(node, target)
}

/// [`Walker::import`] with the default configuration.
#[inline]
pub fn import<T: PropertyAccess + Default>(node: &Node) -> Result<T, WalkError> {
    Walker::default().import(node)
}

/// [`Walker::deep_copy`] with the default configuration.
#[inline]
pub fn deep_copy(root: &dyn PropertyAccess) -> Result<ObjectRef, WalkError> {
    Walker::default().deep_copy(root)
}

#[inline]
pub fn deep_copy_typed<T: PropertyAccess + Default>(root: &T) -> Result<T, WalkError> {
    Walker::default().deep_copy_typed(root)
}

/// [`Walker::diff`] with the default configuration.
#[inline]
pub fn diff(
    left: &dyn PropertyAccess,
    right: &dyn PropertyAccess,
) -> Result<Vec<Difference>, WalkError> {
    Walker::default().diff(left, right)
}

#[inline]
pub fn structurally_equal(
    left: &dyn PropertyAccess,
    right: &dyn PropertyAccess,
) -> Result<bool, WalkError> {
    Walker::default().structurally_equal(left, right)
}
