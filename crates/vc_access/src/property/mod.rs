//! Conversions between field types and [`Value`].
//!
//! Every field type of a derived struct implements [`Property`]. The trait
//! provides the declared [`TypeTag`] and the two-way conversion used by the
//! generated `get_property` / `set_property`.
//!
//! Containers only hold [`Element`]s: scalars, contract types and optionals
//! of those. A list of lists therefore fails to compile instead of failing
//! classification at runtime.
//!
//! ## Implementations
//!
//! - scalars: `bool`, all integers up to 64 bits, `f32`, `f64`, `String`
//! - `Option<T>`
//! - lists: `Vec<T>`, `VecDeque<T>`
//! - maps: `IndexMap`, `BTreeMap`, `std::collections::HashMap`, `hashbrown::HashMap`
//! - [`Shared<T>`] for contract types, keeping identity
//! - derived types and [`CalendarDate`](crate::impls::CalendarDate)

// -----------------------------------------------------------------------------
// Modules

mod collections;
mod object;
mod primitives;

// -----------------------------------------------------------------------------
// Exports

pub use object::{Shared, object_from_value, object_to_value};

use thiserror::Error;

use crate::access::PropertyAccess;
use crate::info::{ScalarKind, TypeTag};
use crate::value::{MapKey, Scalar, Value};

// -----------------------------------------------------------------------------
// ConvertError

/// A value that does not fit a declared type.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("expected `{expected}`, found {found}")]
    Mismatch {
        expected: TypeTag,
        found: &'static str,
    },

    #[error("{value} does not fit in `{target}`")]
    OutOfRange { target: &'static str, value: String },

    #[error("invalid `{target}`: {reason}")]
    Invalid { target: &'static str, reason: String },

    #[error("the object is mutably borrowed")]
    Busy,
}

impl ConvertError {
    /// A shape mismatch against the tag of `T`.
    #[cold]
    pub fn mismatch<T: Property>(found: &'static str) -> Self {
        Self::Mismatch {
            expected: T::type_tag(),
            found,
        }
    }
}

// -----------------------------------------------------------------------------
// Traits

/// A field type that converts to and from [`Value`].
pub trait Property: Sized + 'static {
    /// Returns the declared semantic type.
    fn type_tag() -> TypeTag;

    fn to_value(&self) -> Value;

    /// Converts back from a value.
    ///
    /// Numbers are normalized when the conversion is lossless. Anything else
    /// that does not match [`type_tag`](Property::type_tag) is an error.
    fn from_value(value: Value) -> Result<Self, ConvertError>;

    /// Lends the value as a contract object when it is one held in place.
    #[inline]
    fn as_access(&self) -> Option<&dyn PropertyAccess> {
        None
    }
}

/// A [`Property`] allowed inside lists and as map values.
pub trait Element: Property {}

/// A [`Property`] usable as a map key.
pub trait KeyProperty: Property + Eq {
    fn to_key(&self) -> MapKey;

    fn from_key(key: MapKey) -> Result<Self, ConvertError>;
}

// -----------------------------------------------------------------------------
// Helpers

pub(crate) fn expect_scalar<T: Property>(value: Value) -> Result<Scalar, ConvertError> {
    match value {
        Value::Scalar(scalar) => Ok(scalar),
        other => Err(ConvertError::mismatch::<T>(other.shape_name())),
    }
}

/// Converts a key through [`Property::from_value`], parsing strings to `kind`.
pub(crate) fn key_via_value<T: Property>(key: MapKey, kind: ScalarKind) -> Result<T, ConvertError> {
    let found = key.kind().name();
    match key.coerce_to(kind) {
        Some(key) => T::from_value(Value::Scalar(key.into())),
        None => Err(ConvertError::mismatch::<T>(found)),
    }
}

// -----------------------------------------------------------------------------
// Option

impl<T: Property> Property for Option<T> {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::optional(T::type_tag())
    }

    #[inline]
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }

    #[inline]
    fn as_access(&self) -> Option<&dyn PropertyAccess> {
        self.as_ref().and_then(Property::as_access)
    }
}

impl<T: Element> Element for Option<T> {}
