//! Loosely-typed values exchanged through the access contract.
//!
//! ## Menu
//!
//! - [`Scalar`]: a primitive leaf.
//! - [`MapKey`]: the scalar subset usable as map keys.
//! - [`MapValue`]: a map together with the shell it should be rebuilt in.
//! - [`ObjectRef`]: a shared handle to an instance satisfying the contract.
//! - [`Value`]: any of the above, or null.

// -----------------------------------------------------------------------------
// Modules

mod map;
mod object;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub use map::{MapKey, MapValue};
pub use object::ObjectRef;
pub(crate) use object::identity_of;
pub use scalar::Scalar;

// -----------------------------------------------------------------------------
// Value

/// A property value as read or written through
/// [`PropertyAccess`](crate::PropertyAccess).
///
/// `Null` stands for an unset slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Scalar(Scalar),
    Object(ObjectRef),
    List(Vec<Value>),
    Map(MapValue),
}

impl Value {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns a short name of the value's shape, used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(scalar) => scalar.kind().name(),
            Self::Object(_) => "object",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    #[inline]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&MapValue> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::Scalar(Scalar::from(value))
            }
        }
    )*};
}

impl_from_scalar!(Scalar, bool, i8, i16, i32, i64, u8, u16, u32, u64, f64, String, &str);

impl From<ObjectRef> for Value {
    #[inline]
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}

impl From<MapValue> for Value {
    #[inline]
    fn from(value: MapValue) -> Self {
        Self::Map(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}
