//! Items used by the code `vc_access_derive` generates. Not public API.

pub use crate::access::{AccessError, PropertyAccess, Typed};
pub use crate::info::{PropertyDescriptor, ShapeCell, TypeIdent, TypeShape, TypeTag};
pub use crate::property::{ConvertError, Element, Property, object_from_value, object_to_value};
pub use crate::value::{ObjectRef, Scalar, Value};
pub use crate::variant::VariantBase;

/// Converts `value` and stores it in `slot`. On error `slot` is untouched.
#[inline]
pub fn set_field<T: Property>(
    owner: &'static TypeIdent,
    name: &'static str,
    slot: &mut T,
    value: Value,
) -> Result<(), AccessError> {
    *slot = T::from_value(value).map_err(|source| AccessError::mismatch(owner, name, source))?;
    Ok(())
}

/// Creates the zero state of a derived type.
#[inline]
pub fn default_object<T: PropertyAccess + Default>() -> ObjectRef {
    ObjectRef::new(T::default())
}
