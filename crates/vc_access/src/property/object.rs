use alloc::rc::Rc;
use core::cell::RefCell;

use crate::access::{AccessError, PropertyAccess, Typed};
use crate::factory;
use crate::info::TypeTag;
use crate::property::{ConvertError, Element, Property};
use crate::value::{ObjectRef, Scalar, Value};

/// A nested object shared by reference.
///
/// Plain nested fields are values: reading one yields a copy and writing one
/// replaces it. A `Shared<T>` field instead hands out the instance itself,
/// so graphs built from it can share nodes and form cycles.
///
/// The handle is single-threaded.
pub type Shared<T> = Rc<RefCell<T>>;

impl<T: Typed + PropertyAccess> Property for Rc<RefCell<T>> {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::Opaque(T::type_ident())
    }

    /// Types with a scalar form read as that scalar, like their unshared
    /// fields do. A busy handle is passed on as is.
    fn to_value(&self) -> Value {
        if T::type_ident().scalar_form().is_some()
            && let Some(scalar) = self.try_borrow().ok().and_then(|inner| inner.scalar_form())
        {
            return Value::Scalar(scalar);
        }
        Value::Object(ObjectRef::from_shared(Rc::clone(self)))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Object(object) => object
                .downcast::<T>()
                .ok_or_else(|| ConvertError::mismatch::<Self>(found_type(&object))),
            Value::Scalar(scalar) if T::type_ident().scalar_form().is_some() => {
                shared_from_scalar(scalar)
            }
            other => Err(ConvertError::mismatch::<Self>(other.shape_name())),
        }
    }
}

/// Builds a fresh shared instance from its scalar form.
fn shared_from_scalar<T: Typed + PropertyAccess>(scalar: Scalar) -> Result<Shared<T>, ConvertError> {
    let shared = factory::new_instance(T::type_ident())
        .and_then(|object| object.downcast::<T>())
        .ok_or_else(|| ConvertError::mismatch::<Shared<T>>("scalar"))?;
    let result = match shared.try_borrow_mut() {
        Ok(mut inner) => inner.set_scalar_form(scalar),
        Err(_) => return Err(ConvertError::Busy),
    };
    match result {
        Ok(()) => Ok(shared),
        Err(AccessError::TypeMismatch { source, .. }) => Err(source),
        Err(_) => Err(ConvertError::mismatch::<Shared<T>>("scalar")),
    }
}

impl<T: Typed + PropertyAccess> Element for Rc<RefCell<T>> {}

/// `Property::to_value` for contract types held by value.
#[inline]
pub fn object_to_value<T: PropertyAccess + Clone>(object: &T) -> Value {
    Value::Object(ObjectRef::new(object.clone()))
}

/// `Property::from_value` for contract types held by value.
///
/// Takes the instance out of the handle when nothing else shares it and
/// clones it otherwise.
pub fn object_from_value<T>(value: Value) -> Result<T, ConvertError>
where
    T: Property + PropertyAccess + Clone,
{
    let object = match value {
        Value::Object(object) => object,
        other => return Err(ConvertError::mismatch::<T>(other.shape_name())),
    };
    let Some(shared) = object.downcast::<T>() else {
        return Err(ConvertError::mismatch::<T>(found_type(&object)));
    };
    drop(object);
    match Rc::try_unwrap(shared) {
        Ok(cell) => Ok(cell.into_inner()),
        Err(shared) => {
            let cloned = shared.try_borrow().map(|inner| T::clone(&inner));
            cloned.map_err(|_| ConvertError::Busy)
        }
    }
}

fn found_type(object: &ObjectRef) -> &'static str {
    object
        .try_borrow()
        .map(|inner| inner.identity_type().type_path())
        .unwrap_or("object")
}
