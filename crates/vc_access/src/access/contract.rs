use core::any::Any;

use crate::access::AccessError;
use crate::factory;
use crate::info::{PropertyDescriptor, PropertyNames, TypeIdent, TypeShape, TypeTag};
use crate::kind::ContainerKind;
use crate::value::{MapValue, ObjectRef, Scalar, Value};

// -----------------------------------------------------------------------------
// Typed

/// Static shape access for a concrete type.
///
/// Implemented by `#[derive(PropertyAccess)]`. Hand-written implementations
/// usually store both values in statics, see [`ShapeCell`](crate::info::ShapeCell).
///
/// `type_ident` must not build the shape. A type referring to itself
/// through [`Shared`](crate::Shared) asks for its own identity while its
/// shape is being built.
pub trait Typed: 'static {
    fn type_ident() -> &'static TypeIdent;

    fn type_shape() -> &'static TypeShape;
}

// -----------------------------------------------------------------------------
// PropertyAccess

/// Uniform, name-based access to the properties of a value.
///
/// Only [`shape`](PropertyAccess::shape), [`get_property`](PropertyAccess::get_property)
/// and [`set_property`](PropertyAccess::set_property) are required. Every
/// other operation is answered from the [`TypeShape`].
///
/// # Examples
///
/// ```
/// use vc_access::{PropertyAccess, ContainerKind, Value, derive::PropertyAccess};
///
/// #[derive(PropertyAccess, Default, Clone)]
/// struct Account {
///     owner: String,
///     tags: Vec<String>,
/// }
///
/// let mut account = Account::default();
/// account.set_property("owner", Value::from("ada")).unwrap();
///
/// assert_eq!(account.property_names().collect::<Vec<_>>(), ["owner", "tags"]);
/// assert_eq!(account.get_property("owner").unwrap(), Value::from("ada"));
/// assert_eq!(account.container_kind("tags").unwrap(), ContainerKind::ListOfScalar);
/// assert!(account.get_property("balance").is_err());
/// ```
pub trait PropertyAccess: Any {
    /// Returns the descriptor table of the concrete type.
    fn shape(&self) -> &'static TypeShape;

    /// Reads a property.
    ///
    /// Unset slots read as [`Value::Null`].
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownProperty`] if `name` is not declared.
    fn get_property(&self, name: &str) -> Result<Value, AccessError>;

    /// Writes a property, leaving every other slot untouched.
    ///
    /// # Errors
    ///
    /// - [`AccessError::UnknownProperty`] if `name` is not declared.
    /// - [`AccessError::TypeMismatch`] if `value` does not fit the declared type.
    ///   The slot keeps its previous value.
    fn set_property(&mut self, name: &str, value: Value) -> Result<(), AccessError>;

    /// Returns the identity of the concrete type.
    #[inline]
    fn identity_type(&self) -> &'static TypeIdent {
        self.shape().ident()
    }

    /// Returns the property names in declaration order.
    #[inline]
    fn property_names(&self) -> PropertyNames<'static> {
        self.shape().names()
    }

    /// Lends a nested object held by value, without copying it.
    ///
    /// Returns `None` for every other property, and for empty or shared
    /// slots. Readers then fall back to [`get_property`](PropertyAccess::get_property).
    #[inline]
    fn property_ref(&self, name: &str) -> Result<Option<&dyn PropertyAccess>, AccessError> {
        self.descriptor(name).map(|_| None)
    }

    fn descriptor(&self, name: &str) -> Result<&'static PropertyDescriptor, AccessError> {
        self.shape()
            .property(name)
            .ok_or_else(|| AccessError::unknown(self.identity_type(), name))
    }

    /// Returns the container kind of a property. Constant per type and name.
    #[inline]
    fn container_kind(&self, name: &str) -> Result<ContainerKind, AccessError> {
        Ok(self.descriptor(name)?.kind())
    }

    /// Creates a zero-state instance for an object-producing property.
    ///
    /// For lists and maps of objects this is an element instance.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnsupportedOperation`] for scalar properties and
    /// scalar containers.
    fn create_nested_instance(&self, name: &str) -> Result<ObjectRef, AccessError> {
        factory::nested_instance(self.identity_type(), self.descriptor(name)?)
    }

    fn map_key_type(&self, name: &str) -> Result<&'static TypeTag, AccessError> {
        let desc = self.descriptor(name)?;
        desc.declared_type()
            .map_key()
            .ok_or_else(|| AccessError::unsupported(self.identity_type(), desc.name(), "map_key_type"))
    }

    fn map_value_type(&self, name: &str) -> Result<&'static TypeTag, AccessError> {
        let desc = self.descriptor(name)?;
        desc.declared_type()
            .map_value()
            .ok_or_else(|| AccessError::unsupported(self.identity_type(), desc.name(), "map_value_type"))
    }

    /// Creates an empty map in the shell the property is declared with.
    fn create_map_container(&self, name: &str) -> Result<MapValue, AccessError> {
        factory::map_container(self.identity_type(), self.descriptor(name)?)
    }

    /// Creates a zero-state value instance for a map of objects.
    fn create_map_value_instance(&self, name: &str) -> Result<ObjectRef, AccessError> {
        factory::map_value_instance(self.identity_type(), self.descriptor(name)?)
    }

    /// Returns the single-scalar form of the instance, if the type has one.
    #[inline]
    fn scalar_form(&self) -> Option<Scalar> {
        None
    }

    /// Replaces the instance with the value converted from `scalar`.
    fn set_scalar_form(&mut self, scalar: Scalar) -> Result<(), AccessError> {
        let _ = scalar;
        Err(AccessError::unsupported(self.identity_type(), "self", "set_scalar_form"))
    }
}

impl dyn PropertyAccess {
    /// Returns `true` if the underlying value is a `T`.
    #[inline]
    pub fn is<T: PropertyAccess>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: PropertyAccess>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: PropertyAccess>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut()
    }
}
