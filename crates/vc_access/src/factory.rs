//! Factory resolution: fresh nested instances and map shells on demand.
//!
//! Factories are recorded on the [`TypeIdent`] of each contract type, so
//! resolution is a walk over the declared [`TypeTag`] down to its leaf.

use crate::access::AccessError;
use crate::info::{PropertyDescriptor, TypeIdent, TypeTag};
use crate::kind::ContainerKind;
use crate::value::{MapValue, ObjectRef};

/// Creates a zero-state instance of one contract type.
pub type ObjectFactory = fn() -> ObjectRef;

/// Returns the factory of the object a tag ultimately holds.
///
/// Looks through optional layers, list elements and map values.
pub fn resolve_factory(tag: &TypeTag) -> Option<ObjectFactory> {
    leaf_ident(tag).and_then(TypeIdent::factory)
}

fn leaf_ident(tag: &TypeTag) -> Option<&'static TypeIdent> {
    match tag {
        TypeTag::Scalar(_) => None,
        TypeTag::Opaque(ident) => Some(*ident),
        TypeTag::Optional(inner) | TypeTag::List(inner) => leaf_ident(inner),
        TypeTag::Map { value, .. } => leaf_ident(value),
    }
}

/// Creates a zero-state instance of the type behind `ident`.
#[inline]
pub fn new_instance(ident: &TypeIdent) -> Option<ObjectRef> {
    ident.factory().map(|factory| factory())
}

/// Backs [`PropertyAccess::create_nested_instance`](crate::PropertyAccess::create_nested_instance).
pub fn nested_instance(
    owner: &TypeIdent,
    desc: &PropertyDescriptor,
) -> Result<ObjectRef, AccessError> {
    if !desc.kind().produces_objects() {
        return Err(AccessError::unsupported(owner, desc.name(), "create_nested_instance"));
    }
    create(owner, desc, "create_nested_instance")
}

/// Backs [`PropertyAccess::create_map_container`](crate::PropertyAccess::create_map_container).
pub fn map_container(owner: &TypeIdent, desc: &PropertyDescriptor) -> Result<MapValue, AccessError> {
    match desc.declared_type().map_shell() {
        Some(shell) => Ok(MapValue::new(shell)),
        None => Err(AccessError::unsupported(owner, desc.name(), "create_map_container")),
    }
}

/// Backs [`PropertyAccess::create_map_value_instance`](crate::PropertyAccess::create_map_value_instance).
pub fn map_value_instance(
    owner: &TypeIdent,
    desc: &PropertyDescriptor,
) -> Result<ObjectRef, AccessError> {
    if desc.kind() != ContainerKind::MapObjectValue {
        return Err(AccessError::unsupported(owner, desc.name(), "create_map_value_instance"));
    }
    create(owner, desc, "create_map_value_instance")
}

fn create(
    owner: &TypeIdent,
    desc: &PropertyDescriptor,
    operation: &'static str,
) -> Result<ObjectRef, AccessError> {
    match leaf_ident(desc.declared_type()) {
        Some(object) => match object.factory() {
            Some(factory) => Ok(factory()),
            None => Err(AccessError::no_factory(owner, desc.name(), object)),
        },
        None => Err(AccessError::unsupported(owner, desc.name(), operation)),
    }
}

#[cfg(test)]
mod tests {
    use vc_access_derive::PropertyAccess;

    use indexmap::IndexMap;

    use crate::access::AccessError;
    use crate::info::MapShell;
    use crate::{PropertyAccess, Typed};

    #[derive(PropertyAccess, Default, Clone)]
    struct Leaf {
        id: u32,
    }

    #[derive(PropertyAccess, Default, Clone)]
    struct Owner {
        count: i32,
        leaf: Option<Leaf>,
        leaves: Vec<Leaf>,
        by_name: IndexMap<String, Leaf>,
        labels: IndexMap<String, String>,
    }

    #[test]
    fn nested_instances() {
        let owner = Owner::default();
        for name in ["leaf", "leaves", "by_name"] {
            let object = owner.create_nested_instance(name).unwrap();
            assert!(object.is::<Leaf>(), "{name}");
        }
        assert!(owner.create_map_value_instance("by_name").unwrap().is::<Leaf>());
    }

    #[test]
    fn unsupported_operations_fail() {
        let owner = Owner::default();
        assert!(matches!(
            owner.create_nested_instance("count"),
            Err(AccessError::UnsupportedOperation { name: "count", .. })
        ));
        assert!(matches!(
            owner.create_nested_instance("labels"),
            Err(AccessError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            owner.create_map_value_instance("leaves"),
            Err(AccessError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            owner.create_map_container("leaf"),
            Err(AccessError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            owner.create_nested_instance("missing"),
            Err(AccessError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn map_containers_carry_shell() {
        let owner = Owner::default();
        let map = owner.create_map_container("labels").unwrap();
        assert_eq!(map.shell(), MapShell::Ordered);
        assert!(map.is_empty());
        assert!(super::new_instance(Leaf::type_ident()).unwrap().is::<Leaf>());
    }
}
