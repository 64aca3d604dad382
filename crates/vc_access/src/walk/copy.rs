use crate::access::{AccessError, PropertyAccess};
use crate::access::path::PropertyPath;
use crate::factory;
use crate::value::ObjectRef;
use crate::walk::export::Exporter;
use crate::walk::import::Importer;
use crate::walk::{WalkConfig, WalkError};

/// Exports `root` and imports the tree into a fresh instance of the same type.
///
/// Nested objects, list elements and map values of the copy are all new
/// instances. Shared references in the source are duplicated, not shared.
pub(super) fn deep_copy(
    config: &WalkConfig,
    root: &dyn PropertyAccess,
) -> Result<ObjectRef, WalkError> {
    let node = Exporter::new(config).export_root(root)?;

    let ident = root.identity_type();
    let Some(copy) = factory::new_instance(ident) else {
        return Err(WalkError::Access {
            path: PropertyPath::root(),
            source: AccessError::no_factory(ident, "self", ident),
        });
    };
    let Ok(mut guard) = copy.try_borrow_mut() else {
        return Err(WalkError::ObjectBusy {
            path: PropertyPath::root(),
        });
    };
    let result = Importer::new(config).import_root(&node, &mut *guard);
    drop(guard);

    result.map(|()| copy)
}

/// Same as [`deep_copy`], but imports into `T::default()`.
pub(super) fn deep_copy_typed<T: PropertyAccess + Default>(
    config: &WalkConfig,
    root: &T,
) -> Result<T, WalkError> {
    let node = Exporter::new(config).export_root(root)?;
    let mut copy = T::default();
    Importer::new(config).import_root(&node, &mut copy)?;
    Ok(copy)
}

#[cfg(test)]
mod tests {
    use crate::access::{AccessError, PropertyAccess};
    use crate::info::{PropertyDescriptor, ShapeCell, TypeIdent, TypeShape};
    use crate::value::Value;
    use crate::walk::{self, WalkError};

    /// A hand-written type that registers no factory.
    struct Handle;

    static IDENT: TypeIdent = TypeIdent::new("tests::Handle", "Handle");

    impl PropertyAccess for Handle {
        fn shape(&self) -> &'static TypeShape {
            static CELL: ShapeCell = ShapeCell::new();
            CELL.get_or_init(|| TypeShape::new(&IDENT, Vec::<PropertyDescriptor>::new()))
        }

        fn get_property(&self, name: &str) -> Result<Value, AccessError> {
            Err(AccessError::unknown(&IDENT, name))
        }

        fn set_property(&mut self, name: &str, _: Value) -> Result<(), AccessError> {
            Err(AccessError::unknown(&IDENT, name))
        }
    }

    #[test]
    fn copy_without_factory() {
        let err = walk::deep_copy(&Handle).unwrap_err();
        match err {
            WalkError::Access { source, .. } => assert_eq!(
                source,
                AccessError::NoFactory {
                    type_path: "tests::Handle",
                    name: "self",
                    object_type: "tests::Handle",
                }
            ),
            other => panic!("unexpected error: {other}"),
        }
    }
}
