//! Container-kind classification.
//!
//! Every property falls into exactly one [`ContainerKind`]. The kind is
//! computed from the declared [`TypeTag`] once, when the descriptor table of
//! a type is built, and is constant afterwards.

use core::fmt;

use thiserror::Error;

use crate::info::{TypeIdent, TypeTag};

// -----------------------------------------------------------------------------
// ContainerKind

/// The structural category of a property.
///
/// | kind             | declared type                                  |
/// |------------------|------------------------------------------------|
/// | `Scalar`         | primitive, or user type with a scalar form     |
/// | `NestedObject`   | user type satisfying the access contract       |
/// | `ListOfScalar`   | sequence of scalars                            |
/// | `ListOfObject`   | sequence of contract types                     |
/// | `MapScalarValue` | map whose values are scalars                   |
/// | `MapObjectValue` | map whose values are contract types            |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Scalar,
    NestedObject,
    ListOfScalar,
    ListOfObject,
    MapScalarValue,
    MapObjectValue,
}

impl ContainerKind {
    #[inline]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::ListOfScalar | Self::ListOfObject)
    }

    #[inline]
    pub const fn is_map(self) -> bool {
        matches!(self, Self::MapScalarValue | Self::MapObjectValue)
    }

    /// Returns `true` if the factory can produce an instance for this kind.
    #[inline]
    pub const fn produces_objects(self) -> bool {
        matches!(
            self,
            Self::NestedObject | Self::ListOfObject | Self::MapObjectValue
        )
    }

    /// Returns the kind of a single element, value or leaf.
    ///
    /// The result is either `Scalar` or `NestedObject`.
    #[inline]
    pub const fn element_kind(self) -> Self {
        match self {
            Self::Scalar | Self::ListOfScalar | Self::MapScalarValue => Self::Scalar,
            Self::NestedObject | Self::ListOfObject | Self::MapObjectValue => Self::NestedObject,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "Scalar",
            Self::NestedObject => "NestedObject",
            Self::ListOfScalar => "ListOfScalar",
            Self::ListOfObject => "ListOfObject",
            Self::MapScalarValue => "MapScalarValue",
            Self::MapObjectValue => "MapObjectValue",
        }
    }
}

impl fmt::Display for ContainerKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// ClassifyError

/// A declared type that none of the classification rules accept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClassifyError {
    #[error("`{0}` neither declares a scalar form nor satisfies the access contract")]
    NotAccessible(&'static str),

    #[error("list element `{0}` must be a scalar or an object")]
    NestedList(TypeTag),

    #[error("map value `{0}` must be a scalar or an object")]
    NestedMap(TypeTag),

    #[error("map key `{0}` must be a scalar")]
    InvalidKey(TypeTag),
}

// -----------------------------------------------------------------------------
// classify

/// Returns the kind of a non-container tag: `Scalar` or `NestedObject`.
///
/// A type declaring a scalar form is a scalar even if it also satisfies
/// the contract. Containers yield `None`.
fn leaf_kind(tag: &TypeTag) -> Option<Result<ContainerKind, ClassifyError>> {
    match tag {
        TypeTag::Optional(inner) => leaf_kind(inner),
        TypeTag::Scalar(_) => Some(Ok(ContainerKind::Scalar)),
        TypeTag::Opaque(ident) => Some(opaque_kind(ident)),
        TypeTag::List(_) | TypeTag::Map { .. } => None,
    }
}

fn opaque_kind(ident: &TypeIdent) -> Result<ContainerKind, ClassifyError> {
    if ident.scalar_form().is_some() {
        Ok(ContainerKind::Scalar)
    } else if ident.is_contract() {
        Ok(ContainerKind::NestedObject)
    } else {
        Err(ClassifyError::NotAccessible(ident.type_path()))
    }
}

/// Classifies a declared type.
///
/// Rules, first match wins. Optional layers are transparent.
///
/// 1. a primitive, or a user type declaring a scalar form, is `Scalar`;
/// 2. a user type satisfying the contract is `NestedObject`;
/// 3. a sequence is `ListOfScalar` or `ListOfObject` by its element;
/// 4. a map is `MapScalarValue` or `MapObjectValue` by its value.
///
/// Containers of containers are rejected.
///
/// # Examples
///
/// ```
/// use vc_access::{ContainerKind, Property, kind::classify};
/// use indexmap::IndexMap;
///
/// let tag = <IndexMap<u32, Option<String>> as Property>::type_tag();
/// assert_eq!(classify(&tag), Ok(ContainerKind::MapScalarValue));
/// ```
pub fn classify(tag: &TypeTag) -> Result<ContainerKind, ClassifyError> {
    match tag {
        TypeTag::Optional(inner) => classify(inner),
        TypeTag::Scalar(_) => Ok(ContainerKind::Scalar),
        TypeTag::Opaque(ident) => opaque_kind(ident),
        TypeTag::List(element) => match leaf_kind(element) {
            Some(Ok(ContainerKind::Scalar)) => Ok(ContainerKind::ListOfScalar),
            Some(Ok(_)) => Ok(ContainerKind::ListOfObject),
            Some(Err(err)) => Err(err),
            None => Err(ClassifyError::NestedList((**element).clone())),
        },
        TypeTag::Map { key, value, .. } => {
            if key.scalar_kind().is_none() {
                return Err(ClassifyError::InvalidKey((**key).clone()));
            }
            match leaf_kind(value) {
                Some(Ok(ContainerKind::Scalar)) => Ok(ContainerKind::MapScalarValue),
                Some(Ok(_)) => Ok(ContainerKind::MapObjectValue),
                Some(Err(err)) => Err(err),
                None => Err(ClassifyError::NestedMap((**value).clone())),
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use vc_access_derive::PropertyAccess;

    use super::{ClassifyError, ContainerKind, classify};
    use crate::ObjectRef;
    use crate::info::{MapShell, ScalarKind, TypeIdent, TypeTag};

    #[derive(PropertyAccess, Default, Clone)]
    struct Empty {}

    fn unit_object_factory() -> ObjectRef {
        ObjectRef::new(Empty::default())
    }

    static CONTRACT: TypeIdent =
        TypeIdent::new("tests::Contract", "Contract").with_factory(unit_object_factory);
    static SCALAR_ONLY: TypeIdent =
        TypeIdent::new("tests::Celsius", "Celsius").with_scalar_form(ScalarKind::Float);
    static BOTH: TypeIdent = TypeIdent::new("tests::Both", "Both")
        .with_factory(unit_object_factory)
        .with_scalar_form(ScalarKind::Str);
    static NEITHER: TypeIdent = TypeIdent::new("tests::Opaque", "Opaque");

    fn str_tag() -> TypeTag {
        TypeTag::Scalar(ScalarKind::Str)
    }

    #[test]
    fn leaves() {
        assert_eq!(classify(&TypeTag::Scalar(ScalarKind::Bool)), Ok(ContainerKind::Scalar));
        assert_eq!(classify(&TypeTag::Opaque(&SCALAR_ONLY)), Ok(ContainerKind::Scalar));
        assert_eq!(classify(&TypeTag::Opaque(&CONTRACT)), Ok(ContainerKind::NestedObject));
        assert_eq!(
            classify(&TypeTag::Opaque(&NEITHER)),
            Err(ClassifyError::NotAccessible("tests::Opaque"))
        );
    }

    #[test]
    fn scalar_form_takes_precedence() {
        assert_eq!(classify(&TypeTag::Opaque(&BOTH)), Ok(ContainerKind::Scalar));
        assert_eq!(
            classify(&TypeTag::list(TypeTag::Opaque(&BOTH))),
            Ok(ContainerKind::ListOfScalar)
        );
    }

    #[test]
    fn optional_is_transparent() {
        let tag = TypeTag::optional(TypeTag::list(TypeTag::optional(TypeTag::Opaque(&CONTRACT))));
        assert_eq!(classify(&tag), Ok(ContainerKind::ListOfObject));
    }

    #[test]
    fn maps_classify_by_value() {
        let scalar = TypeTag::map(MapShell::Sorted, TypeTag::Scalar(ScalarKind::Int), str_tag());
        let object = TypeTag::map(MapShell::Hashed, str_tag(), TypeTag::Opaque(&CONTRACT));
        assert_eq!(classify(&scalar), Ok(ContainerKind::MapScalarValue));
        assert_eq!(classify(&object), Ok(ContainerKind::MapObjectValue));
    }

    #[test]
    fn rejected_shapes() {
        let bad_key = TypeTag::map(MapShell::Ordered, TypeTag::Opaque(&CONTRACT), str_tag());
        assert!(matches!(classify(&bad_key), Err(ClassifyError::InvalidKey(_))));

        let list_of_lists = TypeTag::list(TypeTag::list(str_tag()));
        assert!(matches!(classify(&list_of_lists), Err(ClassifyError::NestedList(_))));

        let list_of_opaque = TypeTag::list(TypeTag::Opaque(&NEITHER));
        assert!(matches!(classify(&list_of_opaque), Err(ClassifyError::NotAccessible(_))));
    }

    #[test]
    fn element_kind() {
        assert_eq!(ContainerKind::ListOfObject.element_kind(), ContainerKind::NestedObject);
        assert_eq!(ContainerKind::MapScalarValue.element_kind(), ContainerKind::Scalar);
        assert!(ContainerKind::MapObjectValue.produces_objects());
        assert!(!ContainerKind::ListOfScalar.produces_objects());
    }
}
