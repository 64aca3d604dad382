use core::{fmt, slice};

use foldhash::fast::FixedState;
use hashbrown::HashMap;

use crate::Property;
use crate::info::{TypeIdent, TypeTag};
use crate::kind::{ClassifyError, ContainerKind, classify};

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// A property name and its declared [`TypeTag`].
///
/// The [`ContainerKind`] is derived from the tag when the descriptor is
/// created, so the two can never disagree.
///
/// # Examples
///
/// ```
/// use vc_access::{ContainerKind, info::PropertyDescriptor};
///
/// let desc = PropertyDescriptor::of::<Vec<String>>("tags");
/// assert_eq!(desc.name(), "tags");
/// assert_eq!(desc.kind(), ContainerKind::ListOfScalar);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: &'static str,
    declared_type: TypeTag,
    kind: ContainerKind,
}

impl PropertyDescriptor {
    /// Creates a descriptor, classifying `declared_type`.
    pub fn new(name: &'static str, declared_type: TypeTag) -> Result<Self, ClassifyError> {
        let kind = classify(&declared_type)?;
        Ok(Self {
            name,
            declared_type,
            kind,
        })
    }

    /// Creates a descriptor for a field of type `T`.
    ///
    /// # Panics
    ///
    /// Panics if the tag of `T` cannot be classified. The [`Property`]
    /// implementations of this crate only nest [`Element`](crate::property::Element)s
    /// inside containers, so this only happens with a hand-written `type_tag`.
    pub fn of<T: Property>(name: &'static str) -> Self {
        match Self::new(name, T::type_tag()) {
            Ok(desc) => desc,
            Err(err) => panic!("property `{name}`: {err}"),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn declared_type(&self) -> &TypeTag {
        &self.declared_type
    }

    #[inline]
    pub const fn kind(&self) -> ContainerKind {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// TypeShape

/// The ordered descriptor table of one type.
///
/// Order equals declaration order. Lookup by name is O(1).
pub struct TypeShape {
    ident: &'static TypeIdent,
    properties: Box<[PropertyDescriptor]>,
    indices: HashMap<&'static str, usize, FixedState>,
}

impl TypeShape {
    /// Creates a shape from descriptors in declaration order.
    ///
    /// # Panics
    ///
    /// Panics if two descriptors share a name.
    pub fn new(ident: &'static TypeIdent, properties: impl Into<Box<[PropertyDescriptor]>>) -> Self {
        let properties: Box<[PropertyDescriptor]> = properties.into();
        let mut indices = HashMap::with_capacity_and_hasher(properties.len(), FixedState::default());
        for (index, desc) in properties.iter().enumerate() {
            if indices.insert(desc.name(), index).is_some() {
                panic!("duplicate property `{}` in `{}`", desc.name(), ident.type_path());
            }
        }
        Self {
            ident,
            properties,
            indices,
        }
    }

    #[inline]
    pub const fn ident(&self) -> &'static TypeIdent {
        self.ident
    }

    /// Returns the descriptor of `name`.
    #[inline]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.indices.get(name).map(|&index| &self.properties[index])
    }

    #[inline]
    pub fn property_at(&self, index: usize) -> Option<&PropertyDescriptor> {
        self.properties.get(index)
    }

    /// Returns the declaration index of `name`.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, PropertyDescriptor> {
        self.properties.iter()
    }

    /// Returns the property names in declaration order.
    #[inline]
    pub fn names(&self) -> PropertyNames<'_> {
        PropertyNames {
            inner: self.properties.iter(),
        }
    }
}

impl fmt::Debug for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeShape")
            .field("ident", &self.ident.type_path())
            .field("properties", &self.properties)
            .finish()
    }
}

impl<'a> IntoIterator for &'a TypeShape {
    type Item = &'a PropertyDescriptor;
    type IntoIter = slice::Iter<'a, PropertyDescriptor>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

// -----------------------------------------------------------------------------
// PropertyNames

/// Iterator over property names in declaration order.
#[derive(Clone)]
pub struct PropertyNames<'a> {
    inner: slice::Iter<'a, PropertyDescriptor>,
}

impl Iterator for PropertyNames<'_> {
    type Item = &'static str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(PropertyDescriptor::name)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for PropertyNames<'_> {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{PropertyDescriptor, TypeShape};
    use crate::ContainerKind;
    use crate::info::{MapShell, ScalarKind, TypeIdent, TypeTag};

    static IDENT: TypeIdent = TypeIdent::new("tests::Row", "Row");

    #[test]
    fn names_keep_declaration_order() {
        let shape = TypeShape::new(
            &IDENT,
            [
                PropertyDescriptor::of::<u32>("zeta"),
                PropertyDescriptor::of::<String>("alpha"),
                PropertyDescriptor::of::<bool>("mid"),
            ],
        );
        assert_eq!(shape.names().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
        assert_eq!(shape.index_of("alpha"), Some(1));
        assert_eq!(shape.property("mid").map(|d| d.kind()), Some(ContainerKind::Scalar));
        assert!(shape.property("missing").is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate property `a`")]
    fn duplicate_names_panic() {
        TypeShape::new(
            &IDENT,
            [PropertyDescriptor::of::<u32>("a"), PropertyDescriptor::of::<u64>("a")],
        );
    }

    #[test]
    fn unclassifiable_tag_is_rejected() {
        let nested = TypeTag::list(TypeTag::list(TypeTag::Scalar(ScalarKind::Int)));
        assert!(PropertyDescriptor::new("grid", nested).is_err());

        let map_of_maps = TypeTag::map(
            MapShell::Ordered,
            TypeTag::Scalar(ScalarKind::Str),
            TypeTag::map(
                MapShell::Ordered,
                TypeTag::Scalar(ScalarKind::Str),
                TypeTag::Scalar(ScalarKind::Str),
            ),
        );
        assert!(PropertyDescriptor::new("nested", map_of_maps).is_err());
    }
}
