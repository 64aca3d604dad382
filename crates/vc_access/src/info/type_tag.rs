use core::fmt;

use crate::factory::ObjectFactory;

// -----------------------------------------------------------------------------
// ScalarKind

/// The primitive leaf kinds a [`Scalar`](crate::Scalar) can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    /// Signed integers, stored as `i64`.
    Int,
    /// Unsigned integers, stored as `u64`.
    UInt,
    Float,
    Str,
}

impl ScalarKind {
    /// Returns a short lowercase name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::Str => "string",
        }
    }
}

impl fmt::Display for ScalarKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// MapShell

/// The map implementation a property is declared with.
///
/// Import always rebuilds a map inside the shell reported by the target,
/// so an `IndexMap` stays insertion ordered and a `BTreeMap` stays sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapShell {
    /// Insertion order is preserved, e.g. `IndexMap`.
    #[default]
    Ordered,
    /// Entries iterate in key order, e.g. `BTreeMap`.
    Sorted,
    /// Iteration order is unspecified, e.g. `HashMap`.
    Hashed,
}

impl MapShell {
    /// Returns `true` if iteration order carries information.
    #[inline]
    pub const fn is_order_preserving(self) -> bool {
        !matches!(self, Self::Hashed)
    }
}

// -----------------------------------------------------------------------------
// TypeIdent

/// Identity of a user type taking part in the protocol.
///
/// Two flags drive [classification](crate::kind::classify):
///
/// - a [factory](TypeIdent::factory) means the type satisfies the access
///   contract and can be manufactured in a zero state;
/// - a [scalar form](TypeIdent::scalar_form) means the type converts to and
///   from a single primitive value.
///
/// A type may have both. Scalar form wins.
///
/// Identities compare by [`type_path`](TypeIdent::type_path).
///
/// # Examples
///
/// ```
/// use vc_access::info::{ScalarKind, TypeIdent};
///
/// static IDENT: TypeIdent = TypeIdent::new("demo::Celsius", "Celsius")
///     .with_scalar_form(ScalarKind::Float);
///
/// assert_eq!(IDENT.type_name(), "Celsius");
/// assert!(!IDENT.is_contract());
/// ```
#[derive(Clone, Copy)]
pub struct TypeIdent {
    type_path: &'static str,
    type_name: &'static str,
    factory: Option<ObjectFactory>,
    scalar_form: Option<ScalarKind>,
}

impl TypeIdent {
    /// Creates an identity with neither a factory nor a scalar form.
    #[inline]
    pub const fn new(type_path: &'static str, type_name: &'static str) -> Self {
        Self {
            type_path,
            type_name,
            factory: None,
            scalar_form: None,
        }
    }

    /// Declares that the type satisfies the contract, manufactured by `factory`.
    #[inline]
    pub const fn with_factory(mut self, factory: ObjectFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Declares a two-way conversion to a single scalar of `kind`.
    #[inline]
    pub const fn with_scalar_form(mut self, kind: ScalarKind) -> Self {
        self.scalar_form = Some(kind);
        self
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub const fn factory(&self) -> Option<ObjectFactory> {
        self.factory
    }

    #[inline]
    pub const fn scalar_form(&self) -> Option<ScalarKind> {
        self.scalar_form
    }

    /// Returns `true` if the type satisfies the access contract.
    #[inline]
    pub const fn is_contract(&self) -> bool {
        self.factory.is_some()
    }
}

impl PartialEq for TypeIdent {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_path == other.type_path
    }
}

impl Eq for TypeIdent {}

impl fmt::Debug for TypeIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeIdent")
            .field("type_path", &self.type_path)
            .field("contract", &self.is_contract())
            .field("scalar_form", &self.scalar_form)
            .finish()
    }
}

impl fmt::Display for TypeIdent {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_path)
    }
}

// -----------------------------------------------------------------------------
// TypeTag

/// The declared semantic type of a property.
///
/// Tags are built once per type, when its [`TypeShape`](crate::info::TypeShape)
/// is first requested, and never change afterwards.
///
/// # Examples
///
/// ```
/// use vc_access::{Property, info::{ScalarKind, TypeTag}};
///
/// let tag = <Vec<Option<u8>> as Property>::type_tag();
/// assert_eq!(tag.to_string(), "list<optional<uint>>");
/// assert_eq!(tag.element(), Some(&TypeTag::Optional(Box::new(TypeTag::Scalar(ScalarKind::UInt)))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Scalar(ScalarKind),
    /// A user type; see [`TypeIdent`].
    Opaque(&'static TypeIdent),
    /// A nullable slot. Transparent for classification.
    Optional(Box<TypeTag>),
    /// An ordered sequence.
    List(Box<TypeTag>),
    /// A keyed map. Keys may be any scalar kind, not only strings.
    Map {
        shell: MapShell,
        key: Box<TypeTag>,
        value: Box<TypeTag>,
    },
}

impl TypeTag {
    /// Creates a list tag.
    #[inline]
    pub fn list(element: TypeTag) -> Self {
        Self::List(Box::new(element))
    }

    /// Creates a nullable tag.
    #[inline]
    pub fn optional(inner: TypeTag) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Creates a map tag.
    #[inline]
    pub fn map(shell: MapShell, key: TypeTag, value: TypeTag) -> Self {
        Self::Map {
            shell,
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Strips every [`Optional`](TypeTag::Optional) layer.
    pub fn non_optional(&self) -> &TypeTag {
        let mut tag = self;
        while let Self::Optional(inner) = tag {
            tag = inner;
        }
        tag
    }

    /// Returns `true` if the outermost layer accepts null.
    #[inline]
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns the element tag of a list, looking through optional layers.
    pub fn element(&self) -> Option<&TypeTag> {
        match self.non_optional() {
            Self::List(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the key tag of a map, looking through optional layers.
    pub fn map_key(&self) -> Option<&TypeTag> {
        match self.non_optional() {
            Self::Map { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Returns the value tag of a map, looking through optional layers.
    pub fn map_value(&self) -> Option<&TypeTag> {
        match self.non_optional() {
            Self::Map { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns the declared shell of a map, looking through optional layers.
    pub fn map_shell(&self) -> Option<MapShell> {
        match self.non_optional() {
            Self::Map { shell, .. } => Some(*shell),
            _ => None,
        }
    }

    /// Returns the scalar kind this tag converts to, if it is a leaf scalar.
    ///
    /// Opaque types answer with their declared scalar form.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.non_optional() {
            Self::Scalar(kind) => Some(*kind),
            Self::Opaque(ident) => ident.scalar_form(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Opaque(ident) => f.write_str(ident.type_name()),
            Self::Optional(inner) => write!(f, "optional<{inner}>"),
            Self::List(element) => write!(f, "list<{element}>"),
            Self::Map { key, value, .. } => write!(f, "map<{key}, {value}>"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{MapShell, ScalarKind, TypeIdent, TypeTag};

    static PLAIN: TypeIdent = TypeIdent::new("tests::Plain", "Plain");

    #[test]
    fn display() {
        let tag = TypeTag::map(
            MapShell::Sorted,
            TypeTag::Scalar(ScalarKind::Str),
            TypeTag::list(TypeTag::Opaque(&PLAIN)),
        );
        assert_eq!(tag.to_string(), "map<string, list<Plain>>");
    }

    #[test]
    fn accessors_look_through_optional() {
        let tag = TypeTag::optional(TypeTag::map(
            MapShell::Hashed,
            TypeTag::Scalar(ScalarKind::Int),
            TypeTag::Scalar(ScalarKind::Bool),
        ));
        assert_eq!(tag.map_shell(), Some(MapShell::Hashed));
        assert_eq!(tag.map_key(), Some(&TypeTag::Scalar(ScalarKind::Int)));
        assert_eq!(tag.map_value(), Some(&TypeTag::Scalar(ScalarKind::Bool)));
        assert_eq!(tag.element(), None);
    }

    #[test]
    fn ident_equality_uses_path() {
        static OTHER: TypeIdent =
            TypeIdent::new("tests::Plain", "Renamed").with_scalar_form(ScalarKind::Str);
        assert_eq!(PLAIN, OTHER);
        assert!(!PLAIN.is_contract());
        assert_eq!(OTHER.scalar_form(), Some(ScalarKind::Str));
    }
}
