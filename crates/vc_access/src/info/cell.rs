use std::sync::OnceLock;

use crate::info::TypeShape;

/// Lazy static storage for the [`TypeShape`] of a non-generic type.
///
/// This is what `#[derive(PropertyAccess)]` uses to implement
/// [`Typed::type_shape`](crate::Typed::type_shape). Hand-written
/// implementations do the same:
///
/// ```
/// use vc_access::info::{PropertyDescriptor, ShapeCell, TypeIdent, TypeShape};
///
/// struct Pair { left: i32, right: i32 }
///
/// fn pair_shape() -> &'static TypeShape {
///     static IDENT: TypeIdent = TypeIdent::new("demo::Pair", "Pair");
///     static CELL: ShapeCell = ShapeCell::new();
///     CELL.get_or_init(|| {
///         TypeShape::new(&IDENT, [
///             PropertyDescriptor::of::<i32>("left"),
///             PropertyDescriptor::of::<i32>("right"),
///         ])
///     })
/// }
///
/// assert_eq!(pair_shape().len(), 2);
/// assert!(core::ptr::eq(pair_shape(), pair_shape()));
/// ```
///
/// The `static CELL` inside a generic function would be shared by every
/// instantiation, which is why the derive macro rejects generic types.
pub struct ShapeCell(OnceLock<TypeShape>);

impl ShapeCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored shape, building it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeShape
    where
        F: FnOnce() -> TypeShape,
    {
        self.0.get_or_init(f)
    }
}
