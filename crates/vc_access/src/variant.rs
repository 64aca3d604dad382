//! Closed enums over a fixed set of contract types.
//!
//! A variant base is generated, never written by hand:
//!
//! - `#[access(variant_base = Name)]` on a derived struct generates a
//!   single-variant enum `Name`.
//! - [`variant_base!`](crate::derive::variant_base) generates one enum over
//!   several derived structs.
//!
//! The enum has no fields of its own and is not `#[non_exhaustive]`. Adding a
//! declaring type adds a variant, and every `match` without a wildcard arm
//! stops compiling until it handles the new shape.
//!
//! ```
//! use vc_access::derive::{PropertyAccess, variant_base};
//! use vc_access::variant::VariantBase;
//!
//! #[derive(PropertyAccess, Default, Clone)]
//! pub struct Circle { radius: f64 }
//!
//! #[derive(PropertyAccess, Default, Clone)]
//! pub struct Square { side: f64 }
//!
//! variant_base! {
//!     pub enum Shape { Circle, Square }
//! }
//!
//! fn area(shape: &Shape) -> f64 {
//!     match shape {
//!         Shape::Circle(c) => 3.0 * c.radius * c.radius,
//!         Shape::Square(s) => s.side * s.side,
//!     }
//! }
//!
//! let shape = Shape::from(Square { side: 2.0 });
//! assert_eq!(area(&shape), 4.0);
//! assert_eq!(shape.variant_name(), "Square");
//! assert_eq!(Shape::VARIANTS, ["Circle", "Square"]);
//! ```

use crate::access::PropertyAccess;

/// Implemented by generated variant bases.
///
/// The enum also implements [`PropertyAccess`] by delegating to the active
/// variant, so walkers treat it like the wrapped value.
pub trait VariantBase: PropertyAccess + Sized {
    /// The variant names, in declaration order.
    const VARIANTS: &'static [&'static str];

    fn variant_name(&self) -> &'static str;

    /// Returns the active variant as a contract object.
    fn as_variant(&self) -> &dyn PropertyAccess;

    fn as_variant_mut(&mut self) -> &mut dyn PropertyAccess;

    /// Creates the zero state of the variant whose type path is `type_path`.
    fn new_variant(type_path: &str) -> Option<Self>;
}

#[cfg(test)]
mod tests {
    use vc_access_derive::{PropertyAccess, variant_base};

    use super::VariantBase;
    use crate::walk::{self, Node};
    use crate::{PropertyAccess, Typed, Value};

    #[derive(PropertyAccess, Default, Clone, Debug, PartialEq)]
    #[access(variant_base = NoteBase)]
    pub struct Note {
        text: String,
    }

    #[derive(PropertyAccess, Default, Clone, Debug, PartialEq)]
    pub struct Task {
        title: String,
        done: bool,
    }

    variant_base! {
        #[derive(Debug)]
        pub enum Entry { Note, Task }
    }

    #[test]
    fn single_declaring_type() {
        let base = NoteBase::from(Note { text: "hi".into() });
        let NoteBase::Note(note) = &base;
        assert_eq!(note.text, "hi");
        assert_eq!(NoteBase::VARIANTS, ["Note"]);
    }

    #[test]
    fn delegates_to_active_variant() {
        let mut entry = Entry::from(Task::default());
        assert_eq!(entry.variant_name(), "Task");
        assert_eq!(entry.property_names().collect::<Vec<_>>(), ["title", "done"]);

        entry.set_property("done", Value::from(true)).unwrap();
        assert!(entry.as_variant().downcast_ref::<Task>().unwrap().done);
        assert_eq!(entry.identity_type(), Task::type_ident());

        let node = walk::export(&entry).unwrap();
        assert_eq!(node.get("done"), Some(&Node::scalar(true)));
    }

    #[test]
    fn conversions() {
        let entry = Entry::from(Note { text: "a".into() });
        let entry = Task::try_from(entry).unwrap_err();
        assert_eq!(Note::try_from(entry).unwrap().text, "a");

        let fresh = Entry::new_variant(Task::type_ident().type_path()).unwrap();
        assert!(matches!(fresh, Entry::Task(_)));
        assert!(Entry::new_variant("nope").is_none());
    }
}
