use alloc::rc::Rc;
use core::any::Any;
use core::cell::{BorrowError, BorrowMutError, Ref, RefCell, RefMut};
use core::fmt;

use crate::PropertyAccess;

/// A shared, dynamically typed handle to an instance satisfying the
/// access contract.
///
/// Cloning the handle does not clone the instance. Two handles are equal
/// when they point at the same instance.
///
/// The handle can be turned back into the concrete [`Shared`](crate::Shared)
/// pointer with [`downcast`](ObjectRef::downcast), which is how
/// [`Shared<T>`](crate::Shared) properties keep their identity across
/// `get_property` / `set_property`.
#[derive(Clone)]
pub struct ObjectRef {
    cell: Rc<dyn Any>,
    access: Rc<RefCell<dyn PropertyAccess>>,
}

impl ObjectRef {
    /// Wraps a fresh instance.
    #[inline]
    pub fn new<T: PropertyAccess>(value: T) -> Self {
        Self::from_shared(Rc::new(RefCell::new(value)))
    }

    /// Wraps an existing shared instance without copying it.
    #[inline]
    pub fn from_shared<T: PropertyAccess>(shared: Rc<RefCell<T>>) -> Self {
        let access: Rc<RefCell<dyn PropertyAccess>> = shared.clone();
        Self {
            cell: shared,
            access,
        }
    }

    /// Returns the shared instance if it is a `T`.
    #[inline]
    pub fn downcast<T: PropertyAccess>(&self) -> Option<Rc<RefCell<T>>> {
        Rc::clone(&self.cell).downcast::<RefCell<T>>().ok()
    }

    /// Returns `true` if the instance is a `T`.
    #[inline]
    pub fn is<T: PropertyAccess>(&self) -> bool {
        self.cell.is::<RefCell<T>>()
    }

    #[inline]
    pub fn try_borrow(&self) -> Result<Ref<'_, dyn PropertyAccess>, BorrowError> {
        self.access.try_borrow()
    }

    #[inline]
    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, dyn PropertyAccess>, BorrowMutError> {
        self.access.try_borrow_mut()
    }

    /// Returns the address of the instance.
    ///
    /// Equal to the address of the `&dyn PropertyAccess` obtained by
    /// borrowing, so a borrowed root and a handle to it compare equal.
    #[inline]
    pub fn identity(&self) -> usize {
        self.access.as_ptr() as *const () as usize
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl PartialEq for ObjectRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ObjectRef");
        s.field("identity", &format_args!("{:#x}", self.identity()));
        match self.access.try_borrow() {
            Ok(object) => s.field("type_path", &object.identity_type().type_path()),
            Err(_) => s.field("type_path", &"<borrowed>"),
        };
        s.finish()
    }
}

/// Address of a borrowed instance, comparable with [`ObjectRef::identity`].
#[inline]
pub(crate) fn identity_of(object: &dyn PropertyAccess) -> usize {
    object as *const dyn PropertyAccess as *const () as usize
}
