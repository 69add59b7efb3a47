//! Identity helpers for lists of shared trait objects.
//!
//! Registrations are compared by instance, never by value: two observers
//! with the same name are still distinct listeners.

use std::rc::Rc;

/// `true` if both handles point at the same instance.
#[must_use]
pub fn same_instance<T: ?Sized>(a: &Rc<T>, b: &Rc<T>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// `true` if `item` is already in `list`.
#[must_use]
pub fn contains_instance<T: ?Sized>(list: &[Rc<T>], item: &Rc<T>) -> bool {
    list.iter().any(|entry| same_instance(entry, item))
}

/// Removes the first occurrence of `item` from `list`. Returns `false` when
/// it was not present.
pub fn remove_instance<T: ?Sized>(list: &mut Vec<Rc<T>>, item: &Rc<T>) -> bool {
    match list.iter().position(|entry| same_instance(entry, item)) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}
