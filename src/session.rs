/// Shared handle to page state that async storage tasks update in place
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Cloned handles point at the same state
///
/// Borrows are only taken between awaits, never across them, so an event
/// handler can always read or update the state while a write is in flight.
#[derive(Debug, Default)]
pub struct Session<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Session<T> {
    fn clone(&self) -> Self {
        Session { inner: Rc::clone(&self.inner) }
    }
}

impl<T> PartialEq for Session<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Session<T> {
    pub fn new(state: T) -> Self {
        Session { inner: Rc::new(RefCell::new(state)) }
    }

    pub fn state(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }
}
