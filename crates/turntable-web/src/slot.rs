// Shared late-bound callback storage. Pure so it can be tested on the host.

use std::cell::RefCell;
use std::rc::Rc;

/// One optional callback shared between the player and its background tasks.
/// Tasks read it when they need it, so a callback set after a task started is
/// still seen.
pub struct CallbackSlot<F>(Rc<RefCell<Option<F>>>);

impl<F> Clone for CallbackSlot<F> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<F> Default for CallbackSlot<F> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }
}

impl<F: Clone> CallbackSlot<F> {
    pub fn set(&self, callback: F) {
        *self.0.borrow_mut() = Some(callback);
    }

    /// Current callback, cloned out so no borrow outlives the call.
    pub fn get(&self) -> Option<F> {
        self.0.borrow().clone()
    }
}
