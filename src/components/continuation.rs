//! # Single-shot continuation callback.
//!
//! Asynchrony in this runtime is a calling convention, not a scheduler: a
//! hook or handler that wants to defer holds on to a [`Continuation`] and
//! resolves it later from ordinary control flow.
//!
//! Two places hand these out:
//! - the start hook receives one and resolves it when initialization is done;
//! - `fire` passes one per mediator notification, so a vetoing peer can run
//!   the deferred default action once its own in-flight work settles.
//!
//! A continuation is cheap to clone; all clones share the same single-shot
//! slot, so the underlying callback runs at most once no matter how many
//! holders resolve.

use std::cell::RefCell;
use std::rc::Rc;

/// Cloneable, single-shot completion callback.
///
/// # Example
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use componentry::Continuation;
///
/// let hits = Rc::new(Cell::new(0));
/// let counted = Rc::clone(&hits);
/// let done = Continuation::new(move || counted.set(counted.get() + 1));
///
/// let held = done.clone();
/// done.resolve();
/// held.resolve(); // second resolution is a no-op
/// assert_eq!(hits.get(), 1);
/// assert!(held.is_resolved());
/// ```
#[derive(Clone)]
pub struct Continuation {
    slot: Rc<RefCell<Option<Box<dyn FnOnce()>>>>,
}

impl Continuation {
    /// Wraps a callback into a single-shot continuation.
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(Box::new(callback)))),
        }
    }

    /// Runs the callback if it has not run yet.
    ///
    /// The callback is taken out of the shared slot before it is invoked, so
    /// reentrant resolution from inside the callback is a no-op.
    pub fn resolve(&self) {
        let callback = self.slot.borrow_mut().take();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Returns true once the callback has been consumed.
    pub fn is_resolved(&self) -> bool {
        self.slot.borrow().is_none()
    }
}

impl std::fmt::Debug for Continuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Continuation")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
