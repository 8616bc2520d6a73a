//! # Skins - behavior decoration.
//!
//! A skin specializes a component without touching its base implementation.
//! [`Skin`] mirrors every [`Behavior`] method, with one extra parameter: the
//! wrapped behavior. Every skin method defaults to plain delegation, so a
//! skin only overrides the hooks it changes, and an override can still reach
//! into the wrapped implementation explicitly (the `base` argument plays the
//! role a `_super` call plays in prototype chains).
//!
//! Skins compose: the registry applies them in descriptor order, wrapping
//! each result in the next, so the *last* skin listed is the outermost and
//! its overrides win unless it defers to `base`.
//!
//! Decoration never changes identity. The `Component` struct is what the
//! registry, mediators, and barrier hold; only its behavior slot carries the
//! decoration chain.
//!
//! ## Example
//! ```
//! use componentry::{Behavior, Context, Continuation, Skin};
//!
//! struct Submarine;
//!
//! impl Skin for Submarine {
//!     fn on_start(&self, base: &dyn Behavior, cx: &Context, ready: &Continuation) {
//!         // dive first, then run whatever the base start does
//!         base.on_start(cx, ready);
//!     }
//! }
//! ```

use std::rc::Rc;

use crate::components::{Behavior, Continuation, Payload, Reply};
use crate::core::Context;
use crate::error::Error;

/// # Selective behavior override.
///
/// Each method receives the wrapped behavior and defaults to delegating to
/// it unchanged.
pub trait Skin: 'static {
    /// Start hook override. Defaults to the wrapped behavior's hook.
    fn on_start(&self, base: &dyn Behavior, cx: &Context, ready: &Continuation) {
        base.on_start(cx, ready);
    }

    /// After hook override. Defaults to the wrapped behavior's hook.
    fn after_start(&self, base: &dyn Behavior, cx: &Context) {
        base.after_start(cx);
    }

    /// Stop hook override. Defaults to the wrapped behavior's hook.
    fn on_stop(&self, base: &dyn Behavior, cx: &Context) {
        base.on_stop(cx);
    }

    /// Notification handler override. Defaults to the wrapped behavior's
    /// handler.
    fn handle(
        &self,
        base: &dyn Behavior,
        cx: &Context,
        event: &str,
        payload: &Payload,
        completion: Option<&Continuation>,
    ) -> Result<Reply, Error> {
        base.handle(cx, event, payload, completion)
    }
}

/// Wrapper produced by decoration: routes every behavior call through the
/// skin, which in turn decides whether to delegate.
struct Decorated {
    skin: Box<dyn Skin>,
    base: Rc<dyn Behavior>,
}

impl Behavior for Decorated {
    fn on_start(&self, cx: &Context, ready: &Continuation) {
        self.skin.on_start(&*self.base, cx, ready);
    }

    fn after_start(&self, cx: &Context) {
        self.skin.after_start(&*self.base, cx);
    }

    fn on_stop(&self, cx: &Context) {
        self.skin.on_stop(&*self.base, cx);
    }

    fn handle(
        &self,
        cx: &Context,
        event: &str,
        payload: &Payload,
        completion: Option<&Continuation>,
    ) -> Result<Reply, Error> {
        self.skin.handle(&*self.base, cx, event, payload, completion)
    }
}

/// Wraps `base` in `skin`, producing the decorated behavior.
pub(crate) fn decorate(base: Rc<dyn Behavior>, skin: Box<dyn Skin>) -> Rc<dyn Behavior> {
    Rc::new(Decorated { skin, base })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::core::Registry;

    struct Base {
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Behavior for Base {
        fn after_start(&self, _cx: &Context) {
            self.log.borrow_mut().push("base.after_start");
        }

        fn on_stop(&self, _cx: &Context) {
            self.log.borrow_mut().push("base.on_stop");
        }
    }

    struct Loud {
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Skin for Loud {
        fn on_stop(&self, base: &dyn Behavior, cx: &Context) {
            self.log.borrow_mut().push("loud.on_stop");
            base.on_stop(cx);
        }
    }

    struct Mute;

    impl Skin for Mute {
        fn on_stop(&self, _base: &dyn Behavior, _cx: &Context) {
            // swallow the stop hook entirely
        }
    }

    fn test_context() -> (Registry, Context) {
        let registry = Registry::builder().build();
        let cx = registry.context();
        (registry, cx)
    }

    #[test]
    fn test_overridden_method_runs_skin_then_base() {
        let (_registry, cx) = test_context();
        let log = Rc::new(RefCell::new(Vec::new()));
        let base: Rc<dyn Behavior> = Rc::new(Base {
            log: Rc::clone(&log),
        });
        let decorated = decorate(base, Box::new(Loud { log: Rc::clone(&log) }));

        decorated.on_stop(&cx);
        assert_eq!(*log.borrow(), vec!["loud.on_stop", "base.on_stop"]);
    }

    #[test]
    fn test_unoverridden_method_delegates_to_base() {
        let (_registry, cx) = test_context();
        let log = Rc::new(RefCell::new(Vec::new()));
        let base: Rc<dyn Behavior> = Rc::new(Base {
            log: Rc::clone(&log),
        });
        let decorated = decorate(base, Box::new(Loud { log: Rc::clone(&log) }));

        decorated.after_start(&cx);
        assert_eq!(*log.borrow(), vec!["base.after_start"]);
    }

    #[test]
    fn test_outermost_skin_wins() {
        let (_registry, cx) = test_context();
        let log = Rc::new(RefCell::new(Vec::new()));
        let base: Rc<dyn Behavior> = Rc::new(Base {
            log: Rc::clone(&log),
        });
        let inner = decorate(base, Box::new(Loud { log: Rc::clone(&log) }));
        let outer = decorate(inner, Box::new(Mute));

        outer.on_stop(&cx);
        assert!(log.borrow().is_empty(), "Mute should swallow the whole chain");
    }
}
