//! End-to-end scenarios: lifecycle, broadcast with veto/defer, decoration,
//! and the readiness barrier, driven through the public API only.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use componentry::{
    Behavior, ComponentDescriptor, Context, Continuation, Error, Payload, Region, Registry, Reply,
    Skin,
};

type Journal = Rc<RefCell<Vec<String>>>;

fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

/// Region stub that records its release.
struct TrackedRegion {
    name: &'static str,
    journal: Journal,
}

impl Region for TrackedRegion {
    fn release(&self) {
        self.journal.borrow_mut().push(format!("{}:released", self.name));
    }
}

struct InertRegion;

impl Region for InertRegion {
    fn release(&self) {}
}

fn inert_region() -> Rc<dyn Region> {
    Rc::new(InertRegion)
}

/// Configurable test behavior: journals everything it sees, optionally
/// vetoes one event (parking the completion for later), optionally defers
/// its start hook.
struct Probe {
    name: &'static str,
    journal: Journal,
    veto_event: Option<&'static str>,
    parked_completion: Rc<RefCell<Option<Continuation>>>,
    defer_start: bool,
    parked_ready: Rc<RefCell<Option<Continuation>>>,
}

impl Probe {
    fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: Rc::clone(journal),
            veto_event: None,
            parked_completion: Rc::new(RefCell::new(None)),
            defer_start: false,
            parked_ready: Rc::new(RefCell::new(None)),
        }
    }

    fn vetoing(mut self, event: &'static str) -> Self {
        self.veto_event = Some(event);
        self
    }

    fn deferring_start(mut self) -> Self {
        self.defer_start = true;
        self
    }
}

impl Behavior for Probe {
    fn on_start(&self, _cx: &Context, ready: &Continuation) {
        self.journal.borrow_mut().push(format!("{}:on_start", self.name));
        if self.defer_start {
            *self.parked_ready.borrow_mut() = Some(ready.clone());
        } else {
            ready.resolve();
        }
    }

    fn after_start(&self, _cx: &Context) {
        self.journal.borrow_mut().push(format!("{}:after_start", self.name));
    }

    fn on_stop(&self, _cx: &Context) {
        self.journal.borrow_mut().push(format!("{}:on_stop", self.name));
    }

    fn handle(
        &self,
        _cx: &Context,
        event: &str,
        _payload: &Payload,
        completion: Option<&Continuation>,
    ) -> Result<Reply, Error> {
        self.journal.borrow_mut().push(format!("{}:{event}", self.name));
        if self.veto_event == Some(event) {
            let parked = completion.cloned();
            *self.parked_completion.borrow_mut() = parked;
            return Ok(Reply::Veto);
        }
        Ok(Reply::Proceed)
    }
}

/// Builds a registry whose "Probe" factory pops pre-built behaviors off a
/// stack, so each registration gets its own probe instance.
fn probe_registry(probes: Vec<Probe>) -> Registry {
    let pending = Rc::new(RefCell::new(probes));
    Registry::builder()
        .with_component("Probe", move |_region| {
            let probe = pending
                .borrow_mut()
                .pop()
                .expect("more registrations than probes");
            Rc::new(probe)
        })
        .build()
}

fn probe_descriptor(mediator_ref: &str) -> ComponentDescriptor {
    ComponentDescriptor::new("Probe", inert_region()).with_mediator_ref(mediator_ref)
}

#[test]
fn fire_without_veto_runs_default_once_and_afters_in_attachment_order() {
    let log = journal();
    // Factory pops from the back: C first in the vec is registered last.
    let registry = probe_registry(vec![
        Probe::new("c", &log),
        Probe::new("b", &log),
        Probe::new("a", &log),
    ]);

    let a = registry
        .register_component(
            ComponentDescriptor::new("Probe", inert_region())
                .with_mediator_ref("left")
                .with_mediator_ref("right"),
        )
        .unwrap()
        .unwrap();
    registry
        .register_component(probe_descriptor("left"))
        .unwrap();
    registry
        .register_component(probe_descriptor("right"))
        .unwrap();

    let action_log = Rc::clone(&log);
    a.fire(
        "ping",
        json!({}),
        Some(Box::new(move || {
            action_log.borrow_mut().push("default".into());
        })),
    )
    .unwrap();

    assert_eq!(
        entries(&log),
        vec![
            "b:onPing",
            "default",
            "b:afterPing",
            "c:onPing",
            "c:afterPing",
        ]
    );
}

#[test]
fn veto_defers_default_action_until_peer_resolves_completion() {
    let log = journal();
    let thumbnails = Probe::new("thumbs", &log).vetoing("onSlideChange");
    let parked = Rc::clone(&thumbnails.parked_completion);
    let registry = probe_registry(vec![thumbnails, Probe::new("gallery", &log)]);

    let gallery = registry
        .register_component(probe_descriptor("NavGallery1"))
        .unwrap()
        .unwrap();
    registry
        .register_component(probe_descriptor("NavGallery1"))
        .unwrap();

    let action_log = Rc::clone(&log);
    gallery
        .fire(
            "slideChange",
            json!({ "index": 2 }),
            Some(Box::new(move || {
                action_log.borrow_mut().push("defaultA".into());
            })),
        )
        .unwrap();

    // fire returned without running the default action.
    assert_eq!(entries(&log), vec!["thumbs:onSlideChange"]);

    // The vetoing peer finishes its in-flight work and resolves.
    let completion = parked.borrow_mut().take().expect("completion was parked");
    completion.resolve();
    assert_eq!(
        entries(&log),
        vec![
            "thumbs:onSlideChange",
            "defaultA",
            "thumbs:afterSlideChange",
        ]
    );

    // The obligation is single-shot; resolving again changes nothing.
    completion.resolve();
    assert_eq!(entries(&log).len(), 3);
}

#[test]
fn barrier_releases_all_after_hooks_together() {
    let log = journal();
    let deferred = Probe::new("slow", &log).deferring_start();
    let parked_ready = Rc::clone(&deferred.parked_ready);
    let registry = probe_registry(vec![
        deferred,
        Probe::new("second", &log),
        Probe::new("first", &log),
    ]);

    for _ in 0..3 {
        registry
            .register_component(ComponentDescriptor::new("Probe", inert_region()))
            .unwrap();
    }
    registry.start_all();

    // Two of three components signaled ready; no after hook may run yet.
    assert_eq!(
        entries(&log),
        vec!["first:on_start", "second:on_start", "slow:on_start"]
    );

    let ready = parked_ready.borrow_mut().take().expect("ready was parked");
    ready.resolve();
    assert_eq!(
        entries(&log),
        vec![
            "first:on_start",
            "second:on_start",
            "slow:on_start",
            "first:after_start",
            "second:after_start",
            "slow:after_start",
        ]
    );
}

#[test]
fn stop_runs_hook_then_releases_region_and_keeps_registration() {
    let log = journal();
    let registry = probe_registry(vec![Probe::new("a", &log), Probe::new("b", &log)]);

    let b = registry
        .register_component(
            ComponentDescriptor::new(
                "Probe",
                Rc::new(TrackedRegion {
                    name: "b",
                    journal: Rc::clone(&log),
                }),
            )
            .with_mediator_ref("X"),
        )
        .unwrap()
        .unwrap();
    let a = registry
        .register_component(probe_descriptor("X"))
        .unwrap()
        .unwrap();
    registry.start_all();
    log.borrow_mut().clear();

    registry.stop(&[Rc::clone(&b)]);
    assert_eq!(entries(&log), vec!["b:on_stop", "b:released"]);

    // Still registered, still a mediator member.
    assert_eq!(registry.len(), 2);
    log.borrow_mut().clear();
    a.fire("ping", json!({}), None).unwrap();
    assert_eq!(entries(&log), vec!["b:onPing", "b:afterPing"]);
}

#[test]
fn remove_components_stops_then_unregisters() {
    let log = journal();
    let registry = probe_registry(vec![Probe::new("a", &log), Probe::new("b", &log)]);
    let cx = registry.context();

    let b = registry
        .register_component(probe_descriptor("X"))
        .unwrap()
        .unwrap();
    let a = registry
        .register_component(probe_descriptor("X"))
        .unwrap()
        .unwrap();
    registry.start_all();
    log.borrow_mut().clear();

    cx.remove_components(&[Rc::clone(&a)]).unwrap();
    assert_eq!(entries(&log), vec!["a:on_stop"]);
    assert_eq!(registry.len(), 1);

    // The removed component no longer hears anything on X.
    log.borrow_mut().clear();
    b.fire("ping", json!({}), None).unwrap();
    assert_eq!(entries(&log), Vec::<String>::new());
}

// ---- Decoration ----

struct PlainGallery {
    journal: Journal,
}

impl Behavior for PlainGallery {
    fn after_start(&self, _cx: &Context) {
        self.journal.borrow_mut().push("base:after_start".into());
    }

    fn handle(
        &self,
        _cx: &Context,
        event: &str,
        _payload: &Payload,
        _completion: Option<&Continuation>,
    ) -> Result<Reply, Error> {
        self.journal.borrow_mut().push(format!("base:{event}"));
        Ok(Reply::Proceed)
    }
}

struct SubmarineSkin {
    journal: Journal,
}

impl Skin for SubmarineSkin {
    fn handle(
        &self,
        base: &dyn Behavior,
        cx: &Context,
        event: &str,
        payload: &Payload,
        completion: Option<&Continuation>,
    ) -> Result<Reply, Error> {
        self.journal.borrow_mut().push(format!("skin:{event}"));
        base.handle(cx, event, payload, completion)
    }
}

fn gallery_registry(log: &Journal) -> Registry {
    let base_log = Rc::clone(log);
    let skin_log = Rc::clone(log);
    let probe_log = Rc::clone(log);
    Registry::builder()
        .with_component("Gallery", move |_region| {
            Rc::new(PlainGallery {
                journal: Rc::clone(&base_log),
            })
        })
        .with_component("Probe", move |_region| {
            Rc::new(Probe::new("peer", &probe_log))
        })
        .with_skin("Gallery", "Submarine", move || {
            Box::new(SubmarineSkin {
                journal: Rc::clone(&skin_log),
            })
        })
        .build()
}

#[test]
fn skin_overrides_selected_hooks_and_delegates_the_rest() {
    let log = journal();
    let registry = gallery_registry(&log);

    let gallery = registry
        .register_component(
            ComponentDescriptor::new("Gallery", inert_region())
                .with_skin("Submarine")
                .with_mediator_ref("X"),
        )
        .unwrap()
        .unwrap();
    let peer = registry
        .register_component(probe_descriptor("X"))
        .unwrap()
        .unwrap();

    // The decorated component is still a Gallery to every membership check.
    assert_eq!(gallery.type_name(), "Gallery");
    registry.start_all();
    // after_start is not overridden by the skin: base logic only.
    assert!(entries(&log).contains(&"base:after_start".to_string()));
    log.borrow_mut().clear();

    // handle is overridden: skin logic first, then explicit delegation.
    peer.fire("ping", json!({}), None).unwrap();
    assert_eq!(
        entries(&log),
        vec!["skin:onPing", "base:onPing", "skin:afterPing", "base:afterPing"]
    );
}

#[test]
fn unknown_skin_is_a_noop_not_an_error() {
    let log = journal();
    let registry = gallery_registry(&log);

    let gallery = registry
        .register_component(
            ComponentDescriptor::new("Gallery", inert_region()).with_skin("Missing"),
        )
        .unwrap()
        .unwrap();
    assert_eq!(gallery.type_name(), "Gallery");
    assert_eq!(registry.len(), 1);
}

#[test]
fn unregister_all_leaves_every_table_empty() {
    let log = journal();
    let registry = probe_registry(vec![
        Probe::new("c", &log),
        Probe::new("b", &log),
        Probe::new("a", &log),
    ]);

    for _ in 0..3 {
        registry
            .register_component(probe_descriptor("shared"))
            .unwrap();
    }
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.mediator_count(), 1);

    registry.unregister_all();
    assert_eq!(registry.len(), 0);
    assert_eq!(registry.mediator_count(), 0);
}

#[test]
fn config_is_served_through_the_facade() {
    use componentry::Config;

    let registry = Registry::builder()
        .with_config(Config::default().with("theme", json!("dark")))
        .build();
    let cx = registry.context();

    assert_eq!(cx.config_param("theme").unwrap(), json!("dark"));
    let err = cx.config_param("missing").unwrap_err();
    assert_eq!(err.as_label(), "config_param_not_found");
}

#[test]
fn handler_error_aborts_broadcast_fail_fast() {
    struct Fragile;

    impl Behavior for Fragile {
        fn handle(
            &self,
            _cx: &Context,
            event: &str,
            _payload: &Payload,
            _completion: Option<&Continuation>,
        ) -> Result<Reply, Error> {
            Err(Error::handler(event, "not hydrated"))
        }
    }

    struct Silent;
    impl Behavior for Silent {}

    let registry = Registry::builder()
        .with_component("Fragile", |_region| Rc::new(Fragile))
        .with_component("Silent", |_region| Rc::new(Silent))
        .build();

    let origin = registry
        .register_component(
            ComponentDescriptor::new("Silent", inert_region()).with_mediator_ref("X"),
        )
        .unwrap()
        .unwrap();
    registry
        .register_component(
            ComponentDescriptor::new("Fragile", inert_region()).with_mediator_ref("X"),
        )
        .unwrap();

    let err = origin.fire("ping", json!({}), None).unwrap_err();
    assert_eq!(err.as_label(), "handler_failed");
}
