//! # Gallery demo
//!
//! Demonstrates the core componentry features:
//! - Component registration and the start barrier
//! - Mediator broadcast with veto and deferred completion
//! - Skin decoration
//! - Configuration served through the context facade
//!
//! Run with `RUST_LOG=componentry=debug` to watch the registry at work.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use componentry::{
    Behavior, ComponentDescriptor, Context, Continuation, Error, Payload, Region, Registry, Reply,
    Skin,
};

/// Stand-in for a document region; a real host would tear down DOM
/// bindings or native handles here.
struct Strip {
    name: &'static str,
}

impl Region for Strip {
    fn release(&self) {
        println!("🧹 Region {}: released", self.name);
    }
}

/// The slideshow itself. Fires `slideChange` and advances only when no
/// peer vetoes.
struct Gallery;

impl Behavior for Gallery {
    fn after_start(&self, _cx: &Context) {
        println!("🖼  Gallery: all components are up, showing slide 0");
    }
}

/// The thumbnail strip. Vetoes a slide change while it is still loading
/// thumbnails, then resolves the deferred completion once done.
struct Thumbnails {
    pending: Rc<RefCell<Option<Continuation>>>,
    loaded: RefCell<bool>,
}

impl Behavior for Thumbnails {
    fn handle(
        &self,
        _cx: &Context,
        event: &str,
        payload: &Payload,
        completion: Option<&Continuation>,
    ) -> Result<Reply, Error> {
        match event {
            "onSlideChange" if !*self.loaded.borrow() => {
                println!("🧩 Thumbnails: not loaded yet, holding slide {}", payload["index"]);
                *self.pending.borrow_mut() = completion.cloned();
                Ok(Reply::Veto)
            }
            "onSlideChange" => {
                println!("🧩 Thumbnails: highlighting slide {}", payload["index"]);
                Ok(Reply::Proceed)
            }
            "afterSlideChange" => {
                println!("🧩 Thumbnails: scrolled to slide {}", payload["index"]);
                *self.loaded.borrow_mut() = true;
                Ok(Reply::Proceed)
            }
            _ => Ok(Reply::Unhandled),
        }
    }
}

/// A skin that re-themes the gallery without touching its base logic.
struct DarkSkin;

impl Skin for DarkSkin {
    fn after_start(&self, base: &dyn Behavior, cx: &Context) {
        println!("🌒 DarkSkin: applying dark theme");
        base.after_start(cx);
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🚀 Gallery Demo\n");

    let pending: Rc<RefCell<Option<Continuation>>> = Rc::new(RefCell::new(None));
    let thumbs_pending = Rc::clone(&pending);

    let registry = Registry::builder()
        .with_component("Gallery", |_region| Rc::new(Gallery))
        .with_component("Thumbnails", move |_region| {
            Rc::new(Thumbnails {
                pending: Rc::clone(&thumbs_pending),
                loaded: RefCell::new(false),
            })
        })
        .with_skin("Gallery", "Dark", || Box::new(DarkSkin))
        .with_config(componentry::Config::default().with("slides", json!(12)))
        .build();

    let gallery = registry
        .register_component(
            ComponentDescriptor::new("Gallery", Rc::new(Strip { name: "stage" }))
                .with_skin("Dark")
                .with_mediator_ref("Gallery1"),
        )?
        .expect("Gallery factory is registered");
    registry.register_component(
        ComponentDescriptor::new("Thumbnails", Rc::new(Strip { name: "strip" }))
            .with_mediator_ref("Gallery1"),
    )?;

    registry.start_all();

    let slides = registry.context().config_param("slides")?;
    println!("⚙️  Config: {slides} slides\n");

    // First change: the thumbnail strip vetoes and parks the completion.
    println!("▶️  fire(slideChange, index 2)");
    gallery.fire(
        "slideChange",
        json!({ "index": 2 }),
        Some(Box::new(|| println!("🖼  Gallery: viewport moved to slide 2"))),
    )?;
    println!("⏸  default action deferred by veto\n");

    // The strip finishes loading and releases the held broadcast.
    println!("▶️  Thumbnails finished loading, resolving");
    if let Some(completion) = pending.borrow_mut().take() {
        completion.resolve();
    }

    // Second change goes through unvetoed.
    println!("\n▶️  fire(slideChange, index 3)");
    gallery.fire(
        "slideChange",
        json!({ "index": 3 }),
        Some(Box::new(|| println!("🖼  Gallery: viewport moved to slide 3"))),
    )?;

    println!("\n🛑 stopping");
    registry.stop_all();
    registry.unregister_all();
    Ok(())
}
