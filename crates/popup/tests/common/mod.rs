#![allow(dead_code)]

use core_types::{KeyCode, PointerKind};
use dom::{Document, Id};
use popup::{HostEvent, Interaction, KeyPress, PopupConfig, PopupContext};
use std::time::{Duration, Instant};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Document plus an attached context and a virtual clock.
pub struct Page {
    pub doc: Document,
    pub popups: PopupContext,
    pub now: Instant,
}

impl Page {
    pub fn new() -> Self {
        Self::with_config(PopupConfig::default())
    }

    pub fn with_config(config: PopupConfig) -> Self {
        init_logging();
        let mut doc = Document::with_body();
        let popups = PopupContext::attach(&mut doc, config).expect("default selectors parse");
        Self {
            doc,
            popups,
            now: Instant::now(),
        }
    }

    pub fn body(&self) -> Id {
        self.doc.body().expect("skeleton has a body")
    }

    /// Append a `div` under `parent` (or `<body>`) with `attrs`.
    pub fn add(&mut self, parent: Option<Id>, attrs: &[(&str, &str)]) -> Id {
        self.add_tag(parent, "div", attrs)
    }

    pub fn add_tag(&mut self, parent: Option<Id>, tag: &str, attrs: &[(&str, &str)]) -> Id {
        let parent = parent.unwrap_or_else(|| self.body());
        let id = self.doc.create_element(tag);
        for (k, v) in attrs {
            self.doc.set_attr(id, k, v).unwrap();
        }
        self.doc.append_child(parent, id).unwrap();
        id
    }

    pub fn mask(&mut self, parent: Option<Id>, id: &str) -> Id {
        self.add(parent, &[("id", id), ("class", "modal-mask")])
    }

    pub fn popup(&mut self, parent: Option<Id>, id: &str) -> Id {
        self.add(parent, &[("id", id), ("eagle-popup", "")])
    }

    pub fn trigger(&mut self, parent: Option<Id>, action: &str, target: &str) -> Id {
        self.add_tag(
            parent,
            "button",
            &[("popup-action", action), ("popup-target", target)],
        )
    }

    /// Pointer completion on `target`, then let the apply delay elapse.
    pub fn click(&mut self, target: Id) {
        self.click_no_wait(target);
        self.wait(self.popups.config().apply_delay());
    }

    pub fn click_no_wait(&mut self, target: Id) {
        let event = HostEvent::Pointer {
            kind: PointerKind::MouseUp,
            interaction: Interaction::new(target),
        };
        self.popups.dispatch(&mut self.doc, event, self.now);
    }

    pub fn key(&mut self, key: KeyCode, target: Id) -> bool {
        let event = HostEvent::KeyUp(KeyPress { key, target });
        self.popups.dispatch(&mut self.doc, event, self.now)
    }

    pub fn escape(&mut self) {
        let body = self.body();
        self.key(KeyCode::Escape, body);
    }

    pub fn wait(&mut self, delay: Duration) {
        self.now += delay;
        self.popups.run_due(&mut self.doc, self.now);
    }

    pub fn stack(&self) -> Vec<Id> {
        self.popups.active_stack()
    }

    pub fn is_open(&self, el: Id) -> bool {
        self.popups.is_open(&self.doc, el)
    }
}
