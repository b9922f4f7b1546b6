//! Per-document shared popup state.
//!
//! The registry lives in the document's extension slot so every context
//! attached to the same document observes one active stack.

use crate::stack::ActiveStack;
use dom::Document;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Registry {
    pub stack: ActiveStack,
    contexts: usize,
    next_serial: usize,
    /// Serial of the context that owns the root listeners.
    listener: Option<usize>,
}

impl Registry {
    /// Number of live contexts attached to the owning document.
    pub fn contexts(&self) -> usize {
        self.contexts
    }

    pub(crate) fn is_listener(&self, serial: usize) -> bool {
        self.listener == Some(serial)
    }

    /// Take over the root listeners if nobody holds them.
    pub(crate) fn claim_listener(&mut self, serial: usize) -> bool {
        if self.listener.is_none() {
            log::debug!(target: "popup.registry", "context {serial} takes over root listeners");
            self.listener = Some(serial);
        }
        self.listener == Some(serial)
    }

    pub(crate) fn detach(&mut self, serial: usize) {
        self.contexts = self.contexts.saturating_sub(1);
        if self.listener == Some(serial) {
            self.listener = None;
        }
    }
}

pub(crate) type SharedRegistry = Rc<RefCell<Registry>>;

/// Returns the registry and the serial assigned to the attaching context.
///
/// The first context attached while no listener is live owns the root
/// listeners; later ones share the stack.
pub(crate) fn attach(doc: &mut Document) -> (SharedRegistry, usize) {
    let registry = match doc.extension::<RefCell<Registry>>() {
        Some(existing) => existing,
        None => {
            let fresh: SharedRegistry = Rc::new(RefCell::new(Registry::default()));
            doc.insert_extension(Rc::clone(&fresh));
            fresh
        }
    };
    let serial = {
        let mut shared = registry.borrow_mut();
        let serial = shared.next_serial;
        shared.next_serial += 1;
        shared.contexts += 1;
        if shared.listener.is_some() {
            log::warn!(
                target: "popup.registry",
                "more than one popup context attached to the same document; reusing its active stack"
            );
        } else {
            shared.listener = Some(serial);
        }
        serial
    };
    (registry, serial)
}

/// The registry attached to `doc`, if any context has been attached.
pub fn registry(doc: &Document) -> Option<Rc<RefCell<Registry>>> {
    doc.extension::<RefCell<Registry>>()
}
