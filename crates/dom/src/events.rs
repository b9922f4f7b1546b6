//! Named, cancelable event dispatch on document nodes.
//!
//! Listeners run synchronously in registration order at each node on the
//! propagation path. The path is the target alone for non-bubbling events,
//! and the target followed by its ancestors otherwise.

use crate::Id;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventInit {
    pub bubbles: bool,
    pub cancelable: bool,
}

impl Default for EventInit {
    fn default() -> Self {
        Self {
            bubbles: false,
            cancelable: true,
        }
    }
}

#[derive(Debug)]
pub struct Event {
    name: Arc<str>,
    target: Id,
    current_target: Id,
    init: EventInit,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub(crate) fn new(name: &str, target: Id, init: EventInit) -> Self {
        Self {
            name: Arc::from(name),
            target,
            current_target: target,
            init,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn current_target(&self) -> Id {
        self.current_target
    }

    pub fn bubbles(&self) -> bool {
        self.init.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.init.cancelable
    }

    /// No effect on non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.init.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Remaining listeners on the current node still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub(crate) fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn set_current_target(&mut self, node: Id) {
        self.current_target = node;
    }
}

pub(crate) type Handler = Box<dyn FnMut(&mut Event)>;

struct ListenerEntry {
    id: ListenerId,
    node: Id,
    name: Arc<str>,
    handler: Handler,
}

#[derive(Default)]
pub(crate) struct EventListeners {
    next_id: u64,
    entries: Vec<ListenerEntry>,
}

impl EventListeners {
    pub(crate) fn add(&mut self, node: Id, name: &str, handler: Handler) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push(ListenerEntry {
            id,
            node,
            name: Arc::from(name),
            handler,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub(crate) fn invoke(&mut self, node: Id, event: &mut Event) {
        let name = Arc::clone(&event.name);
        for entry in self
            .entries
            .iter_mut()
            .filter(|entry| entry.node == node && entry.name == name)
        {
            (entry.handler)(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
