use crate::action::{PopupAction, PopupState};
use crate::classify::Classifier;
use crate::config::PopupConfig;
use crate::error::PopupError;
use crate::interaction::{HostEvent, Interaction};
use crate::lifecycle;
use crate::registry::{self, SharedRegistry};
use crate::schedule::ApplyQueue;
use bus::{LifecycleKind, PopupNotice};
use core_types::PointerKind;
use dom::{Document, Id};
use std::sync::mpsc::Sender;
use std::time::Instant;

/// Outcome of one [`PopupContext::set_popup_state`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// No transition was warranted (or the node is not an element).
    Unchanged,
    /// A lifecycle listener vetoed the transition; nothing was mutated.
    Canceled,
    Opened,
    Closed,
}

/// Popup coordination for one document.
///
/// The first context attached to a document owns the root listeners: it is
/// the only one whose [`dispatch`](Self::dispatch) reacts to host events.
/// Later contexts share the active stack and still serve the direct
/// show/hide/toggle API. Dropping the owner releases the listeners; the next
/// context attached or dispatching takes them over.
pub struct PopupContext {
    pub(crate) config: PopupConfig,
    pub(crate) classifier: Classifier,
    pub(crate) registry: SharedRegistry,
    pub(crate) pending: ApplyQueue,
    serial: usize,
    trigger: PointerKind,
    notices: Option<Sender<PopupNotice>>,
}

impl PopupContext {
    pub fn attach(doc: &mut Document, config: PopupConfig) -> Result<Self, PopupError> {
        let classifier = Classifier::new(&config)?;
        let (registry, serial) = registry::attach(doc);
        let trigger = config.device.trigger_kind();
        log::debug!(
            target: "popup.registry",
            "attached popup context {serial} (listening: {}, trigger: {})",
            registry.borrow().is_listener(serial),
            trigger.event_name()
        );
        Ok(Self {
            config,
            classifier,
            registry,
            pending: ApplyQueue::default(),
            serial,
            trigger,
            notices: None,
        })
    }

    pub fn with_notices(mut self, tx: Sender<PopupNotice>) -> Self {
        self.notices = Some(tx);
        self
    }

    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn trigger_kind(&self) -> PointerKind {
        self.trigger
    }

    /// Whether this context currently owns the root listeners.
    pub fn is_listening(&self) -> bool {
        self.registry.borrow().is_listener(self.serial)
    }

    /// Snapshot of the shared active stack, oldest first.
    pub fn active_stack(&self) -> Vec<Id> {
        self.registry.borrow().stack.as_slice().to_vec()
    }

    /// Transitions queued by interactions and not yet applied.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.next_due()
    }

    /// Route an event observed at the document root.
    ///
    /// Returns `true` if this context handled it.
    pub fn dispatch(&mut self, doc: &mut Document, event: HostEvent, now: Instant) -> bool {
        if !self.registry.borrow_mut().claim_listener(self.serial) {
            return false;
        }
        match event {
            HostEvent::Pointer { kind, interaction } if kind == self.trigger => {
                self.handle_interaction(doc, interaction, now);
                true
            }
            HostEvent::Pointer { .. } => false,
            HostEvent::KeyUp(press) => {
                self.handle_key(doc, press);
                true
            }
        }
    }

    /// Apply every queued transition due at `now`. Returns how many ran.
    pub fn run_due(&mut self, doc: &mut Document, now: Instant) -> usize {
        let mut ran = 0;
        while let Some(p) = self.pending.pop_due(now) {
            self.set_popup_state(doc, p.popup, p.action, Some(&p.interaction), false);
            ran += 1;
        }
        ran
    }

    /// Apply every queued transition regardless of due time.
    pub fn flush(&mut self, doc: &mut Document) -> usize {
        let mut ran = 0;
        while let Some(p) = self.pending.pop_any() {
            self.set_popup_state(doc, p.popup, p.action, Some(&p.interaction), false);
            ran += 1;
        }
        ran
    }

    /// Move `el` toward the state `action` requests.
    ///
    /// Open on an open popup and close on a closed one are no-ops: no event,
    /// no attribute write, no stack change. Otherwise the matching lifecycle
    /// notification is dispatched first (unless `skip_lifecycle`); a veto
    /// leaves everything untouched.
    pub fn set_popup_state(
        &mut self,
        doc: &mut Document,
        el: Id,
        action: PopupAction,
        interaction: Option<&Interaction>,
        skip_lifecycle: bool,
    ) -> Transition {
        if !doc.is_element(el) {
            log::debug!(target: "popup.state", "ignoring {action:?} on non-element {}", el.0);
            return Transition::Unchanged;
        }
        let current = self.classifier.state(doc, el);
        let Some(next) = action.next_state(current) else {
            log::trace!(target: "popup.state", "{action:?} is a no-op for {} ({current:?})", el.0);
            return Transition::Unchanged;
        };
        let kind = match next {
            PopupState::Open => LifecycleKind::Open,
            PopupState::Closed => LifecycleKind::Close,
        };
        if !skip_lifecycle && !lifecycle::emit(doc, el, kind, self.config.lifecycle_bubbles) {
            log::debug!(target: "popup.state", "{} canceled for {}", kind.event_name(), el.0);
            self.notify(PopupNotice::Canceled { popup: el, kind });
            return Transition::Canceled;
        }

        let value = self.classifier.state_value(next).to_string();
        if let Err(err) = doc.set_attr(el, self.classifier.state_attr(), &value) {
            log::warn!(target: "popup.state", "failed to write popup state: {err}");
            return Transition::Unchanged;
        }
        self.registry.borrow_mut().stack.record(el, next);
        if let Some(touch) = interaction.and_then(|i| i.touch.as_ref()) {
            touch.prevent_default();
        }

        log::debug!(target: "popup.state", "{} -> {next:?}", el.0);
        match next {
            PopupState::Open => {
                self.notify(PopupNotice::Opened { popup: el });
                Transition::Opened
            }
            PopupState::Closed => {
                self.notify(PopupNotice::Closed { popup: el });
                Transition::Closed
            }
        }
    }

    fn notify(&self, notice: PopupNotice) {
        if let Some(tx) = &self.notices {
            // A dropped receiver just means nobody is watching any more.
            let _ = tx.send(notice);
        }
    }
}

impl Drop for PopupContext {
    fn drop(&mut self) {
        if let Ok(mut shared) = self.registry.try_borrow_mut() {
            shared.detach(self.serial);
        }
    }
}
