//! Cancelable `popupopen` / `popupclose` notifications.

use bus::LifecycleKind;
use dom::{Document, Event, EventInit, Id, ListenerId};

/// Returns `false` when a listener vetoed the transition.
pub fn emit(doc: &mut Document, el: Id, kind: LifecycleKind, bubbles: bool) -> bool {
    doc.dispatch_event(
        el,
        kind.event_name(),
        EventInit {
            bubbles,
            cancelable: true,
        },
    )
}

/// Register a lifecycle listener; call [`Event::prevent_default`] to veto.
pub fn listen<F>(doc: &mut Document, el: Id, kind: LifecycleKind, handler: F) -> ListenerId
where
    F: FnMut(&mut Event) + 'static,
{
    doc.add_listener(el, kind.event_name(), handler)
}
