//! Direct popup control. These bypass the cascade entirely: showing a popup
//! does not close its siblings.

use crate::action::PopupAction;
use crate::context::{PopupContext, Transition};
use crate::group::scope_chain;
use dom::{Document, Id};

/// An element, or a selector resolved against the whole document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target<'a> {
    Node(Id),
    Selector(&'a str),
}

impl From<Id> for Target<'_> {
    fn from(id: Id) -> Self {
        Target::Node(id)
    }
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(selector: &'a str) -> Self {
        Target::Selector(selector)
    }
}

impl Target<'_> {
    pub fn resolve(self, doc: &Document) -> Option<Id> {
        match self {
            Target::Node(id) => doc.is_element(id).then_some(id),
            Target::Selector(selector) => doc.query_selector(selector),
        }
    }
}

impl PopupContext {
    pub fn show<'a>(
        &mut self,
        doc: &mut Document,
        target: impl Into<Target<'a>>,
        skip_event: bool,
    ) -> Transition {
        self.apply_to(doc, target.into(), PopupAction::Open, skip_event)
    }

    pub fn hide<'a>(
        &mut self,
        doc: &mut Document,
        target: impl Into<Target<'a>>,
        skip_event: bool,
    ) -> Transition {
        self.apply_to(doc, target.into(), PopupAction::Close, skip_event)
    }

    pub fn toggle<'a>(
        &mut self,
        doc: &mut Document,
        target: impl Into<Target<'a>>,
        skip_event: bool,
    ) -> Transition {
        self.apply_to(doc, target.into(), PopupAction::Toggle, skip_event)
    }

    /// Close `el` if any popup in its chain (itself included) is open.
    ///
    /// Note that `el` itself is closed, not the open ancestor that was found.
    pub fn hide_parent(&mut self, doc: &mut Document, el: Id, skip_event: bool) -> Transition {
        let open_in_chain = scope_chain(doc, el)
            .filter(|&p| self.classifier.is_popup(doc, p) && self.classifier.is_open(doc, p))
            .count();
        let mut result = Transition::Unchanged;
        for _ in 0..open_in_chain {
            match self.set_popup_state(doc, el, PopupAction::Close, None, skip_event) {
                Transition::Unchanged => {}
                other => result = other,
            }
        }
        result
    }

    /// Close every open popup in the active stack, most recent first.
    ///
    /// Returns how many closed; vetoed popups stay open.
    pub fn hide_all(&mut self, doc: &mut Document, skip_event: bool) -> usize {
        let recent: Vec<Id> = self.registry.borrow().stack.iter_recent().collect();
        recent
            .into_iter()
            .filter(|&el| {
                self.set_popup_state(doc, el, PopupAction::Close, None, skip_event)
                    == Transition::Closed
            })
            .count()
    }

    pub fn is_open<'a>(&self, doc: &Document, target: impl Into<Target<'a>>) -> bool {
        target
            .into()
            .resolve(doc)
            .is_some_and(|el| self.classifier.is_open(doc, el))
    }

    fn apply_to(
        &mut self,
        doc: &mut Document,
        target: Target<'_>,
        action: PopupAction,
        skip_event: bool,
    ) -> Transition {
        let Some(el) = target.resolve(doc) else {
            log::debug!(target: "popup.api", "{action:?}: {target:?} resolved to nothing");
            return Transition::Unchanged;
        };
        self.set_popup_state(doc, el, action, None, skip_event)
    }
}
