use crate::action::PopupAction;
use crate::context::{PopupContext, Transition};
use crate::interaction::KeyPress;
use core_types::KeyCode;
use dom::{Document, Id};

impl PopupContext {
    /// Escape closes the most recently opened popup that has no open popup
    /// inside it. At most one popup is closed per key press; key presses from
    /// text-entry elements are ignored.
    pub fn handle_key(&mut self, doc: &mut Document, press: KeyPress) -> Option<(Id, Transition)> {
        if press.key != KeyCode::Escape || self.is_text_entry(doc, press.target) {
            return None;
        }
        let recent: Vec<Id> = self.registry.borrow().stack.iter_recent().collect();
        let innermost = recent
            .into_iter()
            .find(|&el| !self.classifier.has_open_descendant(doc, el))?;
        let transition = self.set_popup_state(doc, innermost, PopupAction::Close, None, false);
        log::debug!(target: "popup.keyboard", "escape on {}: {transition:?}", innermost.0);
        Some((innermost, transition))
    }

    fn is_text_entry(&self, doc: &Document, el: Id) -> bool {
        doc.tag_name(el).is_some_and(|name| {
            self.config
                .text_entry_tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(name))
        })
    }
}
