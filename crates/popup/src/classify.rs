//! Attribute and selector predicates over document elements. No side effects.

use crate::action::{PopupAction, PopupState};
use crate::config::PopupConfig;
use crate::error::PopupError;
use dom::{Document, Id, SelectorList};

#[derive(Clone, Debug)]
pub struct Classifier {
    state_attr: String,
    open_value: String,
    action_attr: String,
    target_attr: String,
    mask: SelectorList,
    opened: SelectorList,
}

impl Classifier {
    pub fn new(config: &PopupConfig) -> Result<Self, PopupError> {
        let mask = parse(&config.mask_selector, "mask_selector")?;
        // Validates the attribute name as a selector token as well.
        parse(&format!("[{}]", config.state_attr), "state_attr")?;
        let opened = parse(
            &format!("[{}=\"{}\"]", config.state_attr, config.open_value),
            "open_value",
        )?;
        Ok(Self {
            state_attr: config.state_attr.clone(),
            open_value: config.open_value.clone(),
            action_attr: config.action_attr.clone(),
            target_attr: config.target_attr.clone(),
            mask,
            opened,
        })
    }

    pub fn state_attr(&self) -> &str {
        &self.state_attr
    }

    /// Attribute value written for `state`.
    pub fn state_value(&self, state: PopupState) -> &str {
        match state {
            PopupState::Open => &self.open_value,
            PopupState::Closed => "",
        }
    }

    pub fn is_popup(&self, doc: &Document, el: Id) -> bool {
        doc.has_attr(el, &self.state_attr)
    }

    pub fn is_mask(&self, doc: &Document, el: Id) -> bool {
        doc.matches(el, &self.mask)
    }

    pub fn state(&self, doc: &Document, el: Id) -> PopupState {
        if doc.attr(el, &self.state_attr) == Some(self.open_value.as_str()) {
            PopupState::Open
        } else {
            PopupState::Closed
        }
    }

    pub fn is_open(&self, doc: &Document, el: Id) -> bool {
        self.state(doc, el) == PopupState::Open
    }

    /// Unrecognized values read as undeclared.
    pub fn declared_action(&self, doc: &Document, el: Id) -> Option<PopupAction> {
        let raw = doc.attr(el, &self.action_attr).filter(|v| !v.is_empty())?;
        let action = PopupAction::parse(raw);
        if action.is_none() {
            log::debug!(target: "popup.classify", "ignoring unknown action {raw:?} on node {}", el.0);
        }
        action
    }

    pub fn declared_target(&self, doc: &Document, el: Id) -> Option<Id> {
        let selector = doc.attr(el, &self.target_attr).filter(|v| !v.is_empty())?;
        doc.query_selector(selector)
    }

    /// Open popups strictly inside `scope`, in document order.
    pub fn open_descendants(&self, doc: &Document, scope: Id) -> Vec<Id> {
        doc.query_selector_all_in(scope, &self.opened)
    }

    pub fn has_open_descendant(&self, doc: &Document, scope: Id) -> bool {
        doc.query_selector_in(scope, &self.opened).is_some()
    }
}

fn parse(selector: &str, field: &'static str) -> Result<SelectorList, PopupError> {
    SelectorList::parse(selector).ok_or_else(|| PopupError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Document, Classifier, [Id; 4]) {
        let mut doc = Document::with_body();
        let body = doc.body().unwrap();
        let mask = doc.create_element("div");
        doc.set_attr(mask, "class", "modal-mask").unwrap();
        doc.append_child(body, mask).unwrap();
        let popup = doc.create_element("div");
        doc.set_attr(popup, "id", "menu").unwrap();
        doc.set_attr(popup, "eagle-popup", "").unwrap();
        doc.append_child(mask, popup).unwrap();
        let trigger = doc.create_element("button");
        doc.set_attr(trigger, "popup-action", "toggle").unwrap();
        doc.set_attr(trigger, "popup-target", "#menu").unwrap();
        doc.append_child(body, trigger).unwrap();
        let odd = doc.create_element("button");
        doc.set_attr(odd, "popup-action", "explode").unwrap();
        doc.set_attr(odd, "popup-target", "#nowhere").unwrap();
        doc.append_child(body, odd).unwrap();
        let classifier = Classifier::new(&PopupConfig::default()).unwrap();
        (doc, classifier, [mask, popup, trigger, odd])
    }

    #[test]
    fn classifies_popups_and_masks() {
        let (mut doc, cls, [mask, popup, trigger, _]) = fixture();
        assert!(cls.is_mask(&doc, mask));
        assert!(!cls.is_popup(&doc, mask));
        assert!(cls.is_popup(&doc, popup));
        assert!(!cls.is_popup(&doc, trigger));
        assert_eq!(cls.state(&doc, popup), PopupState::Closed);

        let alt = doc.create_element("section");
        doc.set_attr(alt, "eagle-popup-mask", "").unwrap();
        assert!(cls.is_mask(&doc, alt));
    }

    #[test]
    fn open_state_requires_exact_value() {
        let (mut doc, cls, [mask, popup, ..]) = fixture();
        doc.set_attr(popup, "eagle-popup", "popup").unwrap();
        assert!(cls.is_open(&doc, popup));
        assert_eq!(cls.open_descendants(&doc, mask), vec![popup]);
        doc.set_attr(popup, "eagle-popup", "popup2").unwrap();
        assert!(!cls.is_open(&doc, popup));
        assert!(!cls.has_open_descendant(&doc, mask));
    }

    #[test]
    fn reads_declared_action_and_target() {
        let (doc, cls, [_, popup, trigger, odd]) = fixture();
        assert_eq!(cls.declared_action(&doc, trigger), Some(PopupAction::Toggle));
        assert_eq!(cls.declared_target(&doc, trigger), Some(popup));
        assert_eq!(cls.declared_action(&doc, odd), None);
        assert_eq!(cls.declared_target(&doc, odd), None);
        assert_eq!(cls.declared_action(&doc, popup), None);
        assert_eq!(cls.declared_target(&doc, popup), None);
    }

    #[test]
    fn rejects_unparseable_config() {
        let config = PopupConfig {
            mask_selector: ".modal-mask .inner".to_string(),
            ..PopupConfig::default()
        };
        assert_eq!(
            Classifier::new(&config).unwrap_err(),
            PopupError::InvalidSelector {
                field: "mask_selector",
                selector: ".modal-mask .inner".to_string(),
            }
        );
        let config = PopupConfig {
            open_value: "a\"b".to_string(),
            ..PopupConfig::default()
        };
        assert!(Classifier::new(&config).is_err());
    }
}
