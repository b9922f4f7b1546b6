//! Interaction handling: pick the acting popup, close what the interaction
//! displaces, then hand the acting popup's transition to the apply phase.

use crate::action::PopupAction;
use crate::classify::Classifier;
use crate::config::ApplyMode;
use crate::context::PopupContext;
use crate::group::{resolve_group, scope_chain};
use crate::interaction::Interaction;
use crate::schedule::PendingApply;
use dom::{Document, Id};
use std::time::Instant;

/// Which popup an interaction acts on, and how.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub popup: Option<Id>,
    pub action: PopupAction,
    /// The target was a mask; its descendants are cascaded instead of siblings.
    pub via_mask: bool,
}

/// Resolve the acting popup for an interaction on `target`.
///
/// A mask acts on itself (default action close). Otherwise the walk outward
/// takes the first popup-capable element, or a trigger's declared target.
/// The first action seen is kept: a trigger with an action but no resolvable
/// target lends that action to the next enclosing popup.
pub fn resolve_acting(doc: &Document, classifier: &Classifier, target: Id) -> Resolution {
    if classifier.is_mask(doc, target) {
        return Resolution {
            popup: Some(target),
            action: classifier
                .declared_action(doc, target)
                .unwrap_or(PopupAction::Close),
            via_mask: true,
        };
    }

    let mut popup = None;
    let mut action = None;
    for el in scope_chain(doc, target) {
        if classifier.is_popup(doc, el) {
            popup = Some(el);
            action = Some(
                action
                    .or_else(|| classifier.declared_action(doc, el))
                    .unwrap_or(PopupAction::None),
            );
        }
        if action.is_none() {
            if let Some(declared) = classifier.declared_action(doc, el) {
                action = Some(declared);
                popup = classifier.declared_target(doc, el);
            }
        }
        if popup.is_some() {
            break;
        }
    }
    Resolution {
        popup,
        action: action.unwrap_or(PopupAction::None),
        via_mask: false,
    }
}

impl PopupContext {
    /// Cascade synchronously, then apply (or queue) the acting popup's action.
    pub fn handle_interaction(
        &mut self,
        doc: &mut Document,
        interaction: Interaction,
        now: Instant,
    ) -> Resolution {
        let target = interaction.effective_target();
        let resolution = resolve_acting(doc, &self.classifier, target);
        log::debug!(target: "popup.cascade", "interaction on {} resolved to {resolution:?}", target.0);

        if resolution.via_mask {
            self.deactivate_children(doc, target);
        } else if let Some(group) = resolve_group(doc, &self.classifier, target) {
            self.deactivate_siblings(doc, group, resolution.popup);
        }

        if let Some(popup) = resolution.popup {
            match self.config.apply_mode {
                ApplyMode::Immediate => {
                    self.set_popup_state(doc, popup, resolution.action, Some(&interaction), false);
                }
                ApplyMode::Deferred => self.pending.push(PendingApply {
                    due: now + self.config.apply_delay(),
                    popup,
                    action: resolution.action,
                    interaction,
                }),
            }
        }
        resolution
    }

    /// Close every open popup nested inside `scope`.
    pub fn deactivate_children(&mut self, doc: &mut Document, scope: Id) {
        for child in self.classifier.open_descendants(doc, scope) {
            self.set_popup_state(doc, child, PopupAction::Close, None, false);
        }
    }

    /// Close every open popup in `group` except `acting` and its ancestors.
    pub fn deactivate_siblings(&mut self, doc: &mut Document, group: Id, acting: Option<Id>) {
        let kept: Vec<Id> = acting
            .map(|popup| scope_chain(doc, popup).collect())
            .unwrap_or_default();
        for sibling in self.classifier.open_descendants(doc, group) {
            if !kept.contains(&sibling) {
                self.set_popup_state(doc, sibling, PopupAction::Close, None, false);
            }
        }
    }
}
