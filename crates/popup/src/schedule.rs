//! Second phase of an interaction: the acting popup's transition.
//!
//! The delay is a sequencing contract. Cascade closes land first, and a mask
//! click cannot immediately re-close the popup it is about to open. Entries
//! share one delay, so FIFO order is due order.

use crate::action::PopupAction;
use crate::interaction::Interaction;
use dom::Id;
use std::collections::VecDeque;
use std::time::Instant;

#[derive(Clone, Debug)]
pub(crate) struct PendingApply {
    pub(crate) due: Instant,
    pub(crate) popup: Id,
    pub(crate) action: PopupAction,
    pub(crate) interaction: Interaction,
}

#[derive(Debug, Default)]
pub(crate) struct ApplyQueue {
    queue: VecDeque<PendingApply>,
}

impl ApplyQueue {
    pub(crate) fn push(&mut self, pending: PendingApply) {
        self.queue.push_back(pending);
    }

    pub(crate) fn pop_due(&mut self, now: Instant) -> Option<PendingApply> {
        if self.queue.front()?.due <= now {
            self.queue.pop_front()
        } else {
            None
        }
    }

    pub(crate) fn pop_any(&mut self) -> Option<PendingApply> {
        self.queue.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn next_due(&self) -> Option<Instant> {
        self.queue.front().map(|p| p.due)
    }
}
