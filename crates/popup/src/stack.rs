//! Ordered record of open popups, oldest first.
//!
//! # Invariants
//!
//! - Every entry is open and appears exactly once.
//! - The last entry is the most recently opened popup.
//! - Recording a transition for an entry that is already absent (or already
//!   last) must neither fail nor duplicate it.

use crate::action::PopupState;
use dom::Id;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveStack {
    entries: Vec<Id>,
}

impl ActiveStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a committed transition of `el` to `state`.
    pub fn record(&mut self, el: Id, state: PopupState) {
        let idx = self.entries.iter().position(|&e| e == el);
        let is_last = idx.is_some() && idx == self.entries.len().checked_sub(1);
        if let Some(idx) = idx {
            if state == PopupState::Closed || !is_last {
                self.entries.remove(idx);
            }
        }
        if state == PopupState::Open && !is_last {
            self.entries.push(el);
        }
    }

    pub fn last(&self) -> Option<Id> {
        self.entries.last().copied()
    }

    pub fn contains(&self, el: Id) -> bool {
        self.entries.contains(&el)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[Id] {
        &self.entries
    }

    /// Most recently opened first.
    pub fn iter_recent(&self) -> impl Iterator<Item = Id> + '_ {
        self.entries.iter().rev().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PopupState::{Closed, Open};

    #[test]
    fn open_pushes_and_close_removes() {
        let mut stack = ActiveStack::new();
        stack.record(Id(1), Open);
        stack.record(Id(2), Open);
        assert_eq!(stack.as_slice(), &[Id(1), Id(2)]);
        stack.record(Id(2), Closed);
        assert_eq!(stack.last(), Some(Id(1)));
        stack.record(Id(1), Closed);
        assert!(stack.is_empty());
    }

    #[test]
    fn reopening_last_entry_does_not_duplicate() {
        let mut stack = ActiveStack::new();
        stack.record(Id(1), Open);
        stack.record(Id(1), Open);
        assert_eq!(stack.as_slice(), &[Id(1)]);
    }

    #[test]
    fn reopening_buried_entry_moves_it_to_the_end() {
        let mut stack = ActiveStack::new();
        stack.record(Id(1), Open);
        stack.record(Id(2), Open);
        stack.record(Id(1), Open);
        assert_eq!(stack.as_slice(), &[Id(2), Id(1)]);
    }

    #[test]
    fn closing_absent_entry_is_harmless() {
        let mut stack = ActiveStack::new();
        stack.record(Id(1), Open);
        stack.record(Id(9), Closed);
        stack.record(Id(1), Closed);
        stack.record(Id(1), Closed);
        assert!(stack.is_empty());
    }

    #[test]
    fn closing_buried_entry_keeps_order() {
        let mut stack = ActiveStack::new();
        for raw in 1..=3 {
            stack.record(Id(raw), Open);
        }
        stack.record(Id(2), Closed);
        assert_eq!(stack.as_slice(), &[Id(1), Id(3)]);
        assert_eq!(stack.iter_recent().collect::<Vec<_>>(), vec![Id(3), Id(1)]);
    }
}
