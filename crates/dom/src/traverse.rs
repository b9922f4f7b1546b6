use crate::{Document, Id};

/// Lazy inclusive walk from a node up to the document node.
///
/// Restart from any node by calling [`Document::ancestors`] again; callers
/// stop early with `take_while`/`find` instead of a callback convention.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<Id>,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(doc: &'a Document, start: Id) -> Self {
        Self {
            doc,
            next: doc.exists(start).then_some(start),
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

/// Pre-order walk over the strict descendants of a scope node.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<Id>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(doc: &'a Document, scope: Id) -> Self {
        let stack = doc.children(scope).iter().rev().copied().collect();
        Self { doc, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(current).iter().rev().copied());
        Some(current)
    }
}
