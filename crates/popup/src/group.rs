//! Scoping boundaries for sibling deactivation.

use crate::classify::Classifier;
use dom::{Document, Id};

/// `start` and its ancestors, stopping before `<body>` and the document node.
pub fn scope_chain(doc: &Document, start: Id) -> impl Iterator<Item = Id> + '_ {
    let root = doc.root();
    let body = doc.body();
    doc.ancestors(start)
        .take_while(move |&id| id != root && Some(id) != body)
}

/// Nearest mask strictly above `target`, or `<body>` when none is found.
///
/// Detached nodes have no group.
pub fn resolve_group(doc: &Document, classifier: &Classifier, target: Id) -> Option<Id> {
    doc.parent(target)?;
    scope_chain(doc, target)
        .skip(1)
        .find(|&el| classifier.is_mask(doc, el))
        .or_else(|| doc.body())
}
