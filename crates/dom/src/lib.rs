//! # dom
//!
//! The host document the popup layer operates on: an arena tree of elements
//! with string attributes, a small selector engine, lazy ancestor/descendant
//! walks, cancelable named events, and a per-document extension slot.

pub mod debug;
pub mod events;
pub mod selector;
pub mod traverse;

mod document;
mod types;

pub use crate::document::{Document, DomError};
pub use crate::events::{Event, EventInit, ListenerId};
pub use crate::selector::SelectorList;
pub use crate::types::{Attribute, Id, NodeId, NodeKind};

#[cfg(test)]
mod tests;
