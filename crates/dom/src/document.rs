use crate::events::{Event, EventInit, EventListeners, ListenerId};
use crate::selector::SelectorList;
use crate::traverse::{Ancestors, Descendants};
use crate::types::{Attribute, Id, NodeKind};
use std::any::{Any, TypeId};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomError {
    UnknownNode(Id),
    WrongNodeKind(Id),
    InvalidParent(Id),
    CycleDetected { parent: Id, child: Id },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::UnknownNode(id) => write!(f, "unknown node {}", id.0),
            DomError::WrongNodeKind(id) => write!(f, "node {} has the wrong kind", id.0),
            DomError::InvalidParent(id) => write!(f, "node {} cannot take this child", id.0),
            DomError::CycleDetected { parent, child } => {
                write!(f, "appending {} under {} would create a cycle", child.0, parent.0)
            }
        }
    }
}

impl std::error::Error for DomError {}

pub(crate) struct NodeRecord {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<Id>,
    pub(crate) children: Vec<Id>,
}

/// A live, mutable document tree.
///
/// Nodes are never removed; the popup layer only flips attributes on nodes
/// that the host authored up front.
pub struct Document {
    nodes: Vec<NodeRecord>,
    root: Id,
    listeners: EventListeners,
    extensions: HashMap<TypeId, Rc<dyn Any>>,
    /// Last `body()` answer; cleared whenever the tree shape changes.
    body: Cell<Option<Id>>,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: Id::INVALID,
            listeners: EventListeners::default(),
            extensions: HashMap::new(),
            body: Cell::new(None),
        };
        doc.root = doc.push_node(NodeKind::Document);
        doc
    }

    /// Document with an `html > body` skeleton already in place.
    pub fn with_body() -> Self {
        let mut doc = Self::new();
        let html = doc.create_element("html");
        let body = doc.create_element("body");
        // Fresh nodes under a fresh root cannot violate any append rule.
        let _ = doc.append_child(doc.root, html);
        let _ = doc.append_child(html, body);
        doc
    }

    pub fn root(&self) -> Id {
        self.root
    }

    /// First `<body>` element in document order.
    pub fn body(&self) -> Option<Id> {
        if let Some(body) = self.body.get() {
            return Some(body);
        }
        let found = self
            .descendants(self.root)
            .find(|&id| self.tag_name(id).is_some_and(|n| n.eq_ignore_ascii_case("body")));
        self.body.set(found);
        found
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn create_element(&mut self, name: &str) -> Id {
        self.push_node(NodeKind::Element {
            name: Arc::from(name.to_ascii_lowercase()),
            attributes: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> Id {
        self.push_node(NodeKind::Text {
            text: text.to_string(),
        })
    }

    fn push_node(&mut self, kind: NodeKind) -> Id {
        let id = Id::from_index(self.nodes.len());
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn append_child(&mut self, parent: Id, child: Id) -> Result<(), DomError> {
        let parent_index = self.index_of(parent)?;
        let child_index = self.index_of(child)?;
        if parent == child || self.contains(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        if !self.nodes[parent_index].kind.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        if self.nodes[child_index].parent.is_some() || child == self.root {
            return Err(DomError::InvalidParent(child));
        }
        self.nodes[parent_index].children.push(child);
        self.nodes[child_index].parent = Some(parent);
        self.body.set(None);
        Ok(())
    }

    pub(crate) fn record(&self, id: Id) -> Option<&NodeRecord> {
        id.index().and_then(|index| self.nodes.get(index))
    }

    fn index_of(&self, id: Id) -> Result<usize, DomError> {
        id.index()
            .filter(|&index| index < self.nodes.len())
            .ok_or(DomError::UnknownNode(id))
    }

    pub fn exists(&self, id: Id) -> bool {
        self.record(id).is_some()
    }

    pub fn kind(&self, id: Id) -> Option<&NodeKind> {
        self.record(id).map(|r| &r.kind)
    }

    pub fn is_element(&self, id: Id) -> bool {
        matches!(self.kind(id), Some(NodeKind::Element { .. }))
    }

    pub fn tag_name(&self, id: Id) -> Option<&str> {
        match self.kind(id) {
            Some(NodeKind::Element { name, .. }) => Some(name),
            _ => None,
        }
    }

    pub fn text(&self, id: Id) -> Option<&str> {
        match self.kind(id) {
            Some(NodeKind::Text { text }) => Some(text),
            _ => None,
        }
    }

    pub fn attributes(&self, id: Id) -> &[Attribute] {
        match self.kind(id) {
            Some(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    /// Attribute value; a valueless attribute reads as the empty string.
    pub fn attr(&self, id: Id, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, id: Id, name: &str) -> bool {
        self.attributes(id)
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    pub fn set_attr(&mut self, id: Id, name: &str, value: &str) -> Result<(), DomError> {
        let index = self.index_of(id)?;
        let NodeKind::Element { attributes, .. } = &mut self.nodes[index].kind else {
            return Err(DomError::WrongNodeKind(id));
        };
        match attributes.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some((_, existing)) => *existing = Some(value.to_string()),
            None => attributes.push((Arc::from(name.to_ascii_lowercase()), Some(value.to_string()))),
        }
        Ok(())
    }

    /// Returns `true` if the attribute was present.
    pub fn remove_attr(&mut self, id: Id, name: &str) -> Result<bool, DomError> {
        let index = self.index_of(id)?;
        let NodeKind::Element { attributes, .. } = &mut self.nodes[index].kind else {
            return Err(DomError::WrongNodeKind(id));
        };
        let before = attributes.len();
        attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        Ok(attributes.len() != before)
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.record(id).and_then(|r| r.parent)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.record(id).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    /// `id` followed by each of its ancestors, ending at the document node.
    pub fn ancestors(&self, id: Id) -> Ancestors<'_> {
        Ancestors::new(self, id)
    }

    /// Strict descendants of `scope` in document order.
    pub fn descendants(&self, scope: Id) -> Descendants<'_> {
        Descendants::new(self, scope)
    }

    /// Inclusive: a node contains itself.
    pub fn contains(&self, ancestor: Id, node: Id) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    pub fn matches(&self, id: Id, selectors: &SelectorList) -> bool {
        match self.kind(id) {
            Some(NodeKind::Element { name, attributes }) => selectors.matches(name, attributes),
            _ => false,
        }
    }

    /// First element in the document matching `selector`.
    ///
    /// An unparseable selector matches nothing.
    pub fn query_selector(&self, selector: &str) -> Option<Id> {
        let Some(list) = SelectorList::parse(selector) else {
            log::debug!(target: "dom.query", "unsupported selector {selector:?}");
            return None;
        };
        self.query_selector_in(self.root, &list)
    }

    pub fn query_selector_in(&self, scope: Id, selectors: &SelectorList) -> Option<Id> {
        self.descendants(scope).find(|&id| self.matches(id, selectors))
    }

    pub fn query_selector_all_in(&self, scope: Id, selectors: &SelectorList) -> Vec<Id> {
        self.descendants(scope)
            .filter(|&id| self.matches(id, selectors))
            .collect()
    }

    pub fn add_listener<F>(&mut self, node: Id, name: &str, handler: F) -> ListenerId
    where
        F: FnMut(&mut Event) + 'static,
    {
        self.listeners.add(node, name, Box::new(handler))
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Dispatch `name` at `target`.
    ///
    /// Returns `false` iff the event was cancelable and a listener called
    /// [`Event::prevent_default`].
    pub fn dispatch_event(&mut self, target: Id, name: &str, init: EventInit) -> bool {
        let path: Vec<Id> = if init.bubbles {
            self.ancestors(target).collect()
        } else {
            self.exists(target).then_some(target).into_iter().collect()
        };
        let mut event = Event::new(name, target, init);
        for node in path {
            event.set_current_target(node);
            self.listeners.invoke(node, &mut event);
            if event.propagation_stopped() {
                break;
            }
        }
        !event.default_prevented()
    }

    pub fn extension<T: Any>(&self) -> Option<Rc<T>> {
        self.extensions
            .get(&TypeId::of::<T>())
            .and_then(|ext| Rc::clone(ext).downcast::<T>().ok())
    }

    /// Attach a per-document value keyed by its type, returning any previous one.
    pub fn insert_extension<T: Any>(&mut self, value: Rc<T>) -> Option<Rc<T>> {
        self.extensions
            .insert(TypeId::of::<T>(), value)
            .and_then(|prev| prev.downcast::<T>().ok())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .field("extensions", &self.extensions.len())
            .finish()
    }
}
