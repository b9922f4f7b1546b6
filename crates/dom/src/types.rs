use std::sync::Arc;

pub type NodeId = u32;

/// Stable node identity within one [`Document`](crate::Document).
///
/// Ids are 1-based arena slots; `Id::INVALID` never names a live node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub const INVALID: Id = Id(0);

    pub(crate) fn from_index(index: usize) -> Self {
        Id(index as NodeId + 1)
    }

    pub(crate) fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

pub type Attribute = (Arc<str>, Option<String>);

#[derive(Debug)]
pub enum NodeKind {
    Document,
    Element {
        name: Arc<str>,
        attributes: Vec<Attribute>,
    },
    Text {
        text: String,
    },
}

impl NodeKind {
    pub fn allows_children(&self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::Element { .. })
    }
}
