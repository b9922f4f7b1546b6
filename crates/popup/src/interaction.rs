use core_types::{KeyCode, PointerKind, TouchHandle};
use dom::Id;

/// A pointer completion resolved to document nodes.
#[derive(Clone, Debug)]
pub struct Interaction {
    pub target: Id,
    /// Element under the finger at touch end, when it differs from `target`.
    pub touch_target: Option<Id>,
    pub touch: Option<TouchHandle>,
}

impl Interaction {
    pub fn new(target: Id) -> Self {
        Self {
            target,
            touch_target: None,
            touch: None,
        }
    }

    pub fn touch(target: Id, touch_target: Option<Id>, handle: TouchHandle) -> Self {
        Self {
            target,
            touch_target,
            touch: Some(handle),
        }
    }

    pub fn effective_target(&self) -> Id {
        self.touch_target.unwrap_or(self.target)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: KeyCode,
    /// Element holding focus when the key was released.
    pub target: Id,
}

/// Events the host forwards from the document root.
#[derive(Clone, Debug)]
pub enum HostEvent {
    Pointer {
        kind: PointerKind,
        interaction: Interaction,
    },
    KeyUp(KeyPress),
}
