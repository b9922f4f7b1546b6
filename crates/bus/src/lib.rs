use dom::Id;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleKind {
    Open,
    Close,
}

impl LifecycleKind {
    pub fn event_name(self) -> &'static str {
        match self {
            LifecycleKind::Open => "popupopen",
            LifecycleKind::Close => "popupclose",
        }
    }
}

/// Published after the popup layer settles a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupNotice {
    // State machine -> observers
    Opened { popup: Id },
    Closed { popup: Id },
    // A lifecycle listener vetoed the transition
    Canceled { popup: Id, kind: LifecycleKind },
}

impl PopupNotice {
    pub fn popup(&self) -> Id {
        match *self {
            PopupNotice::Opened { popup }
            | PopupNotice::Closed { popup }
            | PopupNotice::Canceled { popup, .. } => popup,
        }
    }
}

pub struct Bus {
    pub notice_tx: Sender<PopupNotice>, // shareable for contexts
    pub notice_rx: Receiver<PopupNotice>,
}

impl Bus {
    pub fn new() -> Self {
        let (notice_tx, notice_rx) = mpsc::channel();
        Self {
            notice_tx,
            notice_rx,
        }
    }

    /// Everything published so far, without blocking.
    pub fn drain(&self) -> Vec<PopupNotice> {
        self.notice_rx.try_iter().collect()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
