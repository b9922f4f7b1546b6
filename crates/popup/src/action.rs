#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PopupState {
    Closed,
    Open,
}

impl PopupState {
    pub fn toggled(self) -> Self {
        match self {
            PopupState::Closed => PopupState::Open,
            PopupState::Open => PopupState::Closed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PopupAction {
    Open,
    Close,
    Toggle,
    /// A popup was hit without any action in play; never transitions.
    None,
}

impl PopupAction {
    /// Declarable values only; `None` is never parsed from markup. Matching
    /// is exact, so `"Open"` or `" open"` read as undeclared.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(PopupAction::Open),
            "close" => Some(PopupAction::Close),
            "toggle" => Some(PopupAction::Toggle),
            _ => None,
        }
    }

    /// `None` when the action does not warrant a transition from `current`.
    pub fn next_state(self, current: PopupState) -> Option<PopupState> {
        match (self, current) {
            (PopupAction::Open, PopupState::Closed) => Some(PopupState::Open),
            (PopupAction::Close, PopupState::Open) => Some(PopupState::Closed),
            (PopupAction::Toggle, state) => Some(state.toggled()),
            _ => None,
        }
    }
}
