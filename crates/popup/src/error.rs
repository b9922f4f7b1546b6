use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopupError {
    /// A configured selector (or an attribute name turned into one) does not parse.
    InvalidSelector {
        field: &'static str,
        selector: String,
    },
}

impl fmt::Display for PopupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopupError::InvalidSelector { field, selector } => {
                write!(f, "invalid selector for {field}: {selector:?}")
            }
        }
    }
}

impl std::error::Error for PopupError {}
