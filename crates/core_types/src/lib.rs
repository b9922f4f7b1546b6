use std::cell::Cell;
use std::rc::Rc;

/// Pointer completion event a popup context listens for at the document root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    MouseUp,
    TouchEnd,
}

impl PointerKind {
    pub fn event_name(self) -> &'static str {
        match self {
            PointerKind::MouseUp => "mouseup",
            PointerKind::TouchEnd => "touchend",
        }
    }
}

/// Device classification supplied by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceProfile {
    pub touch: bool,
    pub mobile: bool,
}

impl DeviceProfile {
    /// Touch completion is only used on touch-capable mobile devices; everything
    /// else (including touch laptops) triggers on mouse-up.
    pub fn trigger_kind(self) -> PointerKind {
        if self.touch && self.mobile {
            PointerKind::TouchEnd
        } else {
            PointerKind::MouseUp
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Escape,
    Other(u32),
}

impl KeyCode {
    pub const ESCAPE_CODE: u32 = 27;

    pub fn from_code(code: u32) -> Self {
        if code == Self::ESCAPE_CODE {
            KeyCode::Escape
        } else {
            KeyCode::Other(code)
        }
    }

    pub fn code(self) -> u32 {
        match self {
            KeyCode::Escape => Self::ESCAPE_CODE,
            KeyCode::Other(code) => code,
        }
    }
}

/// Shared handle to the platform touch event behind a synthesized interaction.
///
/// Clones observe the same flag, so a deferred apply can suppress the default
/// action of the event the host still holds.
#[derive(Clone, Debug, Default)]
pub struct TouchHandle {
    prevented: Rc<Cell<bool>>,
}

impl TouchHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&self) {
        self.prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_trigger_requires_mobile() {
        let laptop = DeviceProfile {
            touch: true,
            mobile: false,
        };
        let phone = DeviceProfile {
            touch: true,
            mobile: true,
        };
        assert_eq!(laptop.trigger_kind(), PointerKind::MouseUp);
        assert_eq!(phone.trigger_kind(), PointerKind::TouchEnd);
        assert_eq!(DeviceProfile::default().trigger_kind(), PointerKind::MouseUp);
    }

    #[test]
    fn escape_key_code() {
        assert_eq!(KeyCode::from_code(27), KeyCode::Escape);
        assert_eq!(KeyCode::from_code(13), KeyCode::Other(13));
        assert_eq!(KeyCode::Escape.code(), 27);
    }

    #[test]
    fn touch_handle_clones_share_flag() {
        let handle = TouchHandle::new();
        let held = handle.clone();
        assert!(!held.default_prevented());
        handle.prevent_default();
        assert!(held.default_prevented());
    }
}
