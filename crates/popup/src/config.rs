use core_types::DeviceProfile;
use std::time::Duration;

/// How the acting popup's transition is sequenced after the cascade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ApplyMode {
    /// Queue the transition for `apply_delay` after the interaction; the host
    /// drives it with [`PopupContext::run_due`](crate::PopupContext::run_due).
    #[default]
    Deferred,
    /// Apply right after the cascade, inside the same call.
    Immediate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopupConfig {
    /// Presence marks a popup; `open_value` means open, anything else closed.
    pub state_attr: String,
    pub open_value: String,
    pub action_attr: String,
    pub target_attr: String,
    pub mask_selector: String,
    pub apply_delay_ms: u64,
    pub apply_mode: ApplyMode,
    pub lifecycle_bubbles: bool,
    /// Key presses targeting these elements never close popups.
    pub text_entry_tags: Vec<String>,
    pub device: DeviceProfile,
}

impl PopupConfig {
    pub fn apply_delay(&self) -> Duration {
        Duration::from_millis(self.apply_delay_ms)
    }

    pub fn immediate(mut self) -> Self {
        self.apply_mode = ApplyMode::Immediate;
        self
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            state_attr: "eagle-popup".to_string(),
            open_value: "popup".to_string(),
            action_attr: "popup-action".to_string(),
            target_attr: "popup-target".to_string(),
            mask_selector: ".modal-mask, [eagle-popup-mask]".to_string(),
            apply_delay_ms: 10,
            apply_mode: ApplyMode::Deferred,
            lifecycle_bubbles: false,
            text_entry_tags: vec!["input".to_string(), "textarea".to_string()],
            device: DeviceProfile::default(),
        }
    }
}
