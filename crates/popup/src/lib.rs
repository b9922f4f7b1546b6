//! # popup
//!
//! Open/close coordination for popups authored in a document tree.
//!
//! Popups are elements carrying a state attribute. Interactions forwarded
//! from the document root resolve to an acting popup and an action; before
//! that action applies, the cascade closes whatever the interaction
//! displaces:
//! - a click on a mask closes every open popup inside the mask;
//! - any other click closes the open popups in the target's group (bounded by
//!   the nearest mask, or `<body>`) except the acting popup and its ancestors.
//!
//! Every open popup is tracked in a per-document active stack, which lets
//! Escape close the innermost, most recently opened popup first.
//!
//! ```ignore
//! let mut doc = dom::Document::with_body();
//! // ... author popups, masks and triggers ...
//! let mut popups = PopupContext::attach(&mut doc, PopupConfig::default())?;
//! popups.dispatch(&mut doc, HostEvent::Pointer { kind, interaction }, now);
//! popups.run_due(&mut doc, now + popups.config().apply_delay());
//! ```

mod action;
mod api;
mod cascade;
mod classify;
mod config;
mod context;
mod error;
mod group;
mod interaction;
mod keyboard;
mod lifecycle;
mod registry;
mod schedule;
mod stack;

pub use action::{PopupAction, PopupState};
pub use api::Target;
pub use bus::{LifecycleKind, PopupNotice};
pub use cascade::{Resolution, resolve_acting};
pub use classify::Classifier;
pub use config::{ApplyMode, PopupConfig};
pub use context::{PopupContext, Transition};
pub use error::PopupError;
pub use group::{resolve_group, scope_chain};
pub use interaction::{HostEvent, Interaction, KeyPress};
pub use lifecycle::{emit as emit_lifecycle, listen as listen_lifecycle};
pub use registry::{Registry, registry};
pub use stack::ActiveStack;
