//! Scripted documents and interaction replays.
//!
//! A scenario declares a node tree under `<body>` and a list of steps. Steps
//! run against a virtual clock; with `settle` on, every pointer step also
//! advances the clock by the apply delay so its transition lands before the
//! next step.

use anyhow::{Context, Result, anyhow, bail};
use bus::{Bus, PopupNotice};
use core_types::{KeyCode, PointerKind, TouchHandle};
use dom::{Document, Id, debug};
use popup::{HostEvent, Interaction, KeyPress, PopupConfig, PopupContext};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub config: PopupConfig,
    #[serde(default = "default_settle")]
    pub settle: bool,
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeSpec>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

fn default_settle() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    /// Reference for later `parent` fields; also the `id` attribute unless
    /// `attrs` sets one.
    pub key: String,
    pub parent: Option<String>,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

fn default_tag() -> String {
    "div".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Click(String),
    Tap(String),
    Escape {
        target: Option<String>,
    },
    Key {
        code: u32,
        target: Option<String>,
    },
    Show(String),
    Hide(String),
    Toggle(String),
    HideParent(String),
    HideAll {},
    WaitMs(u64),
    Flush {},
}

impl Step {
    fn describe(&self) -> String {
        match self {
            Step::Click(sel) => format!("click {sel}"),
            Step::Tap(sel) => format!("tap {sel}"),
            Step::Escape { target } => {
                format!("escape on {}", target.as_deref().unwrap_or("body"))
            }
            Step::Key { code, target } => {
                format!("key {code} on {}", target.as_deref().unwrap_or("body"))
            }
            Step::Show(sel) => format!("show {sel}"),
            Step::Hide(sel) => format!("hide {sel}"),
            Step::Toggle(sel) => format!("toggle {sel}"),
            Step::HideParent(sel) => format!("hide-parent {sel}"),
            Step::HideAll {} => "hide-all".to_string(),
            Step::WaitMs(ms) => format!("wait {ms}ms"),
            Step::Flush {} => "flush".to_string(),
        }
    }
}

pub fn build_document(nodes: &[NodeSpec]) -> Result<Document> {
    let mut doc = Document::with_body();
    let body = doc.body().ok_or_else(|| anyhow!("document skeleton has no body"))?;
    let mut keys: HashMap<&str, Id> = HashMap::new();
    for spec in nodes {
        let parent = match spec.parent.as_deref() {
            None | Some("body") => body,
            Some(key) => *keys
                .get(key)
                .ok_or_else(|| anyhow!("node {:?} names unknown parent {key:?}", spec.key))?,
        };
        let id = doc.create_element(&spec.tag);
        if !spec.attrs.contains_key("id") {
            doc.set_attr(id, "id", &spec.key)?;
        }
        for (name, value) in &spec.attrs {
            doc.set_attr(id, name, value)?;
        }
        doc.append_child(parent, id)
            .with_context(|| format!("attaching node {:?}", spec.key))?;
        if keys.insert(&spec.key, id).is_some() {
            bail!("duplicate node key {:?}", spec.key);
        }
    }
    Ok(doc)
}

struct Runner {
    doc: Document,
    popups: PopupContext,
    bus: Bus,
    now: Instant,
    settle: bool,
}

impl Runner {
    fn resolve(&self, selector: &str) -> Result<Id> {
        self.doc
            .query_selector(selector)
            .ok_or_else(|| anyhow!("selector {selector:?} matches nothing"))
    }

    fn focus_target(&self, target: &Option<String>) -> Result<Id> {
        match target {
            Some(selector) => self.resolve(selector),
            None => self
                .doc
                .body()
                .ok_or_else(|| anyhow!("document has no body")),
        }
    }

    fn pointer(&mut self, kind: PointerKind, selector: &str) -> Result<Option<String>> {
        let target = self.resolve(selector)?;
        let interaction = match kind {
            PointerKind::MouseUp => Interaction::new(target),
            PointerKind::TouchEnd => Interaction::touch(target, None, TouchHandle::new()),
        };
        let event = HostEvent::Pointer { kind, interaction };
        if !self.popups.dispatch(&mut self.doc, event, self.now) {
            return Ok(Some(format!(
                "ignored: context listens for {}",
                self.popups.trigger_kind().event_name()
            )));
        }
        if self.settle {
            self.advance(self.popups.config().apply_delay());
        }
        Ok(None)
    }

    fn key(&mut self, code: u32, target: &Option<String>) -> Result<()> {
        let target = self.focus_target(target)?;
        let press = KeyPress {
            key: KeyCode::from_code(code),
            target,
        };
        self.popups
            .dispatch(&mut self.doc, HostEvent::KeyUp(press), self.now);
        Ok(())
    }

    fn advance(&mut self, by: Duration) {
        self.now += by;
        self.popups.run_due(&mut self.doc, self.now);
    }

    fn step(&mut self, step: &Step) -> Result<Option<String>> {
        match step {
            Step::Click(sel) => return self.pointer(PointerKind::MouseUp, sel),
            Step::Tap(sel) => return self.pointer(PointerKind::TouchEnd, sel),
            Step::Escape { target } => self.key(KeyCode::ESCAPE_CODE, target)?,
            Step::Key { code, target } => self.key(*code, target)?,
            Step::Show(sel) => {
                self.popups.show(&mut self.doc, sel.as_str(), false);
            }
            Step::Hide(sel) => {
                self.popups.hide(&mut self.doc, sel.as_str(), false);
            }
            Step::Toggle(sel) => {
                self.popups.toggle(&mut self.doc, sel.as_str(), false);
            }
            Step::HideParent(sel) => {
                let el = self.resolve(sel)?;
                self.popups.hide_parent(&mut self.doc, el, false);
            }
            Step::HideAll {} => {
                self.popups.hide_all(&mut self.doc, false);
            }
            Step::WaitMs(ms) => self.advance(Duration::from_millis(*ms)),
            Step::Flush {} => {
                self.popups.flush(&mut self.doc);
            }
        }
        Ok(None)
    }

    fn stack_line(&self) -> String {
        let labels: Vec<String> = self
            .popups
            .active_stack()
            .into_iter()
            .map(|id| debug::label(&self.doc, id))
            .collect();
        format!("  stack: [{}]", labels.join(", "))
    }

    fn notice_line(&self, notice: PopupNotice) -> String {
        let label = debug::label(&self.doc, notice.popup());
        match notice {
            PopupNotice::Opened { .. } => format!("  opened {label}"),
            PopupNotice::Closed { .. } => format!("  closed {label}"),
            PopupNotice::Canceled { kind, .. } => {
                format!("  {} canceled on {label}", kind.event_name())
            }
        }
    }
}

/// Replay `scenario`, returning the report lines.
pub fn run(scenario: &Scenario) -> Result<(Vec<String>, Document)> {
    let mut doc = build_document(&scenario.nodes)?;
    let bus = Bus::new();
    let popups = PopupContext::attach(&mut doc, scenario.config.clone())
        .context("attaching popup context")?
        .with_notices(bus.notice_tx.clone());
    let mut runner = Runner {
        doc,
        popups,
        bus,
        now: Instant::now(),
        settle: scenario.settle,
    };

    let mut report = Vec::new();
    for (n, step) in scenario.steps.iter().enumerate() {
        report.push(format!("step {}: {}", n + 1, step.describe()));
        if let Some(note) = runner
            .step(step)
            .with_context(|| format!("step {}", n + 1))?
        {
            report.push(format!("  {note}"));
        }
        for notice in runner.bus.drain() {
            report.push(runner.notice_line(notice));
        }
        if runner.popups.pending() > 0 {
            report.push(format!("  pending: {}", runner.popups.pending()));
        }
        report.push(runner.stack_line());
    }
    Ok((report, runner.doc))
}
