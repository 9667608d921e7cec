//! Selection Flow State Machine
//!
//! Owns the two-stage font/weight selection and every settings write it
//! causes. UI code never touches the settings store; it only reports
//! [`PickerEvent`]s, which makes preview and rollback order testable with an
//! in-memory store.
//!
//! # Stage Flow
//!
//! ```text
//! Idle
//!   ↓ begin
//! FontPicking ──dismiss──→ Cancelled
//!   ↓ accept      ↑
//!   ↓          dismiss
//! WeightPicking ──┘
//!   ↓ accept
//! Committed
//! ```
//!
//! # Settings writes
//!
//! - Font highlight: preview chain (candidate first) to the font-family key
//! - Weight highlight: preview token to the font-weight key
//! - Weight accept: committed token to the font-weight key
//! - Font dismiss: original values back, when there were any

use crate::error::{FontPickError, Result};
use crate::fallback::{self, FallbackChain};
use crate::settings::{SettingKeys, SettingsStore, WriteKind};
use crate::types::{FontCandidate, FontList, FontWeight};
use log::{debug, info};
use std::fmt;

/// Stages of one selection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Created but not started
    Idle,
    /// Choosing the font family
    FontPicking,
    /// Choosing the weight for the accepted family
    WeightPicking,
    /// Weight accepted (terminal)
    Committed,
    /// Font picker dismissed (terminal)
    Cancelled,
}

impl Stage {
    /// Returns true if no further events are accepted
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Cancelled)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::FontPicking => "Picking font",
            Self::WeightPicking => "Picking weight",
            Self::Committed => "Committed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// User interaction reported by a picker. Indices refer to
/// [`PickerView::items`] of the picker that produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    /// Focus moved to an item without confirming it
    Highlighted(usize),
    /// The user confirmed an item
    Accepted(usize),
    /// The picker was closed without confirming anything
    Dismissed,
}

/// Settings as they were before the flow touched them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginalState {
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
}

/// What a picker should display for the current stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView {
    pub title: String,
    pub placeholder: String,
    pub items: Vec<String>,
    pub highlighted: usize,
}

/// How a finished flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Committed { font: String, weight: FontWeight },
    Cancelled,
}

/// The font then weight selection, driven one event at a time.
pub struct SelectionFlow<'s, S: SettingsStore> {
    store: &'s mut S,
    keys: SettingKeys,
    stage: Stage,
    original: OriginalState,
    candidates: Vec<FontCandidate>,
    font_highlight: usize,
    /// Candidate whose chain was last written as a preview
    previewed_font: Option<usize>,
    weight_highlight: usize,
    weight_previewed: bool,
    chosen_font: Option<String>,
    committed_weight: Option<FontWeight>,
}

impl<'s, S: SettingsStore> SelectionFlow<'s, S> {
    pub fn new(store: &'s mut S, keys: SettingKeys) -> Self {
        Self {
            store,
            keys,
            stage: Stage::Idle,
            original: OriginalState::default(),
            candidates: Vec::new(),
            font_highlight: 0,
            previewed_font: None,
            weight_highlight: 0,
            weight_previewed: false,
            chosen_font: None,
            committed_weight: None,
        }
    }

    /// Snapshot the current settings and open the font stage.
    ///
    /// The active font, if any, is offered first as a "current" entry.
    pub fn begin(&mut self, fonts: FontList) -> Result<()> {
        if self.stage != Stage::Idle {
            return Err(FontPickError::state(format!(
                "cannot begin while {}",
                self.stage
            )));
        }
        if fonts.is_empty() {
            return Err(FontPickError::EmptyResult);
        }

        self.original = OriginalState {
            font_family: self.store.get(&self.keys.font_family)?,
            font_weight: self.store.get(&self.keys.font_weight)?,
        };
        debug!("Original settings: {:?}", self.original);

        let current = self
            .original
            .font_family
            .as_deref()
            .map(FallbackChain::parse)
            .and_then(|chain| chain.active().map(str::to_string));

        self.candidates = current
            .map(FontCandidate::Current)
            .into_iter()
            .chain(fonts.into_iter().map(FontCandidate::Installed))
            .collect();

        self.weight_highlight = self
            .original
            .font_weight
            .as_deref()
            .and_then(|w| w.parse::<FontWeight>().ok())
            .map(FontWeight::index)
            .unwrap_or(0);

        self.transition(Stage::FontPicking);
        Ok(())
    }

    /// Apply one picker event and return the resulting stage.
    pub fn handle(&mut self, event: PickerEvent) -> Result<Stage> {
        match (self.stage, event) {
            (Stage::FontPicking, PickerEvent::Highlighted(index)) => {
                self.candidate(index)?;
                self.font_highlight = index;
                self.preview_font(index)?;
            }
            (Stage::FontPicking, PickerEvent::Accepted(index)) => {
                let name = self.candidate(index)?.font_name().to_string();
                self.font_highlight = index;
                if self.previewed_font != Some(index) {
                    self.preview_font(index)?;
                }
                info!("Font accepted: {}", name);
                self.chosen_font = Some(name);
                self.transition(Stage::WeightPicking);
            }
            (Stage::FontPicking, PickerEvent::Dismissed) => {
                self.rollback()?;
                self.transition(Stage::Cancelled);
            }
            (Stage::WeightPicking, PickerEvent::Highlighted(index)) => {
                let weight = weight_at(index)?;
                self.weight_highlight = index;
                self.store
                    .set(&self.keys.font_weight, &weight.to_string(), WriteKind::Preview)?;
                self.weight_previewed = true;
                debug!("Previewing weight {}", weight);
            }
            (Stage::WeightPicking, PickerEvent::Accepted(index)) => {
                let weight = weight_at(index)?;
                self.weight_highlight = index;
                self.store
                    .set(&self.keys.font_weight, &weight.to_string(), WriteKind::Commit)?;
                info!(
                    "Committed {} weight {}",
                    self.chosen_font.as_deref().unwrap_or_default(),
                    weight
                );
                self.committed_weight = Some(weight);
                self.transition(Stage::Committed);
            }
            (Stage::WeightPicking, PickerEvent::Dismissed) => {
                self.transition(Stage::FontPicking);
            }
            (stage, event) => {
                return Err(FontPickError::state(format!(
                    "{:?} is not valid while {}",
                    event, stage
                )));
            }
        }
        Ok(self.stage)
    }

    /// Put back the settings captured by [`SelectionFlow::begin`].
    ///
    /// Only values that existed and were changed are written back, so a
    /// second rollback (or one after no preview at all) writes nothing.
    pub fn rollback(&mut self) -> Result<()> {
        if let Some(family) = self.original.font_family.clone() {
            let key = self.keys.font_family.clone();
            self.restore(&key, &family)?;
        }
        if self.weight_previewed {
            if let Some(weight) = self.original.font_weight.clone() {
                let key = self.keys.font_weight.clone();
                self.restore(&key, &weight)?;
            }
        }
        Ok(())
    }

    /// Write `original` back unless the store already holds it.
    fn restore(&mut self, key: &str, original: &str) -> Result<()> {
        if self.store.get(key)?.as_deref() == Some(original) {
            debug!("{} already holds its original value", key);
            return Ok(());
        }
        info!("Restoring {}: {}", key, original);
        self.store.set(key, original, WriteKind::Rollback)
    }

    /// Picker contents for the current stage, if a picker should be shown.
    pub fn view(&self) -> Option<PickerView> {
        match self.stage {
            Stage::FontPicking => Some(PickerView {
                title: "Select Font".to_string(),
                placeholder: "Type to filter installed monospaced fonts".to_string(),
                items: self.candidates.iter().map(FontCandidate::label).collect(),
                highlighted: self.font_highlight,
            }),
            Stage::WeightPicking => Some(PickerView {
                title: "Select Font Weight".to_string(),
                placeholder: format!(
                    "Weight for {}",
                    self.chosen_font.as_deref().unwrap_or_default()
                ),
                items: FontWeight::all().iter().map(ToString::to_string).collect(),
                highlighted: self.weight_highlight,
            }),
            _ => None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn original(&self) -> &OriginalState {
        &self.original
    }

    pub fn candidates(&self) -> &[FontCandidate] {
        &self.candidates
    }

    pub fn font_highlight(&self) -> usize {
        self.font_highlight
    }

    /// Final result once the flow reached a terminal stage.
    pub fn outcome(&self) -> Option<FlowOutcome> {
        match self.stage {
            Stage::Committed => Some(FlowOutcome::Committed {
                font: self.chosen_font.clone().unwrap_or_default(),
                weight: self.committed_weight.unwrap_or_default(),
            }),
            Stage::Cancelled => Some(FlowOutcome::Cancelled),
            _ => None,
        }
    }

    fn candidate(&self, index: usize) -> Result<&FontCandidate> {
        self.candidates.get(index).ok_or_else(|| {
            FontPickError::state(format!(
                "font index {} out of range ({} entries)",
                index,
                self.candidates.len()
            ))
        })
    }

    fn preview_font(&mut self, index: usize) -> Result<()> {
        let name = self.candidate(index)?.font_name().to_string();
        let value = fallback::preview_value(self.original.font_family.as_deref(), &name);
        debug!("Previewing font family: {}", value);
        self.store
            .set(&self.keys.font_family, &value, WriteKind::Preview)?;
        self.previewed_font = Some(index);
        Ok(())
    }

    fn transition(&mut self, to: Stage) {
        debug!("Selection flow: {} -> {}", self.stage, to);
        self.stage = to;
    }
}

fn weight_at(index: usize) -> Result<FontWeight> {
    FontWeight::all().get(index).copied().ok_or_else(|| {
        FontPickError::state(format!("weight index {} out of range", index))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;

    const FAMILY: &str = "editor.fontFamily";
    const WEIGHT: &str = "editor.fontWeight";

    fn fonts(names: &[&str]) -> FontList {
        names.iter().copied().collect()
    }

    #[test]
    fn test_begin_prepends_current_font() {
        let mut store = MemorySettings::new().with(FAMILY, "'Fira Code', Menlo");
        let mut flow = SelectionFlow::new(&mut store, SettingKeys::default());
        flow.begin(fonts(&["Hack", "Menlo"])).unwrap();

        assert_eq!(flow.stage(), Stage::FontPicking);
        let view = flow.view().unwrap();
        assert_eq!(view.items, ["Fira Code (current)", "Hack", "Menlo"]);
        assert_eq!(view.highlighted, 0);
    }

    #[test]
    fn test_begin_without_setting_has_no_marker() {
        let mut store = MemorySettings::new();
        let mut flow = SelectionFlow::new(&mut store, SettingKeys::default());
        flow.begin(fonts(&["Hack"])).unwrap();
        assert_eq!(flow.candidates(), [FontCandidate::Installed("Hack".into())]);
        assert_eq!(flow.original(), &OriginalState::default());
    }

    #[test]
    fn test_begin_rejects_empty_list() {
        let mut store = MemorySettings::new();
        let mut flow = SelectionFlow::new(&mut store, SettingKeys::default());
        assert!(matches!(
            flow.begin(FontList::new()),
            Err(FontPickError::EmptyResult)
        ));
        assert_eq!(flow.stage(), Stage::Idle);
        drop(flow);
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_weight_highlight_starts_at_current_weight() {
        let mut store = MemorySettings::new().with(WEIGHT, "300");
        let mut flow = SelectionFlow::new(&mut store, SettingKeys::default());
        flow.begin(fonts(&["Hack"])).unwrap();
        flow.handle(PickerEvent::Accepted(0)).unwrap();
        assert_eq!(flow.view().unwrap().highlighted, 4);
    }

    #[test]
    fn test_accepting_unpreviewed_font_writes_its_chain() {
        let mut store = MemorySettings::new().with(FAMILY, "Menlo");
        let mut flow = SelectionFlow::new(&mut store, SettingKeys::default());
        flow.begin(fonts(&["Hack", "Iosevka"])).unwrap();
        flow.handle(PickerEvent::Highlighted(1)).unwrap();
        flow.handle(PickerEvent::Accepted(2)).unwrap();
        drop(flow);
        assert_eq!(store.value(FAMILY), Some("Iosevka, Menlo"));
    }

    #[test]
    fn test_out_of_range_index_is_a_state_error() {
        let mut store = MemorySettings::new();
        let mut flow = SelectionFlow::new(&mut store, SettingKeys::default());
        flow.begin(fonts(&["Hack"])).unwrap();
        assert!(matches!(
            flow.handle(PickerEvent::Highlighted(5)),
            Err(FontPickError::State(_))
        ));
        assert_eq!(flow.stage(), Stage::FontPicking);
    }

    #[test]
    fn test_events_before_begin_are_rejected() {
        let mut store = MemorySettings::new();
        let mut flow = SelectionFlow::new(&mut store, SettingKeys::default());
        assert!(flow.handle(PickerEvent::Dismissed).is_err());
    }

    #[test]
    fn test_terminal_stages() {
        assert!(Stage::Committed.is_terminal());
        assert!(Stage::Cancelled.is_terminal());
        assert!(!Stage::WeightPicking.is_terminal());
        assert_eq!(Stage::FontPicking.to_string(), "Picking font");
    }
}
