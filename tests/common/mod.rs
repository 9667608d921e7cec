//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use fontpick::error::Result;
use fontpick::{EnumerationError, FontEnumerator, FontList, FontPickError, Notifier};
use fontpick::{PickerEvent, PickerUi, PickerView};
use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::mpsc::Sender;

/// Enumerator returning a fixed list, or failing with a non-zero exit.
pub struct FakeFonts {
    fonts: Option<Vec<&'static str>>,
    pub calls: Cell<usize>,
}

impl FakeFonts {
    pub fn with(fonts: &[&'static str]) -> Self {
        Self {
            fonts: Some(fonts.to_vec()),
            calls: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fonts: None,
            calls: Cell::new(0),
        }
    }
}

impl FontEnumerator for FakeFonts {
    fn enumerate(&self) -> std::result::Result<FontList, EnumerationError> {
        self.calls.set(self.calls.get() + 1);
        match &self.fonts {
            Some(fonts) => Ok(fonts.iter().copied().collect()),
            None => Err(EnumerationError::ExitStatus {
                command: "fc-list".to_string(),
                code: 127,
                stderr: "fc-list: not found".to_string(),
            }),
        }
    }
}

/// Picker that replays scripted input, one batch of events per pump.
///
/// Pumping past the end of the script fails, like a terminal that went away.
#[derive(Default)]
pub struct ScriptedPicker {
    pub script: VecDeque<Vec<PickerEvent>>,
    pub opened: Vec<PickerView>,
    pub closes: usize,
    pub is_open: bool,
    pub fail_open: bool,
}

impl ScriptedPicker {
    /// One event per pump.
    pub fn new(events: &[PickerEvent]) -> Self {
        Self {
            script: events.iter().map(|e| vec![*e]).collect(),
            ..Self::default()
        }
    }

    /// Several events delivered by a single pump.
    pub fn batched(batches: Vec<Vec<PickerEvent>>) -> Self {
        Self {
            script: batches.into(),
            ..Self::default()
        }
    }

    pub fn titles(&self) -> Vec<&str> {
        self.opened.iter().map(|v| v.title.as_str()).collect()
    }
}

impl PickerUi for ScriptedPicker {
    fn open(&mut self, view: &PickerView) -> Result<()> {
        if self.fail_open {
            return Err(FontPickError::terminal("no terminal"));
        }
        assert!(!self.is_open, "picker opened twice without close");
        self.is_open = true;
        self.opened.push(view.clone());
        Ok(())
    }

    fn pump(&mut self, events: &Sender<PickerEvent>) -> Result<()> {
        let batch = self
            .script
            .pop_front()
            .ok_or_else(|| FontPickError::terminal("input closed"))?;
        for event in batch {
            events
                .send(event)
                .map_err(|_| FontPickError::general("queue closed"))?;
        }
        Ok(())
    }

    fn close(&mut self) {
        self.is_open = false;
        self.closes += 1;
    }
}

/// Notifier that keeps every message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub errors: Vec<String>,
    pub infos: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }
}
