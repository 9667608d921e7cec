//! Picker boundary and the event loop that drives a [`SelectionFlow`].
//!
//! A picker turns user input into [`PickerEvent`]s and queues them on a
//! channel. The driver drains the channel into the flow, one stage at a
//! time, and opens a fresh picker whenever the stage changes.

use crate::error::{FontPickError, Result};
use crate::flow::{FlowOutcome, PickerEvent, PickerView, SelectionFlow};
use crate::settings::SettingsStore;
use log::debug;
use std::sync::mpsc::{self, Sender};

/// Interactive single-select list.
pub trait PickerUi {
    /// Show `view`, replacing whatever was shown before.
    fn open(&mut self, view: &PickerView) -> Result<()>;

    /// Wait for the next user input and queue the events it produced.
    fn pump(&mut self, events: &Sender<PickerEvent>) -> Result<()>;

    /// Hide the picker and release what `open` acquired.
    fn close(&mut self);
}

/// An open picker, closed when the guard goes out of scope.
pub struct StageGuard<'a, U: PickerUi + ?Sized> {
    ui: &'a mut U,
}

impl<'a, U: PickerUi + ?Sized> StageGuard<'a, U> {
    pub fn open(ui: &'a mut U, view: &PickerView) -> Result<Self> {
        ui.open(view)?;
        Ok(Self { ui })
    }

    pub fn pump(&mut self, events: &Sender<PickerEvent>) -> Result<()> {
        self.ui.pump(events)
    }
}

impl<U: PickerUi + ?Sized> Drop for StageGuard<'_, U> {
    fn drop(&mut self) {
        self.ui.close();
    }
}

/// Run `flow` (already begun) to a terminal stage using `ui`.
pub fn run_flow<S, U>(flow: &mut SelectionFlow<'_, S>, ui: &mut U) -> Result<FlowOutcome>
where
    S: SettingsStore,
    U: PickerUi + ?Sized,
{
    let (tx, rx) = mpsc::channel();

    while !flow.stage().is_terminal() {
        let stage = flow.stage();
        let view = flow
            .view()
            .ok_or_else(|| FontPickError::state(format!("no picker for stage {}", stage)))?;

        let mut picker = StageGuard::open(ui, &view)?;
        'stage: loop {
            picker.pump(&tx)?;
            while let Ok(event) = rx.try_recv() {
                if flow.handle(event)? != stage {
                    break 'stage;
                }
            }
        }
        drop(picker);

        let stale = rx.try_iter().count();
        if stale > 0 {
            debug!("Discarded {} events queued for the closed {} picker", stale, stage);
        }
    }

    flow.outcome()
        .ok_or_else(|| FontPickError::state("flow ended without an outcome"))
}
