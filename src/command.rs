//! Top-level command handlers
//!
//! These are the only places errors are turned into user notifications.
//! Components below them propagate failures without retrying.

use crate::enumerate::FontEnumerator;
use crate::error::{FontPickError, Result};
use crate::flow::{FlowOutcome, SelectionFlow};
use crate::notify::Notifier;
use crate::picker::{run_flow, PickerUi};
use crate::settings::{SettingKeys, SettingsStore};
use log::{info, warn};
use std::io::Write;

/// Enumerate fonts, then run the font and weight pickers.
///
/// Enumeration failures and empty results are reported before any picker
/// is shown or any setting is written. A failure while a picker is open
/// rolls previews back the same way a dismissal does.
pub fn pick_font<E, S, U, N>(
    fonts: &E,
    store: &mut S,
    keys: SettingKeys,
    ui: &mut U,
    notifier: &mut N,
) -> Result<FlowOutcome>
where
    E: FontEnumerator + ?Sized,
    S: SettingsStore,
    U: PickerUi + ?Sized,
    N: Notifier + ?Sized,
{
    let result = (|| -> Result<FlowOutcome> {
        let fonts = fonts.enumerate()?;
        if fonts.is_empty() {
            return Err(FontPickError::EmptyResult);
        }

        let mut flow = SelectionFlow::new(store, keys);
        flow.begin(fonts)?;
        let outcome = run_flow(&mut flow, ui);
        if outcome.is_err() && !flow.stage().is_terminal() {
            // Don't leave a preview behind when the picker fails mid-stage
            if let Err(e) = flow.rollback() {
                warn!("Rollback after failure did not complete: {}", e);
            }
        }
        outcome
    })();

    match &result {
        Ok(FlowOutcome::Committed { font, weight }) => {
            notifier.info(&format!("Font set to {} ({})", font, weight));
        }
        Ok(FlowOutcome::Cancelled) => info!("Font selection cancelled"),
        Err(e) => notifier.error(&e.user_message()),
    }
    result
}

/// Print the installed monospaced fonts, one per line.
pub fn list_fonts<E, W, N>(fonts: &E, out: &mut W, notifier: &mut N) -> Result<usize>
where
    E: FontEnumerator + ?Sized,
    W: Write,
    N: Notifier + ?Sized,
{
    let result = (|| -> Result<usize> {
        let fonts = fonts.enumerate()?;
        if fonts.is_empty() {
            return Err(FontPickError::EmptyResult);
        }
        for name in &fonts {
            writeln!(out, "{}", name)?;
        }
        Ok(fonts.len())
    })();

    if let Err(e) = &result {
        notifier.error(&e.user_message());
    }
    result
}

/// Print the current font-family chain and weight.
pub fn show_current<S, W, N>(
    store: &S,
    keys: &SettingKeys,
    out: &mut W,
    notifier: &mut N,
) -> Result<()>
where
    S: SettingsStore + ?Sized,
    W: Write,
    N: Notifier + ?Sized,
{
    let result = (|| -> Result<()> {
        let family = store.get(&keys.font_family)?;
        let weight = store.get(&keys.font_weight)?;
        writeln!(
            out,
            "Font family: {}",
            family.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(
            out,
            "Font weight: {}",
            weight.as_deref().unwrap_or("(not set)")
        )?;
        Ok(())
    })();

    if let Err(e) = &result {
        notifier.error(&e.user_message());
    }
    result
}
