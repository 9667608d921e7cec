//! fontpick Library
//!
//! Lists the monospaced fonts installed on this machine and lets the user
//! pick one (and a weight) for their editor, previewing each highlighted
//! choice live and restoring the old setting when the pick is cancelled.

pub mod cli;
pub mod command;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod fallback;
pub mod flow;
pub mod notify;
pub mod picker;
pub mod settings;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use command::{list_fonts, pick_font, show_current};
pub use config::AppConfig;
pub use enumerate::{
    CommandRunner, CommandSpec, FontEnumerator, FontSource, PlatformFonts, SystemRunner,
};
pub use error::{EnumerationError, FontPickError};
pub use fallback::{preview_value, FallbackChain};
pub use flow::{FlowOutcome, OriginalState, PickerEvent, PickerView, SelectionFlow, Stage};
pub use notify::{Notifier, StderrNotifier};
pub use picker::{run_flow, PickerUi, StageGuard};
pub use settings::{
    JsonSettings, MemorySettings, SettingKeys, SettingWrite, SettingsStore, WriteKind,
};
pub use types::{FontCandidate, FontList, FontName, FontWeight};
pub use ui::TerminalPicker;
