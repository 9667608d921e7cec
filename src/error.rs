//! Error handling module for fontpick
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Enumeration failures get their own type so the top-level handler can tell
//! them apart from picker and settings failures.

use std::time::Duration;
use thiserror::Error;

/// Failure while listing the installed fonts.
#[derive(Error, Debug)]
pub enum EnumerationError {
    /// No font source exists for this operating system
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// The font listing command could not be started or read from
    #[error("Failed to run `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The font listing command exited with a failure status
    #[error("`{command}` failed (exit code {code}): {stderr}")]
    ExitStatus {
        command: String,
        code: i32,
        stderr: String,
    },

    /// The command produced more output than we are willing to buffer
    #[error("`{command}` produced more than {limit} bytes of output")]
    OutputTooLarge { command: String, limit: usize },

    /// The command did not finish in time
    #[error("`{command}` did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}

/// Main error type for fontpick
#[derive(Error, Debug)]
pub enum FontPickError {
    /// Font enumeration failed
    #[error("{0}")]
    Enumeration(#[from] EnumerationError),

    /// Enumeration succeeded but nothing usable was found
    #[error("No monospaced fonts found")]
    EmptyResult,

    /// IO errors (settings file, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings store errors (read, write, unexpected layout)
    #[error("Settings error: {0}")]
    Settings(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Selection flow received an event it cannot handle in its current state
    #[error("State error: {0}")]
    State(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for fontpick operations
pub type Result<T> = std::result::Result<T, FontPickError>;

impl FontPickError {
    /// Create a settings error
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a state error
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }

    /// Message shown to the user, never empty.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            msg
        }
    }
}
