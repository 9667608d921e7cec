//! Editor settings access
//!
//! The selection flow only ever touches two string settings: the font-family
//! fallback chain and the font weight. Writes are tagged with a [`WriteKind`]
//! so stores and tests can tell a live preview from a committed choice or a
//! rollback.

use crate::error::{FontPickError, Result};
use log::debug;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Why a setting is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteKind {
    /// Tentative value for the highlighted entry
    Preview,
    /// Value the user accepted
    Commit,
    /// Original value put back after cancellation
    Rollback,
}

/// Names of the two settings the flow reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingKeys {
    pub font_family: String,
    pub font_weight: String,
}

impl Default for SettingKeys {
    fn default() -> Self {
        Self {
            font_family: "editor.fontFamily".to_string(),
            font_weight: "editor.fontWeight".to_string(),
        }
    }
}

/// Global key-value settings of the editor.
pub trait SettingsStore {
    /// Current value, or `None` when unset.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`. Must be visible to the editor on return.
    fn set(&mut self, key: &str, value: &str, kind: WriteKind) -> Result<()>;
}

/// One recorded write to a [`MemorySettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingWrite {
    pub key: String,
    pub value: String,
    pub kind: WriteKind,
}

/// In-memory store that records every write.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
    writes: Vec<SettingWrite>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seed value (not recorded as a write)
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn writes(&self) -> &[SettingWrite] {
        &self.writes
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str, kind: WriteKind) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes.push(SettingWrite {
            key: key.to_string(),
            value: value.to_string(),
            kind,
        });
        Ok(())
    }
}

/// Settings kept in a JSON object file, such as an editor's `settings.json`.
///
/// Every write rewrites the whole file so a watching editor applies previews
/// immediately. Keys other than the ones written are preserved, in their
/// original order.
#[derive(Debug, Clone)]
pub struct JsonSettings {
    path: PathBuf,
    root: Map<String, Value>,
}

impl JsonSettings {
    /// Load the file at `path`. A missing or blank file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let root = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Map::new()
            } else {
                match serde_json::from_str::<Value>(&content) {
                    Ok(Value::Object(map)) => map,
                    Ok(_) => {
                        return Err(FontPickError::settings(format!(
                            "{} does not contain a JSON object",
                            path.display()
                        )));
                    }
                    Err(e) => {
                        return Err(FontPickError::settings(format!(
                            "{} is not plain JSON ({}); comments and trailing commas are not supported",
                            path.display(),
                            e
                        )));
                    }
                }
            }
        } else {
            debug!("Settings file {} does not exist yet", path.display());
            Map::new()
        };

        Ok(Self { path, root })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to a temp file beside the target and rename it into place, so a
    /// watching editor never reads a half-written file.
    fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut json = serde_json::to_string_pretty(&self.root)?;
        json.push('\n');

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        if let Ok(meta) = fs::metadata(&self.path) {
            file.as_file().set_permissions(meta.permissions())?;
        }
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl SettingsStore for JsonSettings {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .root
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str, kind: WriteKind) -> Result<()> {
        debug!("{:?} write {} = {:?} in {}", kind, key, value, self.path.display());
        self.root
            .insert(key.to_string(), Value::String(value.to_string()));
        self.save()
    }
}
