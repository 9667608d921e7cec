//! Core value types shared by the enumerator and the selection flow.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Font family name as reported by the operating system.
pub type FontName = String;

/// Ordered list of unique font names, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontList {
    names: Vec<FontName>,
    seen: HashSet<FontName>,
}

impl FontList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless it is already present. Returns true if it was added.
    pub fn push(&mut self, name: impl Into<FontName>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.names.push(name);
        true
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn as_slice(&self) -> &[FontName] {
        &self.names
    }

    pub fn into_vec(self) -> Vec<FontName> {
        self.names
    }
}

impl<S: Into<FontName>> FromIterator<S> for FontList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = FontList::new();
        for name in iter {
            list.push(name);
        }
        list
    }
}

impl IntoIterator for FontList {
    type Item = FontName;
    type IntoIter = std::vec::IntoIter<FontName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

impl<'a> IntoIterator for &'a FontList {
    type Item = &'a FontName;
    type IntoIter = std::slice::Iter<'a, FontName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Font weight tokens accepted by the editor, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum FontWeight {
    #[default]
    #[strum(serialize = "normal")]
    #[serde(rename = "normal")]
    Normal,
    #[strum(serialize = "bold")]
    #[serde(rename = "bold")]
    Bold,
    #[strum(serialize = "100")]
    #[serde(rename = "100")]
    W100,
    #[strum(serialize = "200")]
    #[serde(rename = "200")]
    W200,
    #[strum(serialize = "300")]
    #[serde(rename = "300")]
    W300,
    #[strum(serialize = "400")]
    #[serde(rename = "400")]
    W400,
    #[strum(serialize = "500")]
    #[serde(rename = "500")]
    W500,
    #[strum(serialize = "600")]
    #[serde(rename = "600")]
    W600,
    #[strum(serialize = "700")]
    #[serde(rename = "700")]
    W700,
    #[strum(serialize = "800")]
    #[serde(rename = "800")]
    W800,
    #[strum(serialize = "900")]
    #[serde(rename = "900")]
    W900,
}

impl FontWeight {
    /// All weights in the order they are offered to the user
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Position of this weight in [`FontWeight::all`]
    pub fn index(self) -> usize {
        Self::iter().position(|w| w == self).unwrap_or(0)
    }
}

/// Suffix appended to the label of the synthetic "current font" entry.
pub const CURRENT_MARKER: &str = " (current)";

/// One entry of the font picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontCandidate {
    /// The font that is active right now, listed first so it can be re-selected
    Current(FontName),
    /// A font reported by the enumerator
    Installed(FontName),
}

impl FontCandidate {
    /// Text shown in the picker
    pub fn label(&self) -> String {
        match self {
            Self::Current(name) => format!("{name}{CURRENT_MARKER}"),
            Self::Installed(name) => name.clone(),
        }
    }

    /// The real font name with any marker decoration removed
    pub fn font_name(&self) -> &str {
        match self {
            Self::Current(name) | Self::Installed(name) => name,
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, Self::Current(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_list_keeps_first_seen_order() {
        let list: FontList = ["Hack", "Fira Code", "Hack", "Iosevka"].into_iter().collect();
        assert_eq!(list.as_slice(), ["Hack", "Fira Code", "Iosevka"]);
        assert!(list.contains("Iosevka"));
        assert!(!list.contains("Menlo"));
    }

    #[test]
    fn test_font_list_push_reports_duplicates() {
        let mut list = FontList::new();
        assert!(list.push("Hack"));
        assert!(!list.push("Hack"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_weight_order_matches_editor_tokens() {
        let tokens: Vec<String> = FontWeight::all().iter().map(|w| w.to_string()).collect();
        assert_eq!(
            tokens,
            ["normal", "bold", "100", "200", "300", "400", "500", "600", "700", "800", "900"]
        );
    }

    #[test]
    fn test_weight_parse_and_index() {
        let w: FontWeight = "600".parse().expect("Should parse");
        assert_eq!(w, FontWeight::W600);
        assert_eq!(w.index(), 7);
        assert!("heavy".parse::<FontWeight>().is_err());
    }

    #[test]
    fn test_current_candidate_label_and_name() {
        let c = FontCandidate::Current("Fira Code".into());
        assert_eq!(c.label(), "Fira Code (current)");
        assert_eq!(c.font_name(), "Fira Code");
        assert!(c.is_current());

        let c = FontCandidate::Installed("Hack".into());
        assert_eq!(c.label(), "Hack");
        assert!(!c.is_current());
    }
}
