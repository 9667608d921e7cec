//! Font-family fallback chain handling
//!
//! The editor stores its font family as a comma-separated list of family
//! names. The first entry is the active font; the rest are fallbacks used
//! when a glyph is missing. Entries may be quoted (`'Fira Code'`), which the
//! editor treats the same as the bare name.

use std::fmt;

/// Parsed font-family setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackChain {
    entries: Vec<String>,
}

impl FallbackChain {
    /// Parse a comma-separated setting value. Empty entries are dropped.
    pub fn parse(value: &str) -> Self {
        let entries = value
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The font the editor renders with, quotes removed
    pub fn active(&self) -> Option<&str> {
        self.entries.first().map(|e| unquote(e))
    }

    /// Chain with `candidate` first and the remaining entries deduplicated.
    ///
    /// Entries equal to the candidate (ignoring quotes) are dropped, then
    /// later repeats of any entry are dropped, keeping the first occurrence.
    /// A candidate already in the chain keeps that entry's spelling, quotes
    /// included.
    pub fn with_front(&self, candidate: &str) -> Self {
        let front = self
            .entries
            .iter()
            .find(|entry| unquote(entry) == candidate)
            .cloned()
            .unwrap_or_else(|| candidate.to_string());
        let mut entries = vec![front];
        for entry in &self.entries {
            let name = unquote(entry);
            if entries.iter().any(|kept| unquote(kept) == name) {
                continue;
            }
            entries.push(entry.clone());
        }
        Self { entries }
    }
}

impl fmt::Display for FallbackChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entries.join(", "))
    }
}

/// Strip one layer of matching single or double quotes.
fn unquote(entry: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = entry
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    entry
}

/// Preview value for `candidate` given the original setting value.
pub fn preview_value(original: Option<&str>, candidate: &str) -> String {
    FallbackChain::parse(original.unwrap_or_default())
        .with_front(candidate)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_font_goes_in_front() {
        assert_eq!(
            preview_value(Some("Consolas, Courier New"), "Fira Code"),
            "Fira Code, Consolas, Courier New"
        );
    }

    #[test]
    fn test_existing_font_moves_to_front() {
        assert_eq!(
            preview_value(Some("Fira Code, Consolas"), "Consolas"),
            "Consolas, Fira Code"
        );
    }

    #[test]
    fn test_quoted_entry_counts_as_duplicate() {
        assert_eq!(
            preview_value(Some("Menlo, 'Fira Code', monospace"), "Fira Code"),
            "'Fira Code', Menlo, monospace"
        );
    }

    #[test]
    fn test_active_entry_keeps_its_spelling() {
        assert_eq!(
            preview_value(Some("'Fira Code', Menlo"), "Fira Code"),
            "'Fira Code', Menlo"
        );
        assert_eq!(
            preview_value(Some("\"JetBrains Mono\", Menlo"), "Menlo"),
            "Menlo, \"JetBrains Mono\""
        );
    }

    #[test]
    fn test_repeated_fallbacks_collapse() {
        assert_eq!(
            preview_value(Some("Menlo, Hack, Menlo, , Hack"), "Iosevka"),
            "Iosevka, Menlo, Hack"
        );
    }

    #[test]
    fn test_no_original_value() {
        assert_eq!(preview_value(None, "Hack"), "Hack");
        assert_eq!(preview_value(Some(""), "Hack"), "Hack");
    }

    #[test]
    fn test_active_font_is_unquoted() {
        let chain = FallbackChain::parse("\"JetBrains Mono\", monospace");
        assert_eq!(chain.active(), Some("JetBrains Mono"));
        assert_eq!(chain.entries().len(), 2);
        assert!(FallbackChain::parse(" , ").active().is_none());
    }
}
