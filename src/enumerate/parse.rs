//! Parsers for the raw output of the platform font listing commands.

use crate::types::FontList;
use regex::Regex;
use std::sync::LazyLock;

/// `<name>    REG_SZ    <file>.ttf` as printed by `reg query`.
static REG_FONT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<name>.+?)\s+REG_SZ\s+(?P<path>.*\.(?i:ttf))\s*$")
        .expect("registry line pattern is valid")
});

/// Font type annotation the registry appends to value names.
static REG_TYPE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\((?:TrueType|OpenType)\)$").expect("type suffix pattern is valid")
});

/// Extract monospaced font names from `reg query` output.
///
/// Only `.ttf` registrations whose name contains "mono" (any case) are kept.
pub fn parse_registry(output: &str) -> FontList {
    let mut fonts = FontList::new();
    for line in output.lines() {
        let Some(caps) = REG_FONT_LINE.captures(line) else {
            continue;
        };
        let name = REG_TYPE_SUFFIX.replace(&caps["name"], "");
        let name = name.trim();
        if name.is_empty() || !name.to_lowercase().contains("mono") {
            continue;
        }
        fonts.push(name);
    }
    fonts
}

/// Extract font families from `fc-list family` output.
///
/// fontconfig prints localized aliases of one family on a single line
/// separated by commas; only the first is kept. Blank lines and hidden
/// families (leading `.`) are dropped.
pub fn parse_fc_list(output: &str) -> FontList {
    output
        .lines()
        .filter_map(|line| line.split(',').next())
        .map(str::trim)
        .filter(|name| !name.is_empty() && !name.starts_with('.'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REG_OUTPUT: &str = "\r
HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion\\Fonts\r
    Arial (TrueType)    REG_SZ    arial.ttf\r
    Cascadia Mono Regular (TrueType)    REG_SZ    CascadiaMono.ttf\r
    Consolas (TrueType)    REG_SZ    consola.ttf\r
    Lucida Sans Typewriter Mono    REG_SZ    C:\\Fonts\\LTYPE.TTF\r
    Noto Sans Mono (OpenType)    REG_SZ    NotoSansMono.otf\r
    Cascadia Mono Regular (TrueType)    REG_SZ    CascadiaMono.ttf\r
    DejaVu Sans Mono    REG_DWORD    0x1\r
\r
";

    #[test]
    fn test_registry_keeps_mono_ttf_entries() {
        let fonts = parse_registry(REG_OUTPUT);
        assert_eq!(
            fonts.as_slice(),
            ["Cascadia Mono Regular", "Lucida Sans Typewriter Mono"]
        );
    }

    #[test]
    fn test_registry_empty_output() {
        assert!(parse_registry("").is_empty());
        assert!(parse_registry("ERROR: The system was unable to find the key").is_empty());
    }

    #[test]
    fn test_fc_list_filters_and_dedups() {
        let output = "DejaVu Sans Mono\n\n.LastResort\nFira Code,Fira Code Retina\nHack\n  \nDejaVu Sans Mono\n";
        let fonts = parse_fc_list(output);
        assert_eq!(fonts.as_slice(), ["DejaVu Sans Mono", "Fira Code", "Hack"]);
    }

    #[test]
    fn test_fc_list_keeps_upstream_order() {
        let fonts = parse_fc_list("Source Code Pro\nIosevka\nCousine\n");
        assert_eq!(fonts.as_slice(), ["Source Code Pro", "Iosevka", "Cousine"]);
    }
}
