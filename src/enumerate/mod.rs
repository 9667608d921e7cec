//! Font enumeration
//!
//! Lists the monospaced font families installed on this machine by running
//! the platform's font listing command and parsing what it prints.
//!
//! # Platforms
//!
//! - **Windows**: `reg query` over the registry's font registrations,
//!   filtered to `.ttf` files whose name contains "mono".
//! - **Unix-like** (Linux, macOS, BSDs): `fc-list :spacing=mono family`,
//!   sorted and deduplicated by the shell pipeline.
//!
//! The platform is picked once via [`FontSource::detect`]; nothing outside
//! this module branches on the operating system.

pub mod parse;
pub mod runner;

use crate::error::EnumerationError;
use crate::types::FontList;
use log::{debug, info};
use std::fmt;

pub use runner::{CommandRunner, CommandSpec, SystemRunner};

/// Registry key holding per-machine font registrations.
const WINDOWS_FONTS_KEY: &str = r"HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Fonts";

/// Shell pipeline listing monospaced families, one per line.
const FC_LIST_PIPELINE: &str = "fc-list :spacing=mono family | sort -u";

/// Anything that can produce the list of installed monospaced fonts.
pub trait FontEnumerator {
    fn enumerate(&self) -> Result<FontList, EnumerationError>;
}

/// Where font names come from on a given platform family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSource {
    /// Windows font registry
    WindowsRegistry,
    /// fontconfig's `fc-list`
    Fontconfig,
}

impl FontSource {
    /// Source for the operating system this binary runs on.
    pub fn detect() -> Result<Self, EnumerationError> {
        Self::for_os(std::env::consts::OS)
    }

    /// Source for an `std::env::consts::OS` style name.
    pub fn for_os(os: &str) -> Result<Self, EnumerationError> {
        match os {
            "windows" => Ok(Self::WindowsRegistry),
            "linux" | "macos" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" | "solaris"
            | "illumos" => Ok(Self::Fontconfig),
            other => Err(EnumerationError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Command whose output [`FontSource::parse`] understands.
    pub fn command(self) -> CommandSpec {
        match self {
            Self::WindowsRegistry => CommandSpec::new("reg", ["query", WINDOWS_FONTS_KEY]),
            Self::Fontconfig => CommandSpec::new("sh", ["-c", FC_LIST_PIPELINE]),
        }
    }

    pub fn parse(self, output: &str) -> FontList {
        match self {
            Self::WindowsRegistry => parse::parse_registry(output),
            Self::Fontconfig => parse::parse_fc_list(output),
        }
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowsRegistry => write!(f, "Windows registry"),
            Self::Fontconfig => write!(f, "fontconfig"),
        }
    }
}

/// Enumerator backed by a [`FontSource`] and a [`CommandRunner`].
#[derive(Debug, Clone)]
pub struct PlatformFonts<R> {
    source: FontSource,
    runner: R,
}

impl<R: CommandRunner> PlatformFonts<R> {
    pub fn new(source: FontSource, runner: R) -> Self {
        Self { source, runner }
    }

    pub fn source(&self) -> FontSource {
        self.source
    }
}

impl<R: CommandRunner> FontEnumerator for PlatformFonts<R> {
    fn enumerate(&self) -> Result<FontList, EnumerationError> {
        let output = self.runner.run(&self.source.command())?;
        debug!("{} output: {} lines", self.source, output.lines().count());
        let fonts = self.source.parse(&output);
        info!("Found {} monospaced fonts via {}", fonts.len(), self.source);
        Ok(fonts)
    }
}
