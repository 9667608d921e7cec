use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fontpick - choose the editor font from the monospaced fonts you have installed
#[derive(Parser)]
#[command(name = "fontpick")]
#[command(about = "Pick an installed monospaced editor font and weight with live preview")]
#[command(version)]
pub struct Cli {
    /// fontpick configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Editor settings file to edit (overrides the configuration file)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Seconds the font listing command may run
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactively pick a font and weight (default)
    Pick,
    /// Print the installed monospaced fonts
    List,
    /// Print the current font family and weight
    Current,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
