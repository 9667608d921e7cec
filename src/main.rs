//! fontpick - Main entry point
//!
//! Lists installed monospaced fonts and lets the user pick the editor font
//! and weight with live preview.

use anyhow::Context;
use log::{debug, info};
use std::io::stdout;
use std::process;

use fontpick::cli::{Cli, Commands};
use fontpick::{
    list_fonts, pick_font, show_current, AppConfig, FontPickError, FontSource, JsonSettings,
    Notifier, PlatformFonts, StderrNotifier, SystemRunner, TerminalPicker,
};

/// Initialize the logger with appropriate settings
fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;

    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        // Warnings only by default so log lines don't land on top of the picker
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env() // Allows RUST_LOG env var to override
        .init();
}

/// Load the configuration file (or defaults) and apply command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };

    if let Some(settings) = &cli.settings {
        config.settings_path = settings.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.enumerate_timeout_secs = timeout;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run(cli: Cli, notifier: &mut StderrNotifier) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    debug!("Configuration: {:?}", config);
    let keys = config.setting_keys();

    match cli.command.unwrap_or(Commands::Pick) {
        Commands::Current => {
            let store = open_settings(&config, notifier)?;
            show_current(&store, &keys, &mut stdout().lock(), notifier)?;
        }
        Commands::List => {
            let fonts = platform_fonts(&config, notifier)?;
            list_fonts(&fonts, &mut stdout().lock(), notifier)?;
        }
        Commands::Pick => {
            let fonts = platform_fonts(&config, notifier)?;
            let mut store = open_settings(&config, notifier)?;
            let mut ui = TerminalPicker::new();
            pick_font(&fonts, &mut store, keys, &mut ui, notifier)?;
        }
    }

    Ok(())
}

fn platform_fonts(
    config: &AppConfig,
    notifier: &mut StderrNotifier,
) -> Result<PlatformFonts<SystemRunner>, FontPickError> {
    let source = FontSource::detect().map_err(|e| {
        let e = FontPickError::from(e);
        notifier.error(&e.user_message());
        e
    })?;
    let runner = SystemRunner::new(config.enumerate_timeout(), config.output_limit_bytes);
    debug!(
        "Font listing limits: {:?}, {} bytes",
        runner.timeout(),
        runner.output_limit()
    );

    let fonts = PlatformFonts::new(source, runner);
    info!("Listing fonts with {}", fonts.source());
    Ok(fonts)
}

fn open_settings(
    config: &AppConfig,
    notifier: &mut StderrNotifier,
) -> Result<JsonSettings, FontPickError> {
    let store = JsonSettings::open(config.settings_path.clone()).map_err(|e| {
        notifier.error(&e.user_message());
        e
    })?;
    info!("Editing settings in {}", store.path().display());
    Ok(store)
}

/// Main application entry point
fn main() {
    init_logger();
    info!("fontpick starting up");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let mut notifier = StderrNotifier;
    if let Err(e) = run(cli, &mut notifier) {
        // Flow errors were already shown by the command handlers
        if e.downcast_ref::<FontPickError>().is_none() {
            notifier.error(&format!("{:#}", e));
        }
        process::exit(1);
    }
}
