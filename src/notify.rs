//! User-facing notifications.

use log::{error, info};

/// Non-blocking messages for the user.
pub trait Notifier {
    fn error(&mut self, message: &str);
    fn info(&mut self, message: &str);
}

/// Prints to the terminal after the picker has released it.
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&mut self, message: &str) {
        error!("{}", message);
        eprintln!("✗ {}", message);
    }

    fn info(&mut self, message: &str) {
        info!("{}", message);
        println!("✓ {}", message);
    }
}
