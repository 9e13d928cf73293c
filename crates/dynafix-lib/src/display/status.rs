//! Status display for user feedback
//!
//! User-facing lines go to stdout; diagnostics go through `tracing` instead.

use super::styling::StyleManager;
use crate::primitives::FixtureKey;
use std::io::{self, Write};
use std::time::Duration;

/// Status display manager for semantic user feedback
pub struct StatusDisplay<'a> {
    styling: &'a StyleManager,
}

impl<'a> StatusDisplay<'a> {
    pub(crate) fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    /// Display a success status with optional details
    ///
    /// Output: `✓ store: dynafix-store.json`
    pub fn success(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_success(&join_details(item, details)));
    }

    /// Display an error status with optional details
    pub fn error(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_error(&join_details(item, details)));
    }

    pub fn warning(&self, message: &str) {
        println!("{}", self.styling.format_warning(message));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.styling.format_info(message));
    }

    /// Display a simple message without status symbols
    pub fn message(&self, text: &str) {
        println!("{}", text);
    }

    pub fn subtle(&self, text: &str) {
        println!("{}", self.styling.style_subtle(text));
    }

    /// Display a header for a section of work
    pub fn section(&self, title: &str) {
        println!();
        println!("{}", self.styling.style_emphasis(title));
    }

    /// Display a list of items with bullets
    pub fn list(&self, items: &[&str]) {
        for item in items {
            println!("  {} {}", self.styling.bullet(), item);
        }
    }

    /// One line of a fixture listing
    ///
    /// Output: ` * accounts.0001_users       Staff accounts`
    pub fn fixture_entry(&self, key: &FixtureKey, description: Option<&str>) {
        println!("{}", self.format_fixture_entry(key, description));
        io::stdout().flush().unwrap_or(());
    }

    pub fn format_fixture_entry(&self, key: &FixtureKey, description: Option<&str>) -> String {
        let name = format!("{:<25}", key.to_string());
        match description {
            Some(description) => format!(
                " * {} {}",
                self.styling.style_emphasis(&name),
                self.styling.style_subtle(description)
            ),
            None => format!(" * {}", self.styling.style_emphasis(name.trim_end())),
        }
    }

    /// Report a loaded fixture
    ///
    /// Output: `Loading fixture accounts.0001_users... SUCCESS (12ms)`
    pub fn fixture_loaded(&self, key: &FixtureKey, elapsed: Duration) {
        println!("{}", self.format_fixture_loaded(key, elapsed));
    }

    pub fn format_fixture_loaded(&self, key: &FixtureKey, elapsed: Duration) -> String {
        format!(
            "Loading fixture {}... {} {}",
            key,
            self.styling.style_success("SUCCESS"),
            self.styling
                .style_subtle(&format!("({}ms)", elapsed.as_millis()))
        )
    }

    /// Report the fixture a run stopped at
    pub fn fixture_failed(&self, key: &FixtureKey) {
        println!(
            "Loading fixture {}... {}",
            key,
            self.styling.style_error("FAILED")
        );
    }
}

fn join_details(item: &str, details: &str) -> String {
    if details.is_empty() {
        item.to_string()
    } else {
        format!("{}: {}", item, details)
    }
}

#[cfg(test)]
mod tests {
    include!("status.test.rs");
}
