//! Progress display for fixture runs
//!
//! Bars draw to stderr and hide themselves when stderr is not a terminal, so
//! piped output only carries the status lines.

use super::styling::StyleManager;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Progress display manager for long-running operations
pub struct ProgressDisplay<'a> {
    styling: &'a StyleManager,
}

impl<'a> ProgressDisplay<'a> {
    pub(crate) fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    /// Create a progress bar for operations with known total
    pub fn bar(&self, total: u64) -> ProgressTracker<'a> {
        let template = if self.styling.color_enabled() {
            "{spinner:.green} {msg} [{wide_bar:.cyan/blue}] {pos}/{len}"
        } else {
            "{spinner} {msg} [{wide_bar}] {pos}/{len}"
        };
        let style = ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_strings(self.styling.symbols().spinner)
            .progress_chars(self.styling.symbols().progress_chars);

        let bar = ProgressBar::new(total);
        bar.set_style(style);
        bar.enable_steady_tick(TICK_INTERVAL);
        ProgressTracker::new(bar, self.styling)
    }

    /// Create a spinner for operations with unknown duration
    pub fn spinner(&self, message: &str) -> ProgressTracker<'a> {
        let template = if self.styling.color_enabled() {
            "{spinner:.green} {msg}"
        } else {
            "{spinner} {msg}"
        };
        let style = ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(self.styling.symbols().spinner);

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        ProgressTracker::new(bar, self.styling)
    }

    /// Tracker that never draws
    pub fn hidden(&self, total: u64) -> ProgressTracker<'a> {
        let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden());
        ProgressTracker::new(bar, self.styling)
    }
}

/// Individual progress tracker
pub struct ProgressTracker<'a> {
    bar: ProgressBar,
    styling: &'a StyleManager,
}

impl<'a> ProgressTracker<'a> {
    fn new(bar: ProgressBar, styling: &'a StyleManager) -> Self {
        Self { bar, styling }
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Run `f` with the bar cleared, so it can print to stdout without tearing
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Finish with success message
    pub fn finish(&self, message: &str) {
        self.bar
            .finish_with_message(self.styling.format_success(message));
    }

    /// Abandon with error message
    pub fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(self.styling.format_error(message));
    }

    /// Finish and clear the progress bar
    pub fn finish_clear(&self) {
        self.bar.finish_and_clear();
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

#[cfg(test)]
mod tests {
    include!("progress.test.rs");
}
