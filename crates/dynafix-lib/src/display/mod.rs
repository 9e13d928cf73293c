//! Terminal display system
//!
//! Separates user-facing output (status lines, listings, progress bars) from
//! diagnostics, which go through `tracing`.

pub mod progress;
pub mod status;
pub mod styling;

pub use progress::{ProgressDisplay, ProgressTracker};
pub use status::StatusDisplay;
pub use styling::{StyleManager, Symbols};

/// Entry point for user-facing output of one command invocation
#[derive(Debug, Clone)]
pub struct Display {
    styling: StyleManager,
}

impl Display {
    /// Display for the current terminal with the resolved color decision
    pub fn new(color: bool) -> Self {
        let unicode = console::Term::stdout().features().wants_emoji();
        Self::with_styling(StyleManager::new(color, unicode))
    }

    pub fn with_styling(styling: StyleManager) -> Self {
        Self { styling }
    }

    /// Status updates with semantic intent
    pub fn status(&self) -> StatusDisplay<'_> {
        StatusDisplay::new(&self.styling)
    }

    /// Progress tracking for long operations
    pub fn progress(&self) -> ProgressDisplay<'_> {
        ProgressDisplay::new(&self.styling)
    }

    pub fn styling(&self) -> &StyleManager {
        &self.styling
    }
}
