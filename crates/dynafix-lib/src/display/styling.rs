//! Semantic styling and symbols for terminal output
//!
//! Colors come from `console` and are only emitted when color output was
//! resolved as enabled. Symbols fall back to ASCII on terminals that cannot
//! render unicode.

use console::Style;

/// Symbol set used by status lines and progress bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    pub checkmark: &'static str,
    pub cross: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
    pub bullet: &'static str,
    pub arrow: &'static str,
    pub spinner: &'static [&'static str],
    pub progress_chars: &'static str,
}

impl Symbols {
    pub const UNICODE: Symbols = Symbols {
        checkmark: "✓",
        cross: "✗",
        warning: "⚠",
        info: "ℹ",
        bullet: "•",
        arrow: "→",
        spinner: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
        progress_chars: "█▉▊▋▌▍▎▏  ",
    };

    pub const ASCII: Symbols = Symbols {
        checkmark: "+",
        cross: "x",
        warning: "!",
        info: "i",
        bullet: "-",
        arrow: ">",
        spinner: &["-", "\\", "|", "/"],
        progress_chars: "##-",
    };
}

/// Style manager holding the resolved color decision and symbol set
#[derive(Debug, Clone)]
pub struct StyleManager {
    color: bool,
    symbols: Symbols,
}

impl StyleManager {
    pub fn new(color: bool, unicode: bool) -> Self {
        Self {
            color,
            symbols: if unicode {
                Symbols::UNICODE
            } else {
                Symbols::ASCII
            },
        }
    }

    /// Plain ASCII output without color
    pub fn plain() -> Self {
        Self::new(false, false)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn is_unicode(&self) -> bool {
        self.symbols == Symbols::UNICODE
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    fn paint(&self, style: Style, text: &str) -> String {
        style.force_styling(self.color).apply_to(text).to_string()
    }

    /// Style text with semantic success intent
    pub fn style_success(&self, text: &str) -> String {
        self.paint(Style::new().green(), text)
    }

    /// Style text with semantic error intent
    pub fn style_error(&self, text: &str) -> String {
        self.paint(Style::new().red(), text)
    }

    /// Style text with semantic warning intent
    pub fn style_warning(&self, text: &str) -> String {
        self.paint(Style::new().yellow(), text)
    }

    /// Style text with semantic info intent
    pub fn style_info(&self, text: &str) -> String {
        self.paint(Style::new().cyan(), text)
    }

    /// Style text with emphasis (bold)
    pub fn style_emphasis(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    /// Style text as subtle/muted
    pub fn style_subtle(&self, text: &str) -> String {
        self.paint(Style::new().dim(), text)
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success(self.symbols.checkmark), message)
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error(self.symbols.cross), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_warning(self.symbols.warning), message)
    }

    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.style_info(self.symbols.info), message)
    }

    pub fn bullet(&self) -> &'static str {
        self.symbols.bullet
    }

    pub fn arrow(&self) -> &'static str {
        self.symbols.arrow
    }
}

#[cfg(test)]
mod tests {
    include!("styling.test.rs");
}
