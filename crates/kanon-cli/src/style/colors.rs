//! Semantic color palette for terminal output.

use owo_colors::{OwoColorize, Style};

use kanon::judge::HIGH_RISK_THRESHOLD;

/// Risk below this is shown as low.
const LOW_RISK_THRESHOLD: f64 = 0.2;

/// Extension trait applying the palette, or nothing when colors are off.
pub trait SemanticStyle: std::fmt::Display {
    fn paint(&self, style: Style) -> String {
        let text = self.to_string();
        if super::no_color() {
            text
        } else {
            text.style(style).to_string()
        }
    }

    /// Green bold.
    fn success(&self) -> String {
        self.paint(Style::new().green().bold())
    }

    /// Red bold.
    fn error(&self) -> String {
        self.paint(Style::new().red().bold())
    }

    /// Yellow.
    fn warning(&self) -> String {
        self.paint(Style::new().yellow())
    }

    /// Dimmed.
    fn muted(&self) -> String {
        self.paint(Style::new().dimmed())
    }

    /// Bold.
    fn header(&self) -> String {
        self.paint(Style::new().bold())
    }

    /// Blue; used for column names and paths.
    fn code(&self) -> String {
        self.paint(Style::new().blue())
    }
}

impl<T: std::fmt::Display + ?Sized> SemanticStyle for T {}

/// Formats a re-identification risk as a percentage, colored by severity.
pub fn risk(value: f64) -> String {
    let text = format!("{:.2}%", value * 100.0);
    if value > HIGH_RISK_THRESHOLD {
        text.error()
    } else if value >= LOW_RISK_THRESHOLD {
        text.warning()
    } else {
        text.success()
    }
}
