//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - High priority:   red, bold
//!   - Medium priority: yellow
//!   - Low priority:    green
//!   - Warnings:        yellow
//!   - Info/Reference:  cyan   (task IDs)
//!   - Muted:           dimmed (field labels, separators)
//!   - Emphasis:        bold   (section headers)

use crate::domain::PriorityLabel;
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Render a priority label with its score, e.g. `High 86.50`.
pub(crate) fn colorize_priority(label: PriorityLabel, score: f64, config: &OutputConfig) -> String {
    let text = format!("{label} {score:.2}");
    if !config.use_colors {
        return text;
    }
    match label {
        PriorityLabel::High => text.red().bold().to_string(),
        PriorityLabel::Medium => text.yellow().to_string(),
        PriorityLabel::Low => text.green().to_string(),
    }
}

/// Colorize a task ID (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Apply dimmed style to text (for field labels).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_passthrough() {
        let config = OutputConfig::new(80, false);
        assert_eq!(warning("careful", &config), "careful");
        assert_eq!(error("boom", &config), "boom");
        assert_eq!(colorize_id("t-1", &config), "t-1");
        assert_eq!(dimmed("Due:", &config), "Due:");
        assert_eq!(bold("Warnings", &config), "Warnings");
    }

    #[test]
    fn test_priority_text_includes_score() {
        let config = OutputConfig::new(80, false);
        assert_eq!(
            colorize_priority(PriorityLabel::High, 86.5, &config),
            "High 86.50"
        );
        assert_eq!(
            colorize_priority(PriorityLabel::Low, 3.0, &config),
            "Low 3.00"
        );
    }
}
