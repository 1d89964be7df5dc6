//! Row styling for the terminal demo.
//!
//! The engine only names classes; this is where the demo decides what they
//! look like.

use crate::surface::ImageState;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether colors are used at all.
///
/// Colors are disabled by `--no-color` or a set `NO_COLOR` env var.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from the CLI flag and the environment.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ListStyles =====

/// Styles for rows, icons and the drag label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStyles {
    row: Style,
    selected: Style,
    hover: Style,
    icon: Style,
    broken_icon: Style,
    drag_label: Style,
    status: Style,
}

impl ListStyles {
    /// Styles for the given color configuration.
    ///
    /// Without colors, selection and hover fall back to text modifiers so
    /// they stay distinguishable.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                row: Style::default(),
                selected: Style::default().fg(Color::Black).bg(Color::Cyan),
                hover: Style::default().bg(Color::DarkGray),
                icon: Style::default().fg(Color::Yellow),
                broken_icon: Style::default().fg(Color::Red),
                drag_label: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                status: Style::default().fg(Color::Gray).bg(Color::Blue),
            }
        } else {
            Self {
                row: Style::default(),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                hover: Style::default().add_modifier(Modifier::UNDERLINED),
                icon: Style::default(),
                broken_icon: Style::default(),
                drag_label: Style::default().add_modifier(Modifier::BOLD),
                status: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }

    /// Base row style.
    pub fn row(&self) -> Style {
        self.row
    }

    /// Style of a selected row.
    pub fn selected(&self) -> Style {
        self.selected
    }

    /// Style patched onto the row under the pointer.
    pub fn hover(&self) -> Style {
        self.hover
    }

    /// Style of the drag label.
    pub fn drag_label(&self) -> Style {
        self.drag_label
    }

    /// Style of the status line.
    pub fn status(&self) -> Style {
        self.status
    }

    /// Glyph and style for an icon, or `None` when nothing is drawn.
    pub fn icon(&self, state: ImageState) -> Option<(&'static str, Style)> {
        match state {
            ImageState::Loaded => Some(("■", self.icon)),
            ImageState::Broken => Some(("✗", self.broken_icon)),
            ImageState::Empty | ImageState::Transparent | ImageState::Hidden => None,
        }
    }
}

impl Default for ListStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_flag_disables_colors() {
        assert!(!ColorConfig::from_env_and_args(true).colors_enabled());
    }

    #[test]
    fn monochrome_selection_is_reversed() {
        let styles = ListStyles::with_color_config(ColorConfig::from_env_and_args(true));
        assert!(styles.selected().add_modifier.contains(Modifier::REVERSED));
        assert_eq!(styles.selected().bg, None);
    }

    #[test]
    fn hidden_and_transparent_icons_draw_nothing() {
        let styles = ListStyles::with_color_config(ColorConfig::from_env_and_args(true));
        assert!(styles.icon(ImageState::Hidden).is_none());
        assert!(styles.icon(ImageState::Transparent).is_none());
        assert!(styles.icon(ImageState::Empty).is_none());
        assert_eq!(styles.icon(ImageState::Broken).map(|(g, _)| g), Some("✗"));
    }
}
