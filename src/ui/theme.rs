//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the board, supporting both
//! built-in themes (Catppuccin variants) and custom themes loaded from TOML files.
//! It provides utilities for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! filter_bar_border = "#f5c2e7"
//! filter_active_fg = "#f9e2af"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! apply_fg = "#89b4fa"
//! applied_fg = "#a6e3a1"
//! success_fg = "#a6e3a1"
//! failure_fg = "#f38ba8"
//! accents = ["#3b82f6", "#8b5cf6"]
//! ```
//!
//! # Example
//!
//! ```rust
//! use shlichus_board::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. "#cdd6f4").
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Filter bar frame color.
    pub filter_bar_border: String,
    /// Filter field being edited.
    pub filter_active_fg: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,

    /// "Apply" badge.
    pub apply_fg: String,
    /// "Applied" badge.
    pub applied_fg: String,

    /// Success notice.
    pub success_fg: String,
    /// Failure notice.
    pub failure_fg: String,

    /// Row accent palette, indexed by a hash of the job title.
    #[serde(default)]
    pub accents: Vec<String>,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `catppuccin-mocha`, `catppuccin-latte`. Returns
    /// `None` for anything else.
    ///
    /// ```rust
    /// use shlichus_board::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Theme`] if the file cannot be read or its
    /// contents do not describe a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            BoardError::Theme(format!(
                "failed to read {}: {e}",
                path.as_ref().display()
            ))
        })?;

        toml::from_str(&contents).map_err(|e| BoardError::Theme(format!("invalid theme TOML: {e}")))
    }

    /// Converts a hex color to RGB. Unparsable input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for a hex color.
    ///
    /// ```rust
    /// use shlichus_board::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in theme fails to parse, which the theme tests
    /// rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse_with_full_palette() {
        for name in ["catppuccin-mocha", "catppuccin-latte"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
            assert_eq!(theme.colors.accents.len(), 7);
        }
    }

    #[test]
    fn bad_hex_falls_back_to_white() {
        assert_eq!(Theme::hex_to_rgb("#12"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("zzzzzz"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("#1e1e2e"), (30, 30, 46));
    }

    #[test]
    fn custom_theme_file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let body = include_str!("../../themes/catppuccin-latte.toml")
            .replace("catppuccin-latte", "office");
        file.write_all(body.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "office");
    }

    #[test]
    fn custom_theme_errors_are_theme_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = 3").unwrap();
        assert!(matches!(
            Theme::from_file(file.path()),
            Err(BoardError::Theme(_))
        ));
        assert!(matches!(
            Theme::from_file("/definitely/not/here.toml"),
            Err(BoardError::Theme(_))
        ));
    }
}
