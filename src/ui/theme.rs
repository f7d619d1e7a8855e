//! Card palettes and ANSI escape sequence generation.
//!
//! This module defines the colour system for candidate cards. A [`Palette`] is
//! an ordered list of [`CardTheme`]s (gradient pair plus highlight colour);
//! the filter engine assigns `palette[index mod len]` to each presented card
//! and combines it with one of four [`GradientDirection`]s. Palettes can be
//! loaded from built-in definitions or from custom TOML files.
//!
//! # Built-in Palettes
//!
//! - `unimatch`: Seven warm/navy/forest gradients (default)
//! - `sunset`: Five orange and violet gradients
//!
//! Palette lengths coprime with the four gradient directions give the longest
//! run of distinct theme/direction pairs (`len * 4` cards). A non-coprime
//! palette still works but is reported at debug level.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-palette"
//!
//! [[themes]]
//! from = "#8C2E1F"
//! to = "#E76F51"
//! highlight = "#FDE68A"
//! ```
//!
//! # Example
//!
//! ```rust
//! use unimatch::ui::theme::{self, Palette};
//!
//! let palette = Palette::default();
//! assert_eq!(palette.len(), 7);
//! print!("{}Highlighted{}", theme::fg(&palette.theme_at(0).highlight), theme::reset());
//! ```

use crate::domain::error::{Result, UnimatchError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Number of gradient directions cycled alongside the palette.
pub const DIRECTION_COUNT: usize = 4;

/// Accent used for titles and the header bar.
pub const BRAND: &str = "#BF402A";
/// Base colour behind cards and buttons.
pub const SURFACE: &str = "#182335";
pub const TEXT: &str = "#F5F5F4";
pub const TEXT_DIM: &str = "#8A9BB0";
pub const BORDER: &str = "#567190";

/// Gradient colours for one card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct CardTheme {
    /// Gradient start colour (hex).
    pub from: String,
    /// Gradient end colour (hex).
    pub to: String,
    /// Accent colour used for emphasized description text.
    pub highlight: String,
}

impl CardTheme {
    fn new(from: &str, to: &str, highlight: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            highlight: highlight.to_string(),
        }
    }
}

/// Diagonal orientation of a card gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl GradientDirection {
    /// Directions in assignment order.
    pub const ALL: [Self; DIRECTION_COUNT] = [
        Self::BottomRight,
        Self::BottomLeft,
        Self::TopRight,
        Self::TopLeft,
    ];

    /// Direction assigned to the card at a presentation index.
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self::ALL[index % DIRECTION_COUNT]
    }

    /// Arrow glyph used by the text renderer.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::BottomRight => '↘',
            Self::BottomLeft => '↙',
            Self::TopRight => '↗',
            Self::TopLeft => '↖',
        }
    }
}

/// Serialized palette layout; validated into [`Palette`].
#[derive(Debug, Deserialize)]
struct PaletteFile {
    name: String,
    themes: Vec<CardTheme>,
}

/// Ordered, non-empty list of card themes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Human-readable palette name.
    pub name: String,
    themes: Vec<CardTheme>,
}

impl Palette {
    /// Builds a palette, rejecting an empty theme list.
    ///
    /// # Errors
    ///
    /// Returns [`UnimatchError::Palette`] when `themes` is empty.
    pub fn new(name: impl Into<String>, themes: Vec<CardTheme>) -> Result<Self> {
        let name = name.into();
        if themes.is_empty() {
            return Err(UnimatchError::Palette(format!("palette '{name}' has no themes")));
        }
        if gcd(themes.len(), DIRECTION_COUNT) != 1 {
            tracing::debug!(
                palette = %name,
                themes = themes.len(),
                directions = DIRECTION_COUNT,
                "palette size shares a factor with direction count; combinations repeat early"
            );
        }
        Ok(Self { name, themes })
    }

    /// Loads a built-in palette by name.
    ///
    /// Supported names: `unimatch`, `sunset`.
    ///
    /// # Returns
    ///
    /// - `Some(Palette)` if the name is recognized
    /// - `None` if the name is unknown
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "unimatch" => Some(Self::default()),
            "sunset" => Self::from_toml(include_str!("../../palettes/sunset.toml")).ok(),
            _ => None,
        }
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML cannot be
    /// parsed, or the palette has no themes.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses a palette from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or lists no themes.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: PaletteFile = toml::from_str(contents)
            .map_err(|e| UnimatchError::Palette(format!("failed to parse palette TOML: {e}")))?;
        Self::new(file.name, file.themes)
    }

    /// Theme assigned to the card at a presentation index.
    #[must_use]
    pub fn theme_at(&self, index: usize) -> &CardTheme {
        &self.themes[index % self.themes.len()]
    }

    /// Number of themes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Always `false`; palettes are validated non-empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for Palette {
    /// Returns the `unimatch` palette.
    fn default() -> Self {
        Self {
            name: "unimatch".to_string(),
            themes: vec![
                CardTheme::new("#8C2E1F", "#E76F51", "#FDE68A"),
                CardTheme::new("#182335", "#567190", "#7DD3FC"),
                CardTheme::new("#1E3E2F", "#52B788", "#A7F3D0"),
                CardTheme::new("#182335", "#8C4A4A", "#FECACA"),
                CardTheme::new("#3E5C76", "#182335", "#BAE6FD"),
                CardTheme::new("#BF402A", "#182335", "#FFEDD5"),
                CardTheme::new("#182335", "#2A7F62", "#99F6E4"),
            ],
        }
    }
}

const fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Converts a hex colour to an RGB tuple.
///
/// Strips `#` prefix if present. Returns `(255, 255, 255)` (white) on parse errors.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#').trim();

    if hex.len() != 6 || !hex.is_ascii() {
        return (255, 255, 255);
    }

    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

    (r, g, b)
}

/// ANSI 24-bit foreground escape sequence for a hex colour.
#[must_use]
pub fn fg(hex: &str) -> String {
    let (r, g, b) = hex_to_rgb(hex);
    fg_rgb(r, g, b)
}

/// ANSI 24-bit background escape sequence for a hex colour.
#[must_use]
pub fn bg(hex: &str) -> String {
    let (r, g, b) = hex_to_rgb(hex);
    bg_rgb(r, g, b)
}

/// ANSI 24-bit foreground escape sequence for raw channels.
#[must_use]
pub fn fg_rgb(r: u8, g: u8, b: u8) -> String {
    format!("\u{001b}[38;2;{r};{g};{b}m")
}

/// ANSI 24-bit background escape sequence for raw channels.
#[must_use]
pub fn bg_rgb(r: u8, g: u8, b: u8) -> String {
    format!("\u{001b}[48;2;{r};{g};{b}m")
}

/// ANSI bold (`\x1b[1m`).
#[must_use]
pub const fn bold() -> &'static str {
    "\u{001b}[1m"
}

/// ANSI dim (`\x1b[2m`).
#[must_use]
pub const fn dim() -> &'static str {
    "\u{001b}[2m"
}

/// ANSI reset (`\x1b[0m`).
#[must_use]
pub const fn reset() -> &'static str {
    "\u{001b}[0m"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_coprime_with_directions() {
        let palette = Palette::default();
        assert_eq!(gcd(palette.len(), DIRECTION_COUNT), 1);
    }

    #[test]
    fn theme_and_direction_pairs_do_not_repeat_within_28_cards() {
        let palette = Palette::default();
        let mut seen = std::collections::HashSet::new();
        for index in 0..28 {
            let pair = (palette.theme_at(index).clone(), GradientDirection::at(index));
            assert!(seen.insert(pair), "pair repeated at index {index}");
        }
        assert_eq!(
            (palette.theme_at(28).clone(), GradientDirection::at(28)),
            (palette.theme_at(0).clone(), GradientDirection::at(0))
        );
    }

    #[test]
    fn builtin_sunset_parses() {
        let palette = Palette::from_name("sunset").expect("sunset palette");
        assert_eq!(palette.name, "sunset");
        assert_eq!(palette.len(), 5);
    }

    #[test]
    fn empty_palette_is_rejected() {
        let err = Palette::from_toml("name = \"void\"\nthemes = []\n").unwrap_err();
        assert!(matches!(err, UnimatchError::Palette(_)));
    }

    #[test]
    fn hex_parsing_falls_back_to_white() {
        assert_eq!(hex_to_rgb("#1E3E2F"), (0x1E, 0x3E, 0x2F));
        assert_eq!(hex_to_rgb("nope"), (255, 255, 255));
    }
}
