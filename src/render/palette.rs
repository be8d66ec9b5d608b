use std::collections::HashMap;

use ratatui::style::{Color, Style};

/// Foreground and background colours for board characters
///
/// Built once when a canvas is acquired and dropped with it.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    foreground: HashMap<char, Color>,
    background: HashMap<char, Color>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a palette from optional per-character overrides
    pub fn from_overrides(
        foreground: Option<HashMap<char, Color>>,
        background: Option<HashMap<char, Color>>,
    ) -> Self {
        Self {
            foreground: foreground.unwrap_or_default(),
            background: background.unwrap_or_default(),
        }
    }

    pub fn with_foreground(mut self, character: char, color: Color) -> Self {
        self.foreground.insert(character, color);
        self
    }

    pub fn with_background(mut self, character: char, color: Color) -> Self {
        self.background.insert(character, color);
        self
    }

    /// Style for drawing `character`. Characters without overrides use the
    /// terminal defaults.
    pub fn style_for(&self, character: char) -> Style {
        let mut style = Style::default();
        if let Some(&fg) = self.foreground.get(&character) {
            style = style.fg(fg);
        }
        if let Some(&bg) = self.background.get(&character) {
            style = style.bg(bg);
        }
        style
    }
}
