use ratatui::style::{Color, Style};

use crate::model::{Color as TagColor, UiConfig};

/// Swatches offered for new tags, cycled with ←/→ in the tag input
pub const SWATCHES: [TagColor; 10] = [
    TagColor::new(0x00, 0x00, 0x00),
    TagColor::new(0xFF, 0xFF, 0xFF),
    TagColor::new(0xFF, 0x44, 0x44),
    TagColor::new(0xFF, 0x8C, 0x00),
    TagColor::new(0xFF, 0xD7, 0x00),
    TagColor::new(0x44, 0xFF, 0x88),
    TagColor::new(0x44, 0xDD, 0xFF),
    TagColor::new(0x44, 0x88, 0xFF),
    TagColor::new(0xCC, 0x66, 0xFF),
    TagColor::new(0xFB, 0x41, 0x96),
];

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub card_border: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub drop_target: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            card_border: Color::Rgb(0x3A, 0x33, 0x66),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            selection_border: Color::Rgb(0xFB, 0x41, 0x96),
            drop_target: Color::Rgb(0x44, 0xDD, 0xFF),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
        }
    }
}

/// Convert a stored tag color to a terminal color
pub fn rgb(color: TagColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Pill style for a tag: its own color as background, legible text on top
pub fn pill_style(color: TagColor) -> Style {
    Style::default()
        .bg(rgb(color))
        .fg(rgb(color.contrast_text().color()))
}

/// Step through `SWATCHES` from `current`. A color outside the palette
/// steps from the first swatch.
pub fn cycle_swatch(current: TagColor, step: isize) -> TagColor {
    let len = SWATCHES.len() as isize;
    let pos = SWATCHES
        .iter()
        .position(|c| *c == current)
        .map_or(0, |p| p as isize)
        + step;
    SWATCHES[pos.rem_euclid(len) as usize]
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(c) = TagColor::from_hex(value) else {
                tracing::warn!(slot = %key, value = %value, "ignoring invalid theme color");
                continue;
            };
            let color = rgb(c);
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "card_border" => theme.card_border = color,
                "selection_bg" => theme.selection_bg = color,
                "selection_border" => theme.selection_border = color,
                "drop_target" => theme.drop_target = color,
                "search_match_bg" => theme.search_match_bg = color,
                "search_match_fg" => theme.search_match_fg = color,
                _ => tracing::warn!(slot = %key, "unknown theme slot"),
            }
        }

        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("highlight".into(), "not-a-color".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        // Invalid values keep the default
        assert_eq!(theme.highlight, Color::Rgb(0xFB, 0x41, 0x96));
        assert_eq!(theme.text, Color::Rgb(0xB0, 0xAA, 0xFF));
    }

    #[test]
    fn pills_use_contrasting_text() {
        let dark = pill_style(TagColor::new(0x10, 0x10, 0x40));
        assert_eq!(dark.fg, Some(Color::Rgb(0xFF, 0xFF, 0xFF)));
        let light = pill_style(TagColor::new(0xFF, 0xD7, 0x00));
        assert_eq!(light.fg, Some(Color::Rgb(0, 0, 0)));
        assert_eq!(light.bg, Some(Color::Rgb(0xFF, 0xD7, 0x00)));
    }

    #[test]
    fn unknown_slots_are_ignored() {
        let mut ui = UiConfig::default();
        ui.colors.insert("red".into(), "#FF0000".into());
        ui.colors.insert("dim".into(), "#010203".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.dim, Color::Rgb(1, 2, 3));
        assert_eq!(theme.background, Theme::default().background);
    }

    #[test]
    fn swatch_cycling_wraps() {
        assert_eq!(cycle_swatch(SWATCHES[0], 1), SWATCHES[1]);
        assert_eq!(cycle_swatch(SWATCHES[0], -1), SWATCHES[9]);
        assert_eq!(cycle_swatch(SWATCHES[9], 1), SWATCHES[0]);
        assert_eq!(cycle_swatch(TagColor::new(1, 2, 3), 1), SWATCHES[1]);
    }
}
