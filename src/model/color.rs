use serde::{Deserialize, Serialize};

/// An 8-bit RGB color, as stored on tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Text color that stays legible on a given background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContrastText {
    White,
    Black,
}

impl ContrastText {
    pub fn color(self) -> Color {
        match self {
            ContrastText::White => Color::new(0xFF, 0xFF, 0xFF),
            ContrastText::Black => Color::new(0x00, 0x00, 0x00),
        }
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Perceived brightness in `0.0..=1.0` (ITU-R BT.601 weights)
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }

    /// White text on dark backgrounds (luminance < 0.5), black otherwise.
    pub fn contrast_text(self) -> ContrastText {
        if self.luminance() < 0.5 {
            ContrastText::White
        } else {
            ContrastText::Black
        }
    }

    /// Parse `#RRGGBB` (the `#` is required)
    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_backgrounds_get_white_text() {
        assert_eq!(Color::new(0, 0, 0).contrast_text(), ContrastText::White);
        assert_eq!(Color::new(0x0C, 0x00, 0x1B).contrast_text(), ContrastText::White);
        // Pure blue is dark despite full saturation
        assert_eq!(Color::new(0, 0, 255).contrast_text(), ContrastText::White);
    }

    #[test]
    fn light_backgrounds_get_black_text() {
        assert_eq!(Color::new(255, 255, 255).contrast_text(), ContrastText::Black);
        assert_eq!(Color::new(0xFF, 0xD7, 0x00).contrast_text(), ContrastText::Black);
        // Pure green is bright
        assert_eq!(Color::new(0, 255, 0).contrast_text(), ContrastText::Black);
    }

    #[test]
    fn threshold_is_half_luminance() {
        // 128 gray: 128/255 = 0.502 -> black
        assert_eq!(Color::new(128, 128, 128).contrast_text(), ContrastText::Black);
        // 127 gray: 0.498 -> white
        assert_eq!(Color::new(127, 127, 127).contrast_text(), ContrastText::White);
    }

    #[test]
    fn parse_hex() {
        assert_eq!(Color::from_hex("#FF4444"), Some(Color::new(0xFF, 0x44, 0x44)));
        assert_eq!(Color::from_hex("#0c001b"), Some(Color::new(0x0C, 0x00, 0x1B)));
        assert_eq!(Color::from_hex("FF4444"), None);
        assert_eq!(Color::from_hex("#FF44"), None);
        assert_eq!(Color::from_hex("#ZZZZZZ"), None);
        assert_eq!(Color::from_hex("#ÿÿÿ"), None);
    }

    #[test]
    fn hex_output_is_uppercase() {
        assert_eq!(Color::new(0xAB, 0x01, 0xFF).to_hex(), "#AB01FF");
        assert_eq!(Color::from_hex(&Color::new(1, 2, 3).to_hex()), Some(Color::new(1, 2, 3)));
    }

    #[test]
    fn serializes_as_rgb_object() {
        let json = serde_json::to_string(&Color::new(1, 2, 3)).unwrap();
        assert_eq!(json, r#"{"r":1,"g":2,"b":3}"#);
    }
}
