//! Theme colors, with optional overrides from the `[theme]` config table

use ratatui::style::Color;

use crate::config::ThemeConfig;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,        // Active borders, highlighted skill, enabled controls
    pub danger: Color,        // Experimental server warning
    pub warning: Color,       // Status messages
    pub text: Color,
    pub text_dim: Color,
    pub bg_selected: Color,
    pub inactive: Color,      // Disabled controls, inactive borders
    pub header: Color,
    pub battle_green: Color,  // BattlEye protected
    pub battle_yellow: Color, // No BattlEye
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            warning: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(243, 139, 168),
            battle_green: Color::Rgb(166, 218, 149),
            battle_yellow: Color::Rgb(249, 226, 175),
        }
    }
}

impl Theme {
    /// Default palette with any configured overrides applied
    pub fn load(overrides: &ThemeConfig) -> Self {
        let mut theme = Self::default();

        let slots = [
            (&overrides.accent, &mut theme.accent),
            (&overrides.text, &mut theme.text),
            (&overrides.text_dim, &mut theme.text_dim),
            (&overrides.battle_green, &mut theme.battle_green),
            (&overrides.battle_yellow, &mut theme.battle_yellow),
        ];

        for (value, slot) in slots {
            let Some(value) = value else { continue };
            match Self::parse_hex_color(value) {
                Some(color) => *slot = color,
                None => tracing::warn!("Ignoring invalid theme color: {}", value),
            }
        }

        theme
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#FFC107"), Some(Color::Rgb(255, 193, 7)));
        assert_eq!(Theme::parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("#12345"), None);
        assert_eq!(Theme::parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_overrides() {
        let theme = Theme::load(&ThemeConfig {
            accent: Some("#000000".to_string()),
            text: Some("not-a-color".to_string()),
            ..Default::default()
        });

        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        assert_eq!(theme.text, Theme::default().text);
    }
}
