//! Theme colors, with optional hex overrides from the `[theme]` config table

use ratatui::style::Color;

use crate::config::ThemeConfig;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,       // Active borders, keys in legends
    pub danger: Color,       // "No data" and errors
    pub text: Color,         // Primary text
    pub text_dim: Color,     // Hints, placeholders
    pub bg_selected: Color,  // Grid cursor
    pub inactive: Color,     // Inactive borders
    pub header: Color,       // Popup titles and section headings
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired
        Self {
            accent: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(243, 139, 168),
        }
    }
}

impl Theme {
    /// Defaults with any valid overrides from config applied
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();

        let overrides = [
            ("accent", &config.accent, &mut theme.accent),
            ("danger", &config.danger, &mut theme.danger),
            ("text", &config.text, &mut theme.text),
            ("text_dim", &config.text_dim, &mut theme.text_dim),
            ("bg_selected", &config.bg_selected, &mut theme.bg_selected),
            ("inactive", &config.inactive, &mut theme.inactive),
        ];
        for (name, value, slot) in overrides {
            if let Some(color) = override_color(name, value) {
                *slot = color;
            }
        }

        // Headers follow danger unless set explicitly
        theme.header = override_color("header", &config.header).unwrap_or(theme.danger);
        theme
    }
}

fn override_color(name: &str, value: &Option<String>) -> Option<Color> {
    let value = value.as_ref()?;
    let color = parse_hex_color(value);
    if color.is_none() {
        tracing::warn!("Ignoring invalid theme color {} = {:?}", name, value);
    }
    color
}

/// Parse a hex color string (#RRGGBB or #RGB)
pub fn parse_hex_color(s: &str) -> Option<Color> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFC107"), Some(Color::Rgb(255, 193, 7)));
        assert_eq!(parse_hex_color("d35f5f"), Some(Color::Rgb(211, 95, 95)));
        assert_eq!(parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("#12"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_overrides_applied() {
        let config = ThemeConfig {
            accent: Some("#000000".to_string()),
            danger: Some("not a color".to_string()),
            ..ThemeConfig::default()
        };

        let theme = Theme::from_config(&config);
        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        assert_eq!(theme.danger, Theme::default().danger);
        assert_eq!(theme.header, theme.danger);
    }

    #[test]
    fn test_inactive_and_header_overrides() {
        let config = ThemeConfig {
            danger: Some("#ff0000".to_string()),
            inactive: Some("#111".to_string()),
            header: Some("#00ff00".to_string()),
            ..ThemeConfig::default()
        };

        let theme = Theme::from_config(&config);
        assert_eq!(theme.inactive, Color::Rgb(17, 17, 17));
        assert_eq!(theme.header, Color::Rgb(0, 255, 0));
        assert_eq!(theme.danger, Color::Rgb(255, 0, 0));

        // Invalid header falls back to danger
        let config = ThemeConfig {
            danger: Some("#ff0000".to_string()),
            header: Some("bogus".to_string()),
            ..ThemeConfig::default()
        };
        assert_eq!(Theme::from_config(&config).header, Color::Rgb(255, 0, 0));
    }
}
