use log::*;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,
    pub info: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

impl Theme {
    /// Return the theme registered under the given name, falling back to the
    /// default for unknown names.
    ///
    pub fn by_name(name: &str) -> Theme {
        match name {
            "tokyo-night" => Theme::tokyo_night(),
            "rose-pine-dawn" => Theme::rose_pine_dawn(),
            unknown => {
                warn!("Unknown theme '{}', using default", unknown);
                Theme::default()
            }
        }
    }

    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Theme {
        Theme {
            name: "tokyo-night".to_string(),
            primary: rgb(122, 162, 247),    // Blue
            secondary: rgb(158, 206, 106),  // Green
            banner: rgb(187, 154, 247),     // Purple
            text: rgb(192, 202, 245),
            text_muted: rgb(86, 95, 137),
            success: rgb(158, 206, 106),
            warning: rgb(224, 175, 104),
            error: rgb(247, 118, 142),
            info: rgb(125, 207, 255),
            border_active: rgb(122, 162, 247),
            border_normal: rgb(59, 66, 97),
            highlight_bg: rgb(40, 52, 87),
            highlight_fg: rgb(192, 202, 245),
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Theme {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: rgb(161, 119, 255),    // Purple
            secondary: rgb(86, 148, 159),   // Teal
            banner: rgb(255, 109, 146),     // Pink
            text: rgb(88, 82, 96),
            text_muted: rgb(152, 147, 165),
            success: rgb(86, 148, 159),
            warning: rgb(234, 157, 52),
            error: rgb(180, 99, 122),
            info: rgb(40, 105, 131),
            border_active: rgb(161, 119, 255),
            border_normal: rgb(223, 218, 217),
            highlight_bg: rgb(244, 237, 232),
            highlight_fg: rgb(88, 82, 96),
        }
    }
}

impl Default for Theme {
    fn default() -> Theme {
        Theme::tokyo_night()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_resolves_known_themes() {
        assert_eq!(Theme::by_name("tokyo-night").name, "tokyo-night");
        assert_eq!(Theme::by_name("rose-pine-dawn").name, "rose-pine-dawn");
    }

    #[test]
    fn test_by_name_falls_back_to_default() {
        assert_eq!(Theme::by_name("no-such-theme").name, Theme::default().name);
    }

    #[test]
    fn test_color_spec_to_color() {
        let spec = rgb(1, 2, 3);
        assert_eq!(spec.to_color(), Color::Rgb(1, 2, 3));
    }
}
