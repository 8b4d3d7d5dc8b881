use serde::{Deserialize, Serialize};

use super::surface::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub grid: Color,
    pub accent: Color,
}

impl Theme {
    pub const LIGHT: Self = Self {
        background: Color::hex(0xffffff),
        text: Color::hex(0x374151),
        grid: Color::hex(0xe5e7eb),
        accent: Color::hex(0x3b82f6),
    };

    pub const DARK: Self = Self {
        background: Color::hex(0x1f2937),
        text: Color::hex(0xf9fafb),
        grid: Color::hex(0x374151),
        accent: Color::hex(0x60a5fa),
    };

    pub fn resolve(dark: bool) -> Self {
        if dark {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }
}

pub fn resolve_dark_mode(saved: Option<ThemeMode>, system_prefers_dark: bool) -> bool {
    match saved {
        Some(mode) => mode == ThemeMode::Dark,
        None => system_prefers_dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_resolution_order() {
        assert!(resolve_dark_mode(Some(ThemeMode::Dark), false));
        assert!(!resolve_dark_mode(Some(ThemeMode::Light), true));
        assert!(resolve_dark_mode(None, true));
        assert!(!resolve_dark_mode(None, false));
    }

    #[test]
    fn test_resolve_picks_palette() {
        assert_eq!(Theme::resolve(true).background, Color::hex(0x1f2937));
        assert_eq!(Theme::resolve(false).accent, Color::hex(0x3b82f6));
    }
}
