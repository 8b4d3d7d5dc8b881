use super::surface::Color;
use crate::taxonomy::language_color;

pub const FALLBACK_PALETTE: [Color; 8] = [
    Color::hex(0x3b82f6),
    Color::hex(0xef4444),
    Color::hex(0x10b981),
    Color::hex(0xf59e0b),
    Color::hex(0x8b5cf6),
    Color::hex(0x06b6d4),
    Color::hex(0xf97316),
    Color::hex(0x84cc16),
];

pub fn fallback_color(index: usize) -> Color {
    FALLBACK_PALETTE[index % FALLBACK_PALETTE.len()]
}

pub fn series_color(language: &str, index: usize) -> Color {
    language_color(language).unwrap_or_else(|| fallback_color(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_color_falls_back_by_index() {
        assert_eq!(series_color("Elm", 0), Color::hex(0x3b82f6));
        assert_eq!(series_color("Elm", 9), Color::hex(0xef4444));
        assert_eq!(series_color("Rust", 3), Color::hex(0xdea584));
    }
}
