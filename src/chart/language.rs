use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Serialize;

use super::palette::series_color;
use super::placeholder;
use super::surface::{Color, DrawCommand, Drawing, TextAlign};
use super::theme::Theme;
use crate::models::analysis::LanguageStat;
use crate::state::selection::ChartKind;

pub const LANGUAGE_CHART_WIDTH: u32 = 300;
pub const LANGUAGE_CHART_HEIGHT: u32 = 300;
pub const TREND_CHART_WIDTH: u32 = 300;
pub const TREND_CHART_HEIGHT: u32 = 200;

const PIE_RADIUS: f64 = 120.0;
const SLICE_BORDER: f64 = 2.0;
const BAR_MARGIN: f64 = 10.0;
const BOTTOM_MARGIN: f64 = 20.0;
const TREND_LANGUAGES: usize = 5;

const NO_LANGUAGES: &str = "No language data available";

pub fn render_language_chart(stats: &[LanguageStat], kind: ChartKind, theme: &Theme) -> Drawing {
    match kind {
        ChartKind::Pie => render_pie(stats, theme),
        ChartKind::Bar => render_bar(stats, theme),
    }
}

pub fn render_pie(stats: &[LanguageStat], theme: &Theme) -> Drawing {
    let total: u64 = stats.iter().map(|s| s.value).sum();
    if total == 0 {
        return placeholder(LANGUAGE_CHART_WIDTH, LANGUAGE_CHART_HEIGHT, NO_LANGUAGES, theme);
    }

    let mut drawing = Drawing::new(LANGUAGE_CHART_WIDTH, LANGUAGE_CHART_HEIGHT, theme.background);
    let cx = drawing.width() / 2.0;
    let cy = drawing.height() / 2.0;

    let mut angle = -FRAC_PI_2;
    for (index, stat) in stats.iter().enumerate() {
        let span = stat.value as f64 / total as f64 * TAU;
        drawing.push(DrawCommand::Wedge {
            cx,
            cy,
            radius: PIE_RADIUS,
            start: angle,
            end: angle + span,
            fill: series_color(&stat.language, index),
            stroke: theme.background,
            line_width: SLICE_BORDER,
        });
        angle += span;
    }

    drawing
}

pub fn render_bar(stats: &[LanguageStat], theme: &Theme) -> Drawing {
    if stats.is_empty() {
        return placeholder(LANGUAGE_CHART_WIDTH, LANGUAGE_CHART_HEIGHT, NO_LANGUAGES, theme);
    }

    let mut drawing = Drawing::new(LANGUAGE_CHART_WIDTH, LANGUAGE_CHART_HEIGHT, theme.background);
    let width = drawing.width();
    let height = drawing.height();

    let max_value = stats.iter().map(|s| s.value).max().unwrap_or(0).max(1) as f64;
    let bar_width = width / stats.len() as f64 - BAR_MARGIN;
    let max_bar_height = height - 2.0 * BOTTOM_MARGIN;

    for (index, stat) in stats.iter().enumerate() {
        let bar_height = stat.value as f64 / max_value * max_bar_height;
        let x = index as f64 * (bar_width + BAR_MARGIN) + BAR_MARGIN / 2.0;
        let y = height - bar_height - BOTTOM_MARGIN;

        drawing.fill_rect(x, y, bar_width, bar_height, series_color(&stat.language, index));

        let label: String = stat.language.chars().take(3).collect();
        drawing.text(label, x + bar_width / 2.0, height - 5.0, 10.0, TextAlign::Center, theme.text);
    }

    drawing
}

pub fn render_language_trend(stats: &[LanguageStat], theme: &Theme) -> Drawing {
    let top = &stats[..stats.len().min(TREND_LANGUAGES)];
    if top.is_empty() {
        return placeholder(TREND_CHART_WIDTH, TREND_CHART_HEIGHT, NO_LANGUAGES, theme);
    }

    let mut drawing = Drawing::new(TREND_CHART_WIDTH, TREND_CHART_HEIGHT, theme.background);
    let max_width = drawing.width() - 100.0;
    let max_value = top.iter().map(|s| s.value).max().unwrap_or(0).max(1) as f64;

    for (index, stat) in top.iter().enumerate() {
        let y = 50.0 + index as f64 * 30.0;
        let width = stat.value as f64 / max_value * max_width;
        drawing.fill_rect(80.0, y, width, 20.0, series_color(&stat.language, index));
        drawing.text(stat.language.clone(), 75.0, y + 15.0, 12.0, TextAlign::Right, theme.text);
    }

    drawing
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub language: String,
    pub color: Color,
    pub percentage: f64,
}

impl LegendEntry {
    pub fn label(&self) -> String {
        format!("{} ({:.1}%)", self.language, self.percentage)
    }
}

pub fn legend(stats: &[LanguageStat]) -> Vec<LegendEntry> {
    let total: u64 = stats.iter().map(|s| s.value).sum();

    stats
        .iter()
        .enumerate()
        .map(|(index, stat)| {
            let share = if total == 0 {
                0.0
            } else {
                stat.value as f64 / total as f64 * 100.0
            };
            LegendEntry {
                language: stat.language.clone(),
                color: series_color(&stat.language, index),
                percentage: (share * 10.0).round() / 10.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn stats(items: &[(&str, u64)]) -> Vec<LanguageStat> {
        items.iter().map(|(l, v)| LanguageStat::new(*l, *v)).collect()
    }

    #[test]
    fn test_pie_angles_cover_full_turn() {
        let drawing = render_pie(&stats(&[("Go", 300), ("Rust", 100)]), &Theme::LIGHT);
        let wedges: Vec<_> = drawing.wedges().collect();

        assert_eq!(wedges.len(), 2);
        let (go_start, go_end) = wedges[0];
        assert!((go_start + PI / 2.0).abs() < EPS);
        assert!((go_end - go_start - 3.0 * PI / 2.0).abs() < EPS);

        let (rust_start, rust_end) = wedges[1];
        assert!((rust_start - go_end).abs() < EPS);
        let swept: f64 = wedges.iter().map(|(s, e)| e - s).sum();
        assert!((swept - TAU).abs() < EPS);
        assert!((rust_end - 3.0 * PI / 2.0).abs() < EPS);
    }

    #[test]
    fn test_pie_colors_and_border() {
        let drawing = render_pie(&stats(&[("Go", 1), ("Elm", 1)]), &Theme::DARK);
        let fills: Vec<_> = drawing
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Wedge { fill, stroke, .. } => Some((*fill, *stroke)),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            vec![
                (Color::hex(0x00add8), Theme::DARK.background),
                (Color::hex(0xef4444), Theme::DARK.background),
            ]
        );
    }

    #[test]
    fn test_empty_pie_renders_placeholder() {
        let drawing = render_pie(&[], &Theme::LIGHT);
        assert_eq!(drawing.wedges().count(), 0);
        assert_eq!(drawing.texts().collect::<Vec<_>>(), vec![NO_LANGUAGES]);
    }

    #[test]
    fn test_bar_geometry() {
        let drawing = render_bar(&stats(&[("JavaScript", 200), ("Go", 100)]), &Theme::LIGHT);
        let rects: Vec<_> = drawing.rects().collect();

        // 300 / 2 - 10 = 140 wide, tallest bar spans 300 - 40.
        assert_eq!(rects[0].0.width, 140.0);
        assert_eq!(rects[0].0.height, 260.0);
        assert_eq!(rects[0].0.x, 5.0);
        assert_eq!(rects[0].0.y, 20.0);
        assert_eq!(rects[1].0.x, 155.0);
        assert_eq!(rects[1].0.height, 130.0);
        assert_eq!(drawing.texts().collect::<Vec<_>>(), vec!["Jav", "Go"]);
    }

    #[test]
    fn test_bar_with_all_zero_values_has_flat_bars() {
        let drawing = render_bar(&stats(&[("C", 0)]), &Theme::LIGHT);
        let rects: Vec<_> = drawing.rects().collect();
        assert_eq!(rects[0].0.height, 0.0);
    }

    #[test]
    fn test_trend_uses_top_five() {
        let input = stats(&[("A", 60), ("B", 50), ("C", 40), ("D", 30), ("E", 20), ("F", 10)]);
        let drawing = render_language_trend(&input, &Theme::LIGHT);
        assert_eq!(drawing.rects().count(), 5);
        assert_eq!(drawing.rects().next().map(|(r, _)| r.width), Some(200.0));
    }

    #[test]
    fn test_legend_percentages() {
        let entries = legend(&stats(&[("Go", 2), ("Rust", 1)]));
        assert_eq!(entries[0].percentage, 66.7);
        assert_eq!(entries[1].percentage, 33.3);
        assert_eq!(entries[0].label(), "Go (66.7%)");
        assert_eq!(entries[1].color, Color::hex(0xdea584));
    }
}
