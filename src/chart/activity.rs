use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::placeholder;
use super::surface::{Color, Drawing, TextAlign};
use super::theme::Theme;
use crate::format::axis_date_label;
use crate::models::analysis::ActivityBucket;

pub const ACTIVITY_CHART_WIDTH: u32 = 400;
pub const ACTIVITY_CHART_HEIGHT: u32 = 200;

const BAR_GAP: f64 = 2.0;
const VERTICAL_MARGIN: f64 = 20.0;
const MAX_AXIS_LABELS: usize = 5;

pub const NO_ACTIVITY: &str = "No activity data available";

pub fn render_no_activity(theme: &Theme) -> Drawing {
    placeholder(ACTIVITY_CHART_WIDTH, ACTIVITY_CHART_HEIGHT, NO_ACTIVITY, theme)
}

pub fn render_activity(buckets: &[ActivityBucket], theme: &Theme) -> Drawing {
    if buckets.is_empty() {
        return render_no_activity(theme);
    }

    let mut drawing = Drawing::new(ACTIVITY_CHART_WIDTH, ACTIVITY_CHART_HEIGHT, theme.background);
    let width = drawing.width();
    let height = drawing.height();

    let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;
    let bar_width = width / buckets.len() as f64 - BAR_GAP;
    let max_bar_height = height - 2.0 * VERTICAL_MARGIN;

    for (index, bucket) in buckets.iter().enumerate() {
        let bar_height = f64::from(bucket.count) / max_count * max_bar_height;
        let x = index as f64 * (bar_width + BAR_GAP);
        let y = height - bar_height - VERTICAL_MARGIN;

        let color = if bucket.count > 0 { theme.accent } else { theme.grid };
        drawing.fill_rect(x, y, bar_width, bar_height, color);

        if bucket.count > 0 {
            drawing.text(
                bucket.count.to_string(),
                x + bar_width / 2.0,
                y - 5.0,
                10.0,
                TextAlign::Center,
                theme.text,
            );
        }
    }

    let stride = label_stride(buckets.len());
    for (index, bucket) in buckets.iter().enumerate().step_by(stride) {
        drawing.text(
            axis_date_label(bucket.date),
            index as f64 * (bar_width + BAR_GAP) + bar_width / 2.0,
            height - 5.0,
            8.0,
            TextAlign::Center,
            theme.text,
        );
    }

    drawing
}

pub fn label_stride(days: usize) -> usize {
    days.div_ceil(MAX_AXIS_LABELS).max(1)
}

pub const HEATMAP_MAX_LEVEL: u8 = 4;
const CELL_SIZE: f64 = 10.0;
const CELL_STEP: f64 = 12.0;
const LEVEL_ALPHA: [u8; 4] = [0x40, 0x80, 0xbf, 0xff];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
}

pub fn heatmap_cells(buckets: &[ActivityBucket]) -> Vec<HeatmapCell> {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);

    buckets
        .iter()
        .map(|bucket| {
            let level = if bucket.count == 0 || max == 0 {
                0
            } else {
                let scaled = (u64::from(bucket.count) * u64::from(HEATMAP_MAX_LEVEL)).div_ceil(u64::from(max));
                scaled.clamp(1, u64::from(HEATMAP_MAX_LEVEL)) as u8
            };
            HeatmapCell {
                date: bucket.date,
                count: bucket.count,
                level,
            }
        })
        .collect()
}

fn level_color(level: u8, theme: &Theme) -> Color {
    match level {
        0 => theme.grid,
        n => theme.accent.with_alpha(LEVEL_ALPHA[usize::from(n.min(HEATMAP_MAX_LEVEL)) - 1]),
    }
}

pub fn render_heatmap(cells: &[HeatmapCell], theme: &Theme) -> Drawing {
    let offset = cells
        .first()
        .map(|c| c.date.weekday().num_days_from_sunday() as usize)
        .unwrap_or(0);
    let columns = (offset + cells.len()).div_ceil(7).max(1);

    let width = (columns as f64 * CELL_STEP + BAR_GAP) as u32;
    let height = (7.0 * CELL_STEP + BAR_GAP) as u32;
    let mut drawing = Drawing::new(width, height, theme.background);

    for (index, cell) in cells.iter().enumerate() {
        let slot = offset + index;
        let x = (slot / 7) as f64 * CELL_STEP + BAR_GAP;
        let y = (slot % 7) as f64 * CELL_STEP + BAR_GAP;
        drawing.fill_rect(x, y, CELL_SIZE, CELL_SIZE, level_color(cell.level, theme));
    }

    drawing
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn series(start: &str, counts: &[u32]) -> Vec<ActivityBucket> {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        counts
            .iter()
            .enumerate()
            .map(|(i, c)| ActivityBucket {
                date: start + Duration::days(i as i64),
                count: *c,
            })
            .collect()
    }

    #[test]
    fn test_label_stride() {
        assert_eq!(label_stride(7), 2);
        assert_eq!(label_stride(30), 6);
        assert_eq!(label_stride(90), 18);
    }

    #[test]
    fn test_activity_bars_and_labels() {
        let buckets = series("2024-03-25", &[0, 2, 0, 4, 0, 0, 1]);
        let drawing = render_activity(&buckets, &Theme::LIGHT);

        let rects: Vec<_> = drawing.rects().collect();
        assert_eq!(rects.len(), 7);
        assert_eq!(rects[0].1, Theme::LIGHT.grid);
        assert_eq!(rects[0].0.height, 0.0);
        assert_eq!(rects[3].1, Theme::LIGHT.accent);
        assert_eq!(rects[3].0.height, 160.0);
        assert_eq!(rects[1].0.height, 80.0);

        let texts: Vec<_> = drawing.texts().collect();
        assert_eq!(texts, vec!["2", "4", "1", "3/25", "3/27", "3/29", "3/31"]);
    }

    #[test]
    fn test_all_idle_window_does_not_divide_by_zero() {
        let buckets = series("2024-03-01", &[0; 30]);
        let drawing = render_activity(&buckets, &Theme::DARK);
        assert!(drawing.rects().all(|(r, c)| r.height == 0.0 && c == Theme::DARK.grid));
        assert_eq!(drawing.texts().count(), 5);
    }

    #[test]
    fn test_heatmap_levels_are_relative_to_busiest_day() {
        let cells = heatmap_cells(&series("2024-01-01", &[0, 1, 2, 3, 8]));
        let levels: Vec<u8> = cells.iter().map(|c| c.level).collect();
        assert_eq!(levels, vec![0, 1, 1, 2, 4]);
    }

    #[test]
    fn test_heatmap_layout_aligns_weekdays() {
        // 2024-01-03 is a Wednesday, so the first cell sits in row 3.
        let cells = heatmap_cells(&series("2024-01-03", &[1; 365]));
        let drawing = render_heatmap(&cells, &Theme::LIGHT);
        let first = drawing.rects().next().map(|(r, _)| (r.x, r.y));
        assert_eq!(first, Some((2.0, 3.0 * 12.0 + 2.0)));
        assert_eq!(drawing.rects().count(), 365);
        assert_eq!(drawing.width, 53 * 12 + 2);
    }
}
