pub mod surface;
pub mod theme;
pub mod palette;
pub mod language;
pub mod activity;
pub mod svg;

pub use surface::{Color, DrawCommand, Drawing, Rect, TextAlign};
pub use theme::{resolve_dark_mode, Theme, ThemeMode};
pub use language::{legend, render_language_chart, render_language_trend, LegendEntry};
pub use activity::{heatmap_cells, render_activity, render_heatmap, render_no_activity, HeatmapCell};
pub use svg::to_svg;

pub fn placeholder(width: u32, height: u32, message: &str, theme: &Theme) -> Drawing {
    let mut drawing = Drawing::new(width, height, theme.background);
    let (x, y) = (drawing.width() / 2.0, drawing.height() / 2.0);
    drawing.text(message, x, y, 14.0, TextAlign::Center, theme.text);
    drawing
}
