use std::f64::consts::{PI, TAU};

use super::surface::{DrawCommand, Drawing, TextAlign};

pub fn to_svg(drawing: &Drawing) -> String {
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Inter, sans-serif">"#,
        w = drawing.width,
        h = drawing.height
    );
    out.push('\n');

    for command in &drawing.commands {
        out.push_str("  ");
        out.push_str(&element(drawing, command));
        out.push('\n');
    }

    out.push_str("</svg>\n");
    out
}

fn element(drawing: &Drawing, command: &DrawCommand) -> String {
    match command {
        DrawCommand::Clear { color } => format!(
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            drawing.width, drawing.height, color
        ),
        DrawCommand::FillRect { rect, color } => format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            rect.x, rect.y, rect.width, rect.height, color
        ),
        DrawCommand::Wedge {
            cx,
            cy,
            radius,
            start,
            end,
            fill,
            stroke,
            line_width,
        } => {
            let span = end - start;
            if span >= TAU - 1e-9 {
                return format!(
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                    cx, cy, radius, fill, stroke, line_width
                );
            }
            let (x1, y1) = (cx + radius * start.cos(), cy + radius * start.sin());
            let (x2, y2) = (cx + radius * end.cos(), cy + radius * end.sin());
            let large_arc = if span > PI { 1 } else { 0 };
            format!(
                r#"<path d="M {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} Z" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                cx, cy, x1, y1, radius, radius, large_arc, x2, y2, fill, stroke, line_width
            )
        }
        DrawCommand::Text {
            text,
            x,
            y,
            size,
            align,
            color,
        } => {
            let anchor = match align {
                TextAlign::Left => "start",
                TextAlign::Center => "middle",
                TextAlign::Right => "end",
            };
            format!(
                r#"<text x="{:.2}" y="{:.2}" font-size="{}" text-anchor="{}" fill="{}">{}</text>"#,
                x,
                y,
                size,
                anchor,
                color,
                escape(text)
            )
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
