use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 0xff,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { color: Color },
    FillRect { rect: Rect, color: Color },
    Wedge {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        fill: Color,
        stroke: Color,
        line_width: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        size: f64,
        align: TextAlign,
        color: Color,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl Drawing {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            commands: vec![DrawCommand::Clear { color: background }],
        }
    }

    pub fn width(&self) -> f64 {
        f64::from(self.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.height)
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            rect: Rect {
                x,
                y,
                width,
                height,
            },
            color,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, x: f64, y: f64, size: f64, align: TextAlign, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            x,
            y,
            size,
            align,
            color,
        });
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn wedges(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Wedge { start, end, .. } => Some((*start, *end)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, color } => Some((rect, *color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
