use crate::color::Color;
use crate::error::AppError;
use crate::terminal::{Point, Size};
use error_stack::Result;

/// One terminal column of output with optional colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph {
        symbol: ' ',
        fg: None,
        bg: None,
    };

    pub fn plain(symbol: char) -> Self {
        Self {
            symbol,
            ..Self::BLANK
        }
    }

    pub fn block(bg: Color) -> Self {
        Self {
            bg: Some(bg),
            ..Self::BLANK
        }
    }
}

pub type PaintOutput = Vec<Vec<Glyph>>;

/// A line of uncoloured text, cut or padded to exactly `width` columns.
pub fn text_line(text: &str, width: usize) -> Vec<Glyph> {
    styled_line(text, None, width)
}

pub fn styled_line(text: &str, fg: Option<Color>, width: usize) -> Vec<Glyph> {
    let mut line: Vec<Glyph> = text
        .chars()
        .map(|symbol| Glyph { fg, ..Glyph::plain(symbol) })
        .collect();
    line.resize(width, Glyph::BLANK);
    line
}

pub trait Painter {
    fn paint(&self, width: usize, height: usize) -> Result<PaintOutput, AppError>;
}

pub struct Paintable<'a> {
    painter: &'a dyn Painter,
    position: Point,
    bounds: Size,
}
impl<'a> Paintable<'a> {
    pub fn new(painter: &'a dyn Painter, position: Point, bounds: Size) -> Self {
        Self {
            painter,
            position,
            bounds,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }
}
impl<'a> Painter for Paintable<'a> {
    fn paint(&self, width: usize, height: usize) -> Result<PaintOutput, AppError> {
        self.painter.paint(width, height)
    }
}
