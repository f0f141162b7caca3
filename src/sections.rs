use crate::brush::Brush;
use crate::canvas::{Canvas, Position};
use crate::color::Color;
use crate::cursor::Cursor;
use crate::error::AppError;
use crate::keys::KeyBindings;
use crate::paint::{styled_line, text_line, Glyph, PaintOutput, Painter};
use crate::palette::Palette;
use crate::terminal::Point;
use error_stack::Result;
use termion::event::Key;

const TITLE_COLOUR: Color = Color::new(0x00, 0xd7, 0x00);
const HINT_COLOUR: Color = Color::new(0x58, 0x58, 0x58);
const ERROR_COLOUR: Color = Color::new(0xd7, 0x00, 0x00);
const PROMPT_LIMIT: usize = 400;

/// Screen columns used to draw one canvas cell.
pub const CELL_WIDTH: u16 = 2;
/// Top-left screen cell (0-based) of the canvas.
pub const CANVAS_ORIGIN: Point = Point { x: 1, y: 2 };
/// Columns reserved for the menu and save prompt.
pub const MENU_WIDTH: u16 = 24;
/// Blank columns between the canvas and the menu.
pub const MENU_GAP: u16 = 4;

/// Translates terminal mouse coordinates into canvas positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMapping {
    origin: Point,
    cell_width: u16,
}

impl Default for ScreenMapping {
    fn default() -> Self {
        Self {
            origin: CANVAS_ORIGIN,
            cell_width: CELL_WIDTH,
        }
    }
}

impl ScreenMapping {
    /// `column` and `row` are 1-based, as reported by the terminal. Anything left of or
    /// above the canvas maps to a negative coordinate.
    pub fn to_grid(&self, column: u16, row: u16) -> Position {
        let x = i32::from(column) - 1 - i32::from(self.origin.x);
        let y = i32::from(row) - 1 - i32::from(self.origin.y);
        Position::new(x.div_euclid(i32::from(self.cell_width)), y)
    }
}

pub struct Title;
impl Painter for Title {
    fn paint(&self, width: usize, height: usize) -> Result<PaintOutput, AppError> {
        let mut output: PaintOutput = Vec::with_capacity(height);
        output.push(styled_line("  Vango - Terminal Paint", Some(TITLE_COLOUR), width));
        output.resize(height, vec![Glyph::BLANK; width]);
        Ok(output)
    }
}

pub struct CanvasView<'a> {
    canvas: &'a Canvas,
}
impl<'a> CanvasView<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self { canvas }
    }
}
impl<'a> Painter for CanvasView<'a> {
    fn paint(&self, width: usize, height: usize) -> Result<PaintOutput, AppError> {
        let mut output: PaintOutput = Vec::with_capacity(height);
        for y in 0..self.canvas.height().min(height) {
            let mut line: Vec<Glyph> = Vec::with_capacity(width);
            for x in 0..self.canvas.width() {
                if let Some(cell) = self.canvas.cell(Position::new(x as i32, y as i32)) {
                    let glyph = Glyph::block(cell.color());
                    line.extend(std::iter::repeat(glyph).take(CELL_WIDTH.into()));
                }
            }
            line.resize(width, Glyph::BLANK);
            output.push(line);
        }
        output.resize(height, vec![Glyph::BLANK; width]);
        Ok(output)
    }
}

pub struct Menu<'a> {
    pub palette: &'a Palette,
    pub color_cursor: Cursor,
    pub brush_cursor: Cursor,
}
impl<'a> Painter for Menu<'a> {
    fn paint(&self, width: usize, height: usize) -> Result<PaintOutput, AppError> {
        let marker = |selected: bool| if selected { '→' } else { ' ' };
        let mut output: PaintOutput = Vec::with_capacity(height);

        let mut heading = text_line("Colors ", width);
        let hint = styled_line("c↓/C↑", Some(HINT_COLOUR), width.saturating_sub(7));
        heading.splice(7.min(width).., hint);
        output.push(heading);
        output.push(text_line("", width));
        for (index, colour) in self.palette.colors().iter().enumerate() {
            let mut line = vec![
                Glyph::plain(marker(index == self.color_cursor.pos())),
                Glyph::BLANK,
                Glyph::block(*colour),
                Glyph::block(*colour),
            ];
            line.resize(width, Glyph::BLANK);
            output.push(line);
        }

        output.push(text_line("", width));
        let mut heading = text_line("Brushes ", width);
        let hint = styled_line("b↓/B↑", Some(HINT_COLOUR), width.saturating_sub(8));
        heading.splice(8.min(width).., hint);
        output.push(heading);
        output.push(text_line("", width));
        for (index, brush) in Brush::ALL.iter().enumerate() {
            let label = format!("{} {}", marker(index == self.brush_cursor.pos()), brush);
            output.push(text_line(&label, width));
        }

        output.resize(height, vec![Glyph::BLANK; width]);
        Ok(output)
    }
}

/// Text entry for the export path.
#[derive(Debug, Default)]
pub struct SavePrompt {
    input: String,
    open: bool,
}
impl SavePrompt {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.input.clear();
    }

    /// Closes the prompt and hands back whatever was typed.
    pub fn close(&mut self) -> String {
        self.open = false;
        std::mem::take(&mut self.input)
    }

    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Char(c) if c != '\n' && c != '\t' => {
                if self.input.chars().count() < PROMPT_LIMIT {
                    self.input.push(c);
                }
            }
            Key::Backspace => {
                self.input.pop();
            }
            _ => (),
        }
    }
}
impl Painter for SavePrompt {
    fn paint(&self, width: usize, height: usize) -> Result<PaintOutput, AppError> {
        let mut output: PaintOutput = Vec::with_capacity(height);
        if self.open {
            output.push(text_line("Save as PNG", width));
            // Keep the tail of long paths visible.
            let visible = width.saturating_sub(3);
            let skip = self.input.chars().count().saturating_sub(visible);
            let shown: String = self.input.chars().skip(skip).collect();
            output.push(text_line(&format!("> {shown}_"), width));
        }
        output.resize(height, vec![Glyph::BLANK; width]);
        Ok(output)
    }
}

#[derive(Debug, Default)]
pub struct Status {
    message: Option<(String, bool)>,
}
impl Status {
    pub fn info(&mut self, message: impl Into<String>) {
        self.message = Some((message.into(), false));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.message = Some((message.into(), true));
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}
impl Painter for Status {
    fn paint(&self, width: usize, height: usize) -> Result<PaintOutput, AppError> {
        let mut output: PaintOutput = Vec::with_capacity(height);
        if let Some((message, is_error)) = &self.message {
            let colour = is_error.then_some(ERROR_COLOUR);
            output.push(styled_line(message, colour, width));
        }
        output.resize(height, vec![Glyph::BLANK; width]);
        Ok(output)
    }
}

pub struct Help<'a> {
    pub keys: &'a KeyBindings,
}
impl<'a> Painter for Help<'a> {
    fn paint(&self, width: usize, height: usize) -> Result<PaintOutput, AppError> {
        let text = self
            .keys
            .help()
            .map(|(keys, description)| format!("{keys} {description}"))
            .collect::<Vec<_>>()
            .join(" • ");
        let mut output: PaintOutput = Vec::with_capacity(height);
        output.push(styled_line(&format!("  {text}"), Some(HINT_COLOUR), width));
        output.resize(height, vec![Glyph::BLANK; width]);
        Ok(output)
    }
}
