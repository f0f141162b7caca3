use crate::brush::Brush;
use crate::canvas::Canvas;
use crate::config::Config;
use crate::cursor::Cursor;
use crate::error::AppError;
use crate::export::{self, ExportOutcome};
use crate::keys::{Command, KeyBindings};
use crate::paint::{Paintable, Painter};
use crate::palette::Palette;
use crate::sections::{self, ScreenMapping, CANVAS_ORIGIN, CELL_WIDTH, MENU_GAP, MENU_WIDTH};
use crate::terminal::{Point, Size, Terminal};
use crate::THREAD_SLOW_DOWN;
use error_stack::{IntoReport, Result, ResultExt};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use termion::event::{Event, Key, MouseButton, MouseEvent};

struct Sections {
    title: sections::Title,
    prompt: sections::SavePrompt,
    status: sections::Status,
}

pub struct WindowReceiver {
    input: Receiver<Event>,
    export: Receiver<ExportOutcome>,
}
impl WindowReceiver {
    pub fn new(input: Receiver<Event>, export: Receiver<ExportOutcome>) -> Self {
        Self { input, export }
    }
}

/// Owns the canvas and applies one mutation per input event.
pub struct Window {
    terminal: Terminal,
    should_quit: bool,
    needs_redraw: bool,
    mouse_down: bool,

    receiver: WindowReceiver,
    export_sink: Sender<ExportOutcome>,
    sections: Sections,
    canvas: Canvas,
    palette: Palette,
    keys: KeyBindings,
    mapping: ScreenMapping,
    color_cursor: Cursor,
    brush_cursor: Cursor,
}
impl Window {
    pub fn new(terminal: Terminal, config: &Config, input: Receiver<Event>) -> Self {
        let terminal_size = Terminal::size()
            .map_err(|report| warn!("Falling back to default canvas size: {report:?}"))
            .ok();
        let (width, height) = config.canvas_size(terminal_size);
        info!("Starting with a {width}x{height} canvas");

        let (export_sink, export_receiver) = mpsc::channel::<ExportOutcome>();
        let palette = config.palette.clone();
        let mut canvas = Canvas::new(width, height);
        canvas.set_color(palette.first());

        Self {
            terminal,
            should_quit: false,
            needs_redraw: true,
            mouse_down: false,
            receiver: WindowReceiver::new(input, export_receiver),
            export_sink,
            sections: Sections {
                title: sections::Title,
                prompt: sections::SavePrompt::default(),
                status: sections::Status::default(),
            },
            color_cursor: Cursor::over(palette.len()),
            brush_cursor: Cursor::over(Brush::ALL.len()),
            canvas,
            palette,
            keys: KeyBindings::default(),
            mapping: ScreenMapping::default(),
        }
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        Terminal::clear_screen();

        'main: loop {
            if self.should_quit {
                break 'main;
            }

            match self.receiver.input.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Empty) => (),
                Err(err) => Err(err)
                    .into_report()
                    .attach_printable("User Input thread communication broke.")
                    .change_context(AppError::ChannelBroken)?,
            }

            match self.receiver.export.try_recv() {
                Ok(outcome) => self.handle_export(outcome),
                Err(TryRecvError::Empty) => (),
                // We hold a sender ourselves, so this cannot disconnect.
                Err(TryRecvError::Disconnected) => (),
            }

            if self.needs_redraw {
                self.draw()?;
                self.needs_redraw = false;
            }
            thread::sleep(THREAD_SLOW_DOWN);
        }

        Terminal::clear_screen();
        self.terminal.move_cursor(0, 0);
        Terminal::cursor_show();
        Terminal::flush()?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Unsupported(_) => return,
        }
        self.needs_redraw = true;
    }

    fn handle_key(&mut self, key: Key) {
        let command = self.keys.lookup(&key);

        if self.sections.prompt.is_open() {
            match command {
                Some(Command::Submit) => self.submit_save(),
                Some(Command::Cancel) => {
                    self.sections.prompt.close();
                }
                Some(Command::Quit) if key == Key::Ctrl('c') => self.should_quit = true,
                _ => self.sections.prompt.handle_key(key),
            }
            return;
        }

        let Some(command) = command else {
            return;
        };
        debug!("Key {key:?} -> {command:?}");
        match command {
            Command::NextColor => {
                self.color_cursor.next();
                self.select_color();
            }
            Command::PrevColor => {
                self.color_cursor.prev();
                self.select_color();
            }
            Command::NextBrush => {
                self.brush_cursor.next();
                self.select_brush();
            }
            Command::PrevBrush => {
                self.brush_cursor.prev();
                self.select_brush();
            }
            Command::Wipe => self.canvas.clear(),
            Command::Undo => self.canvas.undo(),
            Command::Save => {
                self.sections.status.clear();
                self.sections.prompt.open();
            }
            Command::Quit => self.should_quit = true,
            Command::Submit | Command::Cancel => (),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse {
            MouseEvent::Press(MouseButton::Left, column, row) => {
                self.mouse_down = true;
                self.canvas.begin_stroke();
                self.canvas.color_cell(self.mapping.to_grid(column, row));
            }
            MouseEvent::Hold(column, row) if self.mouse_down => {
                self.canvas.color_cell(self.mapping.to_grid(column, row));
            }
            MouseEvent::Release(_, _) => {
                self.mouse_down = false;
                self.canvas.end_stroke();
            }
            _ => (),
        }
    }

    fn select_color(&mut self) {
        if let Some(color) = self.palette.get(self.color_cursor.pos()) {
            self.canvas.set_color(color);
        }
    }

    fn select_brush(&mut self) {
        if let Some(brush) = Brush::ALL.get(self.brush_cursor.pos()) {
            self.canvas.set_brush(*brush);
        }
    }

    fn submit_save(&mut self) {
        let path = self.sections.prompt.close();
        let path = path.trim();
        if path.is_empty() {
            self.sections.status.error("No file name given.");
            return;
        }
        self.sections.status.info(format!("Saving to {path}..."));
        export::spawn(self.canvas.export(), PathBuf::from(path), self.export_sink.clone());
    }

    fn handle_export(&mut self, outcome: ExportOutcome) {
        match outcome {
            Ok(path) => {
                info!("Saved canvas to {}", path.display());
                self.sections.status.info(format!("Saved to {}", path.display()));
            }
            Err(report) => {
                let reason = report
                    .frames()
                    .find_map(|frame| frame.downcast_ref::<String>())
                    .cloned()
                    .unwrap_or_else(|| report.current_context().to_string());
                self.sections.status.error(format!("Export failed: {reason}"));
            }
        }
        self.needs_redraw = true;
    }

    fn draw(&mut self) -> Result<(), AppError> {
        let terminal = &mut self.terminal;
        let layout = Layout::new(&self.canvas, &self.palette);
        let canvas = sections::CanvasView::new(&self.canvas);
        let menu = sections::Menu {
            palette: &self.palette,
            color_cursor: self.color_cursor,
            brush_cursor: self.brush_cursor,
        };
        let help = sections::Help { keys: &self.keys };
        let paintables = [
            Paintable::new(&self.sections.title, layout.title.0, layout.title.1),
            Paintable::new(&canvas, layout.canvas.0, layout.canvas.1),
            Paintable::new(&menu, layout.menu.0, layout.menu.1),
            Paintable::new(&self.sections.prompt, layout.prompt.0, layout.prompt.1),
            Paintable::new(&self.sections.status, layout.status.0, layout.status.1),
            Paintable::new(&help, layout.help.0, layout.help.1),
        ];

        Terminal::cursor_hide();
        for paintable in paintables.iter() {
            let content = paintable
                .paint(
                    paintable.bounds().width as usize,
                    paintable.bounds().height as usize,
                )
                .attach_printable("Could not render screen section.")?;
            let origin = paintable.position();
            for (offset, line) in content.iter().enumerate() {
                terminal.move_cursor(origin.x, origin.y + offset as u16);
                for glyph in line {
                    match glyph.bg {
                        Some(colour) => Terminal::set_bg_colour(colour),
                        None => Terminal::reset_bg_colour(),
                    }
                    match glyph.fg {
                        Some(colour) => Terminal::set_fg_colour(colour),
                        None => Terminal::reset_fg_colour(),
                    }
                    print!("{}", glyph.symbol);
                }
                Terminal::reset_colour();
            }
        }
        Terminal::flush()?;
        Ok(())
    }
}

type Region = (Point, Size);

struct Layout {
    title: Region,
    canvas: Region,
    menu: Region,
    prompt: Region,
    status: Region,
    help: Region,
}
impl Layout {
    /// Screen arithmetic saturates, so an oversized canvas clips at the screen edge.
    fn new(canvas: &Canvas, palette: &Palette) -> Self {
        let cells_wide = u16::try_from(canvas.width()).unwrap_or(u16::MAX);
        let canvas_width = cells_wide.saturating_mul(CELL_WIDTH);
        let canvas_height = u16::try_from(canvas.height()).unwrap_or(u16::MAX);
        let menu_x = CANVAS_ORIGIN
            .x
            .saturating_add(canvas_width)
            .saturating_add(MENU_GAP);
        let menu_rows = palette.len().saturating_add(Brush::ALL.len() + 6);
        let menu_height = u16::try_from(menu_rows).unwrap_or(u16::MAX);
        let below = CANVAS_ORIGIN
            .y
            .saturating_add(canvas_height.max(menu_height.saturating_add(3)))
            .saturating_add(1);
        let full_width = menu_x.saturating_add(MENU_WIDTH);

        Self {
            title: (Point { x: 0, y: 0 }, Size { width: full_width, height: 2 }),
            canvas: (
                CANVAS_ORIGIN,
                Size {
                    width: canvas_width,
                    height: canvas_height,
                },
            ),
            menu: (
                Point {
                    x: menu_x,
                    y: CANVAS_ORIGIN.y,
                },
                Size {
                    width: MENU_WIDTH,
                    height: menu_height,
                },
            ),
            prompt: (
                Point {
                    x: menu_x,
                    y: CANVAS_ORIGIN.y.saturating_add(menu_height).saturating_add(1),
                },
                Size {
                    width: MENU_WIDTH,
                    height: 2,
                },
            ),
            status: (Point { x: 2, y: below }, Size { width: full_width, height: 1 }),
            help: (
                Point {
                    x: 0,
                    y: below.saturating_add(1),
                },
                Size {
                    width: full_width,
                    height: 1,
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_HEIGHT, MAX_WIDTH};

    #[test]
    fn layout_places_menu_right_of_the_canvas() {
        let layout = Layout::new(&Canvas::new(10, 5), &Palette::default());
        assert_eq!(layout.canvas.1.width, 20);
        assert_eq!(layout.menu.0.x, CANVAS_ORIGIN.x + 20 + MENU_GAP);
        assert_eq!(layout.title.1.width, layout.menu.0.x + MENU_WIDTH);
        assert!(layout.status.0.y > layout.prompt.0.y);
        assert_eq!(layout.help.0.y, layout.status.0.y + 1);
    }

    #[test]
    fn largest_accepted_canvas_fits_the_screen() {
        let wide = Layout::new(&Canvas::new(MAX_WIDTH, 1), &Palette::default());
        assert_eq!(wide.title.1.width, u16::MAX);
        assert!(wide.menu.0.x > wide.canvas.1.width);

        let tall = Layout::new(&Canvas::new(1, MAX_HEIGHT), &Palette::default());
        assert_eq!(tall.help.0.y, u16::MAX);
        assert!(tall.status.0.y > tall.canvas.1.height);
    }

    #[test]
    fn oversized_canvas_saturates_instead_of_wrapping() {
        let wide = Layout::new(&Canvas::new(40_000, 1), &Palette::default());
        assert_eq!(wide.canvas.1.width, u16::MAX);
        assert_eq!(wide.title.1.width, u16::MAX);

        let tall = Layout::new(&Canvas::new(1, 70_000), &Palette::default());
        assert_eq!(tall.canvas.1.height, u16::MAX);
        assert_eq!(tall.help.0.y, u16::MAX);
    }
}
