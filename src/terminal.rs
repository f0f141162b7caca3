use crate::color::Color;
use crate::error::AppError;
use error_stack::{IntoReport, Result, ResultExt};
use std::io;
use std::io::Write;
use std::sync::mpsc::Sender;
use termion::color;
use termion::event::Event;
use termion::input::{MouseTerminal, TermRead};
use termion::raw::{IntoRawMode, RawTerminal};
use termion::screen::{AlternateScreen, IntoAlternateScreen};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

pub struct Terminal {
    _stdout: MouseTerminal<AlternateScreen<RawTerminal<io::Stdout>>>,
    cursor: Point,
}

impl Terminal {
    pub fn init() -> Result<Self, AppError> {
        let raw = io::stdout()
            .into_raw_mode()
            .into_report()
            .attach_printable("Could not enter RAW mode.")
            .change_context(AppError::TerminalError)?;
        let screen = raw
            .into_alternate_screen()
            .into_report()
            .attach_printable("Could not switch to the alternate screen.")
            .change_context(AppError::TerminalError)?;
        Ok(Self {
            _stdout: MouseTerminal::from(screen),
            cursor: Point::default(),
        })
    }

    pub fn size() -> Result<(u16, u16), AppError> {
        let size = termion::terminal_size()
            .into_report()
            .attach_printable("Could not determine terminal size.")
            .change_context(AppError::TerminalError)?;
        Ok(size)
    }

    pub fn clear_screen() {
        print!("{}", termion::clear::All);
    }

    pub fn move_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Point { x, y };
        print!(
            "{}",
            termion::cursor::Goto(
                self.cursor.x.saturating_add(1),
                self.cursor.y.saturating_add(1),
            )
        );
    }

    pub fn cursor_hide() {
        print!("{}", termion::cursor::Hide);
    }

    pub fn cursor_show() {
        print!("{}", termion::cursor::Show);
    }

    pub fn flush() -> Result<(), AppError> {
        io::stdout()
            .flush()
            .into_report()
            .attach_printable("Could not flush display buffer to TTY.")
            .change_context(AppError::TerminalError)?;
        Ok(())
    }

    /// Forwards keyboard and mouse events until stdin closes or the receiver hangs up.
    pub fn listen(sink: Sender<Event>) -> Result<(), AppError> {
        for event in io::stdin().events() {
            let event = event
                .into_report()
                .attach_printable("Could not determine user input.")
                .change_context(AppError::UserInput)?;
            sink.send(event)
                .into_report()
                .attach_printable("Could not communicate user input to main thread.")
                .change_context(AppError::ChannelBroken)?;
        }
        Ok(())
    }

    pub fn set_bg_colour(colour: Color) {
        print!("{}", color::Bg(color::Rgb::from(colour)));
    }

    pub fn reset_bg_colour() {
        print!("{}", color::Bg(color::Reset));
    }

    pub fn set_fg_colour(colour: Color) {
        print!("{}", color::Fg(color::Rgb::from(colour)));
    }

    pub fn reset_fg_colour() {
        print!("{}", color::Fg(color::Reset));
    }

    pub fn reset_colour() {
        Self::reset_bg_colour();
        Self::reset_fg_colour();
    }
}
