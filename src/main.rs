mod brush;
mod canvas;
mod cell;
mod color;
mod config;
mod cursor;
mod error;
mod export;
mod history;
mod keys;
mod paint;
mod palette;
mod sections;
mod terminal;
mod window;

use crate::config::{Config, USAGE};
use crate::error::{AppError, InitError};
use crate::window::Window;
use error_stack::{IntoReport, Result, ResultExt};
use std::fs::File;
use std::process::ExitCode;
use std::sync::mpsc;
use std::time::Duration;
use std::{env, thread};
use terminal::Terminal;
use termion::event::Event;

// Don't hog an entire CPU core at 100% in the infinite loop. Chill out for a little bit each iteration.
pub(crate) const THREAD_SLOW_DOWN: Duration = Duration::from_millis(5);

fn main() -> Result<ExitCode, AppError> {
    let config = Config::from_args(env::args().skip(1))
        .attach_printable("Could not read command line arguments.")
        .change_context(AppError::InitError)?;
    if config.show_help {
        println!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    }

    init_logging(&config).change_context(AppError::InitError)?;

    let mut window: Window = start_window(&config)
        .attach_printable("Could not start application due to initialization errors.")
        .change_context(AppError::InitError)?;
    window.run()?;

    log::info!("Bye");
    Ok(ExitCode::SUCCESS)
}

fn init_logging(config: &Config) -> Result<(), InitError> {
    let file = File::create(&config.log_file)
        .into_report()
        .attach_printable(format!(
            "Could not create log file {}.",
            config.log_file.display()
        ))
        .change_context(InitError::Logging)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .into_report()
        .attach_printable("Could not install logger.")
        .change_context(InitError::Logging)?;
    Ok(())
}

fn start_window(config: &Config) -> Result<Window, InitError> {
    let terminal: Terminal = Terminal::init()
        .attach_printable("Could not initialize terminal.")
        .change_context(InitError::NoTerminal)?;

    Ok(Window::new(terminal, config, spawn_input_thread()))
}

fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (input_sink, input_receiver) = mpsc::channel::<Event>();
    thread::spawn(move || {
        if let Err(report) = Terminal::listen(input_sink) {
            log::error!("Input thread stopped: {report:?}");
        }
    });
    input_receiver
}
