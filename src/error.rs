use error_stack::Context;
use std::fmt::Display;

#[derive(Debug)]
pub enum InitError {
    InvalidArguments,
    InvalidPalette,
    Logging,
    NoTerminal,
}
impl Context for InitError {}
impl Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("App could not start.")
    }
}

#[derive(Debug)]
pub enum AppError {
    InitError,
    TerminalError,
    UserInput,
    ChannelBroken,
}
impl Context for AppError {}
impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Something went wrong.")
    }
}

#[derive(Debug)]
pub enum ExportError {
    EmptyCanvas,
    Write,
}
impl Context for ExportError {}
impl Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCanvas => f.write_str("Nothing to export."),
            Self::Write => f.write_str("Could not save image."),
        }
    }
}
