use crate::error::InitError;
use crate::palette::Palette;
use crate::sections::{CANVAS_ORIGIN, CELL_WIDTH, MENU_GAP, MENU_WIDTH};
use error_stack::{IntoReport, Report, Result, ResultExt};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: vango [--width CELLS] [--height CELLS] [--palette #RRGGBB,...] [--log PATH]

  --width CELLS      canvas width in cells (default: terminal columns / 4)
  --height CELLS     canvas height in cells (default: terminal rows / 2)
  --palette COLORS   comma separated #RRGGBB colors to paint with
  --log PATH         file to write logs to (default: debug.log)
  --help             show this message";

const FALLBACK_SIZE: (usize, usize) = (16, 16);

/// Widest canvas whose row, menu included, still fits in `u16` screen columns.
pub const MAX_WIDTH: usize =
    ((u16::MAX - CANVAS_ORIGIN.x - MENU_GAP - MENU_WIDTH) / CELL_WIDTH) as usize;
/// Tallest canvas that leaves the status and help rows addressable.
pub const MAX_HEIGHT: usize = (u16::MAX - CANVAS_ORIGIN.y - 2) as usize;

/// Startup settings. Built once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub palette: Palette,
    pub log_file: PathBuf,
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            palette: Palette::default(),
            log_file: PathBuf::from("debug.log"),
            show_help: false,
        }
    }
}

impl Config {
    /// Parses command line arguments, excluding the program name.
    pub fn from_args<I>(args: I) -> Result<Self, InitError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--help" | "-h" => config.show_help = true,
                "--width" => {
                    let value = value_for(&flag, &mut args)?;
                    config.width = Some(parse_cells(&flag, value, MAX_WIDTH)?);
                }
                "--height" => {
                    let value = value_for(&flag, &mut args)?;
                    config.height = Some(parse_cells(&flag, value, MAX_HEIGHT)?);
                }
                "--palette" => config.palette = parse_palette(value_for(&flag, &mut args)?)?,
                "--log" => config.log_file = PathBuf::from(value_for(&flag, &mut args)?),
                _ => {
                    return Err(Report::new(InitError::InvalidArguments)
                        .attach_printable(format!("Unknown argument {flag:?}."))
                        .attach_printable(USAGE))
                }
            }
        }

        Ok(config)
    }

    /// Canvas dimensions in cells. Explicit flags win; otherwise the canvas takes a
    /// share of the terminal, or a fixed size when the terminal size is unknown.
    pub fn canvas_size(&self, terminal: Option<(u16, u16)>) -> (usize, usize) {
        let (default_width, default_height) = match terminal {
            Some((columns, rows)) => (
                (usize::from(columns) / 4).max(1),
                (usize::from(rows) / 2).max(1),
            ),
            None => FALLBACK_SIZE,
        };
        (
            self.width.unwrap_or(default_width),
            self.height.unwrap_or(default_height),
        )
    }
}

fn value_for(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String, InitError> {
    args.next()
        .ok_or(InitError::InvalidArguments)
        .into_report()
        .attach_printable(format!("{flag} expects a value."))
}

fn parse_cells(flag: &str, value: String, max: usize) -> Result<usize, InitError> {
    let cells: usize = value
        .parse()
        .into_report()
        .attach_printable(format!("{flag} expects a whole number, got {value:?}."))
        .change_context(InitError::InvalidArguments)?;
    if cells == 0 {
        return Err(Report::new(InitError::InvalidArguments)
            .attach_printable(format!("{flag} must be at least 1.")));
    }
    if cells > max {
        return Err(Report::new(InitError::InvalidArguments)
            .attach_printable(format!("{flag} must be at most {max}, got {cells}.")));
    }
    Ok(cells)
}

fn parse_palette(value: String) -> Result<Palette, InitError> {
    let colors = Palette::parse(value.split(','))
        .into_report()
        .attach_printable(format!("Could not parse palette {value:?}."))
        .change_context(InitError::InvalidPalette)?;
    Palette::new(colors)
        .ok_or(InitError::InvalidPalette)
        .into_report()
        .attach_printable("A palette needs at least one color.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn parse(args: &[&str]) -> Result<Config, InitError> {
        Config::from_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn defaults_without_arguments() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.width, None);
        assert_eq!(config.palette, Palette::default());
        assert_eq!(config.log_file, PathBuf::from("debug.log"));
        assert!(!config.show_help);
    }

    #[test]
    fn reads_every_flag() {
        let config = parse(&[
            "--width",
            "20",
            "--height",
            "10",
            "--palette",
            "#ff0000, #00ff00",
            "--log",
            "/tmp/x.log",
        ])
        .unwrap();
        assert_eq!(config.width, Some(20));
        assert_eq!(config.height, Some(10));
        assert_eq!(
            config.palette.colors(),
            &[Color::new(0xff, 0, 0), Color::new(0, 0xff, 0)]
        );
        assert_eq!(config.log_file, PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn rejects_bad_input() {
        for args in [
            &["--width"][..],
            &["--width", "abc"],
            &["--height", "0"],
            &["--bogus"],
        ] {
            let report = parse(args).unwrap_err();
            assert!(matches!(report.current_context(), InitError::InvalidArguments), "{args:?}");
        }
    }

    #[test]
    fn size_flags_are_capped_to_the_screen() {
        let width = MAX_WIDTH.to_string();
        let height = MAX_HEIGHT.to_string();
        let config = parse(&["--width", &width, "--height", &height]).unwrap();
        assert_eq!(config.width, Some(MAX_WIDTH));
        assert_eq!(config.height, Some(MAX_HEIGHT));

        for args in [
            ["--width", "40000"],
            ["--height", "65534"],
            ["--width", "18446744073709551615"],
        ] {
            let report = parse(&args).unwrap_err();
            assert!(matches!(report.current_context(), InitError::InvalidArguments), "{args:?}");
        }
        let too_wide = (MAX_WIDTH + 1).to_string();
        assert!(parse(&["--width", &too_wide]).is_err());
        let too_tall = (MAX_HEIGHT + 1).to_string();
        assert!(parse(&["--height", &too_tall]).is_err());
    }

    #[test]
    fn rejects_malformed_palette() {
        for palette in ["#ff0000,blue", "", "#ff00zz"] {
            let report = parse(&["--palette", palette]).unwrap_err();
            assert!(matches!(report.current_context(), InitError::InvalidPalette));
        }
    }

    #[test]
    fn canvas_size_follows_terminal() {
        let config = Config::default();
        assert_eq!(config.canvas_size(Some((80, 24))), (20, 12));
        assert_eq!(config.canvas_size(Some((2, 1))), (1, 1));
        assert_eq!(config.canvas_size(None), (16, 16));

        let config = parse(&["--width", "5"]).unwrap();
        assert_eq!(config.canvas_size(Some((80, 24))), (5, 12));
    }
}
