use crate::color::Color;
use crate::error::ExportError;
use error_stack::{IntoReport, Report, Result, ResultExt};
use image::{ImageFormat, RgbaImage};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;

/// A `width × height` row-major grid of opaque colors (`Some`) or transparency (`None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Option<Color>>,
}

impl PixelGrid {
    pub fn new(width: usize, height: usize, pixels: Vec<Option<Color>>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[cfg(test)]
    pub fn pixels(&self) -> &[Option<Color>] {
        &self.pixels
    }

    #[cfg(test)]
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y * self.width + x]
    }

    /// One image pixel per cell. Untouched pixels stay fully transparent.
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width as u32, self.height as u32);
        for (index, pixel) in self.pixels.iter().enumerate() {
            if let Some(color) = pixel {
                let x = (index % self.width) as u32;
                let y = (index / self.width) as u32;
                image.put_pixel(x, y, (*color).into());
            }
        }
        image
    }
}

/// Result of a background export, sent back to the event loop.
pub type ExportOutcome = std::result::Result<PathBuf, Report<ExportError>>;

pub fn save(grid: &PixelGrid, path: &Path) -> Result<(), ExportError> {
    if grid.width() == 0 || grid.height() == 0 {
        return Err(Report::new(ExportError::EmptyCanvas)
            .attach_printable(format!("Canvas is {}x{}.", grid.width(), grid.height())));
    }

    grid.to_image()
        .save_with_format(path, ImageFormat::Png)
        .into_report()
        .attach_printable(format!("Could not write PNG to {}.", path.display()))
        .change_context(ExportError::Write)?;
    Ok(())
}

/// Writes the snapshot on a separate thread. The interactive loop never waits on it;
/// the outcome arrives on `sink` whenever the write finishes.
pub fn spawn(grid: PixelGrid, path: PathBuf, sink: Sender<ExportOutcome>) {
    info!("Exporting {}x{} canvas to {}", grid.width(), grid.height(), path.display());
    thread::spawn(move || {
        let outcome = save(&grid, &path).map(|()| path);
        if let Err(report) = &outcome {
            error!("Export failed: {report:?}");
        }
        // The window may already be gone when we finish.
        _ = sink.send(outcome);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    fn temp_png(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vango-{}-{name}.png", std::process::id()))
    }

    fn single_pixel_grid() -> PixelGrid {
        let mut pixels = vec![None; 9];
        pixels[4] = Some(Color::new(0x11, 0x22, 0x33));
        PixelGrid::new(3, 3, pixels)
    }

    #[test]
    fn image_is_opaque_only_where_painted() {
        let image = single_pixel_grid().to_image();
        assert_eq!(image.dimensions(), (3, 3));
        for (x, y, pixel) in image.enumerate_pixels() {
            if (x, y) == (1, 1) {
                assert_eq!(pixel.0, [0x11, 0x22, 0x33, 0xFF]);
            } else {
                assert_eq!(pixel.0[3], 0, "pixel ({x}, {y}) should be transparent");
            }
        }
    }

    #[test]
    fn saved_png_decodes_to_the_same_pixels() {
        let path = temp_png("save");
        save(&single_pixel_grid(), &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded, single_pixel_grid().to_image());
        _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unwritable_path_is_reported() {
        let path = std::env::temp_dir()
            .join("vango-missing-directory")
            .join("nested")
            .join("out.png");
        let report = save(&single_pixel_grid(), &path).unwrap_err();
        assert!(matches!(report.current_context(), ExportError::Write));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let report = save(&PixelGrid::new(0, 0, Vec::new()), &temp_png("empty")).unwrap_err();
        assert!(matches!(report.current_context(), ExportError::EmptyCanvas));
    }

    #[test]
    fn background_export_reports_back() {
        let path = temp_png("spawn");
        let (sink, receiver) = mpsc::channel();
        spawn(single_pixel_grid(), path.clone(), sink);

        let outcome = receiver.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(outcome.unwrap(), path);
        assert!(path.exists());
        _ = std::fs::remove_file(&path);
    }
}
