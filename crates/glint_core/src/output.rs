//! Image output.
//!
//! Writes rendered images as plain-text PPM (`P3`) or PNG. Both formats use
//! the renderer's 8-bit encoding, so they carry identical pixel values.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glint_renderer::ImageBuffer;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format '{0}' (expected .ppm or .png)")]
    UnsupportedFormat(String),
}

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Write an image as plain-text PPM.
///
/// Header `P3`, `<width> <height>`, `255`, then one `r g b` line per pixel,
/// top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> OutputResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in image.rgb8_pixels() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save an image as a PPM file.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)
}

/// Save an image as a PNG file.
pub fn save_png(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let buffer = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "pixel buffer does not match image dimensions",
            )
        })?;
    buffer.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Save an image, choosing the format from the file extension.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => save_ppm(image, path)?,
        "png" => save_png(image, path)?,
        _ => return Err(OutputError::UnsupportedFormat(extension)),
    }

    log::info!("Saved to {}", path.display());
    Ok(())
}
