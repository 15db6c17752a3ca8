//! PNG output and file path generation

use image::imageops::FilterType;
use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::PixelGrid;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Nothing to write
    #[error("nothing to render: {0}")]
    Empty(String),
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    create_parent_dirs(path)?;
    image.save(path)?;
    Ok(())
}

pub(crate) fn create_parent_dirs(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// Factors of 0 and 1 return the image unchanged.
pub fn scale_image(image: RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor, h * factor, FilterType::Nearest)
}

/// Render a grid to an image at the given scale.
pub fn render_grid(grid: &PixelGrid, scale: u32) -> RgbaImage {
    scale_image(grid.to_image(), scale)
}

/// Path for a rendered file.
///
/// With `-o dir/` the file is `dir/{label}.{ext}`; with `-o file` it is
/// `file` itself; otherwise `{input_stem}_{label}.{ext}` next to the input.
pub fn output_path(input: &Path, label: &str, ext: &str, output_arg: Option<&Path>) -> PathBuf {
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(format!("{}.{}", label, ext))
            } else {
                output.to_path_buf()
            }
        }
        None => {
            let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("sprite");
            let file_name = format!("{}_{}.{}", input_stem, label, ext);
            match input.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
                _ => PathBuf::from(file_name),
            }
        }
    }
}
