//! Pixel block decoding
//!
//! Turns a block of pixel text into a [`PixelGrid`]: rows are split on line
//! breaks, each row is trimmed, and blank lines before the first and after
//! the last row are dropped. Every character must have a color.

use crate::color::ColorTable;
use crate::error::{Result, SpriteError};
use crate::models::PixelGrid;

/// Split a pixel block into rows, trimming surrounding blank lines.
pub fn pixel_rows(text: &str) -> Vec<&str> {
    let rows: Vec<&str> = text.lines().map(str::trim).collect();
    let start = rows.iter().position(|r| !r.is_empty()).unwrap_or(rows.len());
    let end = rows.iter().rposition(|r| !r.is_empty()).map_or(start, |i| i + 1);
    rows[start..end].to_vec()
}

/// Decode a pixel block against a color table.
///
/// `context` names the sprite or frame in error messages.
///
/// # Errors
///
/// - [`SpriteError::EmptyGrid`] when the block has no rows
/// - [`SpriteError::NonRectangularGrid`] for the first row whose length
///   differs from the first row's
/// - [`SpriteError::MissingColorDefinition`] for the first character, in
///   row-major order, with no color
pub fn decode_pixels(text: &str, colors: &ColorTable, context: &str) -> Result<PixelGrid> {
    let rows = pixel_rows(text);
    if rows.is_empty() {
        return Err(SpriteError::EmptyGrid { context: context.to_string() });
    }

    let width = rows[0].chars().count();
    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(SpriteError::NonRectangularGrid {
                context: context.to_string(),
                row,
                expected: width,
                found,
            });
        }
    }

    let height = rows.len();
    let mut cells = Vec::with_capacity(width * height);
    let mut resolved = Vec::with_capacity(width * height);
    for (y, line) in rows.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            let color = colors.get(ch).ok_or_else(|| SpriteError::MissingColorDefinition {
                character: ch,
                x,
                y,
                context: context.to_string(),
            })?;
            cells.push(ch);
            resolved.push(color);
        }
    }

    Ok(PixelGrid::from_parts(width, height, cells, resolved))
}
