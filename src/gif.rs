//! GIF animation rendering

use crate::models::Animation;
use crate::output::{create_parent_dirs, scale_image, OutputError};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// GIF delay for a duration in seconds, in whole centiseconds (at least 1).
pub fn delay_centiseconds(seconds: f64) -> u32 {
    (seconds * 100.0).round().clamp(1.0, f64::from(u16::MAX)) as u32
}

/// Write frames with individual durations (seconds) as an animated GIF.
pub fn render_gif(frames: &[(RgbaImage, f64)], loop_anim: bool, path: &Path) -> Result<(), OutputError> {
    if frames.is_empty() {
        return Err(OutputError::Empty(path.display().to_string()));
    }
    create_parent_dirs(path)?;

    let file = File::create(path)?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    let repeat = if loop_anim { Repeat::Infinite } else { Repeat::Finite(0) };
    encoder.set_repeat(repeat)?;

    for (image, seconds) in frames {
        let delay = Delay::from_numer_denom_ms(delay_centiseconds(*seconds) * 10, 1);
        encoder.encode_frame(Frame::from_parts(image.clone(), 0, 0, delay))?;
    }
    Ok(())
}

/// Render every frame of an animation, in playback order, as a GIF.
///
/// Frames without content are skipped.
pub fn render_animation_gif(animation: &Animation, scale: u32, path: &Path) -> Result<(), OutputError> {
    let frames: Vec<(RgbaImage, f64)> = animation
        .frames()
        .iter()
        .filter_map(|f| f.grid().map(|g| (scale_image(g.to_image(), scale), f.duration())))
        .collect();
    render_gif(&frames, animation.loops(), path)
}
