//! Gap filling between key frames
//!
//! Key frames may leave holes in the index sequence (`0, 1, 5, 6`).
//! [`Animation::fill_gaps`] inserts an interpolated frame for every missing
//! index between the first and last key frame, asking a
//! [`FrameInterpolator`] for its content.

use log::debug;

use crate::models::{AnimatedSprite, Animation, Frame, PixelGrid};

/// Produces pixel content for a frame between two key frames.
pub trait FrameInterpolator {
    /// Content for `index`, which lies strictly between `previous` and
    /// `next`. `None` leaves the frame without content.
    fn interpolate(&self, previous: &Frame, next: &Frame, index: u32) -> Option<PixelGrid>;
}

/// Leaves gap frames without content.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl FrameInterpolator for NoContent {
    fn interpolate(&self, _previous: &Frame, _next: &Frame, _index: u32) -> Option<PixelGrid> {
        None
    }
}

/// Repeats the preceding key frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldPrevious;

impl FrameInterpolator for HoldPrevious {
    fn interpolate(&self, previous: &Frame, _next: &Frame, _index: u32) -> Option<PixelGrid> {
        previous.grid().cloned()
    }
}

impl Animation {
    /// A copy of this animation with every index gap filled.
    ///
    /// Gap frames are marked interpolated and use the animation's default
    /// duration. An animation without gaps comes back unchanged.
    pub fn fill_gaps(&self, interpolator: &dyn FrameInterpolator) -> Animation {
        let mut frames = Vec::with_capacity(self.frames.len());
        for pair in self.frames.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            frames.push(previous.clone());
            for index in previous.index + 1..next.index {
                frames.push(Frame {
                    namespace: self.namespace.clone(),
                    index,
                    grid: interpolator.interpolate(previous, next, index),
                    duration_override: None,
                    duration: self.default_duration,
                    interpolated: true,
                });
            }
        }
        if let Some(last) = self.frames.last() {
            frames.push(last.clone());
        }

        debug!(
            "Filled '{}': {} key frame(s), {} total",
            self.namespace,
            self.frames.len(),
            frames.len()
        );
        Animation { frames, ..self.clone() }
    }
}

impl AnimatedSprite {
    /// A copy of this sprite with the gaps of every animation filled.
    pub fn fill_gaps(&self, interpolator: &dyn FrameInterpolator) -> AnimatedSprite {
        let animations = self
            .animations
            .iter()
            .map(|(ns, animation)| (ns.clone(), animation.fill_gaps(interpolator)))
            .collect();
        AnimatedSprite { animations, ..self.clone() }
    }
}
