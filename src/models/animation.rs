//! Animation and frame types.

use super::grid::PixelGrid;

/// One frame of an animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub(crate) namespace: String,
    pub(crate) index: u32,
    pub(crate) grid: Option<PixelGrid>,
    pub(crate) duration_override: Option<f64>,
    pub(crate) duration: f64,
    pub(crate) interpolated: bool,
}

impl Frame {
    /// Namespace of the owning animation.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Resolved frame index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Pixel content. Always present for frames read from a document;
    /// gap-filled frames may have none.
    pub fn grid(&self) -> Option<&PixelGrid> {
        self.grid.as_ref()
    }

    /// The per-frame `frame_interval`, when it differs from the animation's.
    pub fn duration_override(&self) -> Option<f64> {
        self.duration_override
    }

    /// Effective display time in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// True for frames synthesized to fill an index gap.
    pub fn is_interpolated(&self) -> bool {
        self.interpolated
    }
}

/// A named sequence of frames, sorted by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub(crate) namespace: String,
    pub(crate) frame_interval: Option<f64>,
    pub(crate) r#loop: Option<bool>,
    pub(crate) default_duration: f64,
    pub(crate) frames: Vec<Frame>,
}

impl Animation {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The `frame_interval` declared in the document, if any.
    pub fn frame_interval(&self) -> Option<f64> {
        self.frame_interval
    }

    /// The `loop` flag declared in the document, if any.
    pub fn declared_loop(&self) -> Option<bool> {
        self.r#loop
    }

    /// Returns whether the animation should loop (default: true).
    pub fn loops(&self) -> bool {
        self.r#loop.unwrap_or(true)
    }

    /// Effective default duration for frames without an override.
    pub fn default_duration(&self) -> f64 {
        self.default_duration
    }

    /// Frames in playback order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame at a playback position.
    pub fn frame(&self, position: usize) -> Option<&Frame> {
        self.frames.get(position)
    }

    /// Frame with a given resolved index.
    pub fn frame_by_index(&self, index: u32) -> Option<&Frame> {
        self.frames.binary_search_by_key(&index, |f| f.index).ok().map(|i| &self.frames[i])
    }

    /// Sum of the effective durations of all frames.
    pub fn total_duration(&self) -> f64 {
        self.frames.iter().map(|f| f.duration).sum()
    }
}
