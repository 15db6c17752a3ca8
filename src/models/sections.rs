//! Typed document sections.
//!
//! These mirror the raw document layout one-to-one and are only used by the
//! schema validator; everything downstream works on validated types.

use serde::{Deserialize, Serialize};

/// Pixel text: a multi-line block, or one string per row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PixelText {
    Block(String),
    Rows(Vec<String>),
}

impl PixelText {
    /// The pixels as a single newline-separated block.
    pub fn to_block(&self) -> String {
        match self {
            PixelText::Block(s) => s.clone(),
            PixelText::Rows(rows) => rows.join("\n"),
        }
    }

    /// Whether any non-whitespace pixel text is present.
    pub fn is_blank(&self) -> bool {
        match self {
            PixelText::Block(s) => s.trim().is_empty(),
            PixelText::Rows(rows) => rows.iter().all(|r| r.trim().is_empty()),
        }
    }
}

/// The `[sprite]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SpriteSection {
    #[serde(default)]
    pub name: String,
    /// Static pixels (forbidden when animations are present)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pixels: Option<PixelText>,
}

/// An `[[animation]]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnimationSection {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub namespace: Option<String>,
    /// Default seconds per frame
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub frame_interval: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub r#loop: Option<bool>,
    /// Frames nested under this animation
    #[serde(default)]
    pub frame: Vec<FrameSection>,
}

/// A frame section, nested (`[[animation.frame]]`) or top-level (`[[frame]]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FrameSection {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub frame_index: Option<u32>,
    pub pixels: PixelText,
    /// Per-frame duration override in seconds
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub frame_interval: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pixel_text_forms() {
        let block: PixelText = serde_json::from_value(json!("ab\ncd")).unwrap();
        let rows: PixelText = serde_json::from_value(json!(["ab", "cd"])).unwrap();
        assert_eq!(block.to_block(), rows.to_block());
        assert!(PixelText::Block("  \n ".to_string()).is_blank());
    }

    #[test]
    fn test_frame_section_rejects_unknown_keys() {
        let result: Result<FrameSection, _> =
            serde_json::from_value(json!({"pixels": "a", "duration": 3}));
        assert!(result.is_err());
    }

    #[test]
    fn test_frame_index_must_be_non_negative() {
        let result: Result<FrameSection, _> =
            serde_json::from_value(json!({"pixels": "a", "frame_index": -1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_animation_section_with_nested_frames() {
        let section: AnimationSection = serde_json::from_value(json!({
            "namespace": "idle",
            "loop": false,
            "frame": [{"pixels": "a"}, {"pixels": "b", "frame_index": 4}]
        }))
        .unwrap();
        assert_eq!(section.namespace.as_deref(), Some("idle"));
        assert_eq!(section.r#loop, Some(false));
        assert_eq!(section.frame.len(), 2);
        assert_eq!(section.frame[1].frame_index, Some(4));
    }
}
