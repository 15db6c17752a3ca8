//! Sprite model construction
//!
//! Runs schema validation, pixel decoding, index resolution and timing
//! resolution, and assembles the immutable [`SpriteModel`]. Construction is
//! all-or-nothing: the first error aborts the build.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::color::ColorTable;
use crate::document::Document;
use crate::error::Result;
use crate::frames::resolve_indices;
use crate::models::{AnimatedSprite, Animation, Frame, SpriteModel, StaticSprite};
use crate::pixels::decode_pixels;
use crate::timing::{check_interval, effective_duration, normalize_override, DEFAULT_FRAME_INTERVAL};
use crate::validate::{validate_document, ValidatedAnimation, ValidatedSprite};

/// Options that affect how a document is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Duration for frames with no override and no animation default.
    pub default_frame_interval: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { default_frame_interval: DEFAULT_FRAME_INTERVAL }
    }
}

/// Build a sprite model with default options.
pub fn build(document: &Document) -> Result<SpriteModel> {
    build_with(document, &BuildOptions::default())
}

/// Build a sprite model.
///
/// # Errors
///
/// Any schema, grid, index or timing error found in the document.
pub fn build_with(document: &Document, options: &BuildOptions) -> Result<SpriteModel> {
    let global = check_interval("default frame_interval", options.default_frame_interval)?;
    let model = match validate_document(document)? {
        ValidatedSprite::Static(s) => {
            let grid = decode_pixels(&s.pixels, &s.colors, &format!("sprite '{}'", s.name))?;
            debug!("Built static sprite '{}' ({}x{})", s.name, grid.width(), grid.height());
            SpriteModel::Static(StaticSprite { name: s.name, grid, colors: s.colors })
        }
        ValidatedSprite::Animated(a) => {
            let mut animations = IndexMap::with_capacity(a.animations.len());
            for validated in a.animations {
                let animation = build_animation(validated, &a.colors, global)?;
                animations.insert(animation.namespace.clone(), animation);
            }
            debug!("Built animated sprite '{}' with {} animation(s)", a.name, animations.len());
            SpriteModel::Animated(AnimatedSprite { name: a.name, animations, colors: a.colors })
        }
    };

    for ch in unused_colors(&model) {
        warn!("Color '{}' in sprite '{}' is never used", ch, model.name());
    }
    Ok(model)
}

fn build_animation(
    validated: ValidatedAnimation,
    colors: &ColorTable,
    global: f64,
) -> Result<Animation> {
    let namespace = validated.namespace;
    let declared: Vec<Option<u32>> = validated.frames.iter().map(|f| f.frame_index).collect();
    let indices = resolve_indices(&namespace, &declared)?;
    let default_duration = effective_duration(None, validated.frame_interval, global);

    let mut frames = Vec::with_capacity(validated.frames.len());
    for (frame, index) in validated.frames.into_iter().zip(&indices) {
        let context = format!("frame {} of '{}'", index, namespace);
        let grid = decode_pixels(&frame.pixels, colors, &context)?;
        let duration = effective_duration(frame.frame_interval, validated.frame_interval, global);
        debug!("  {}: {}x{}, {}s", context, grid.width(), grid.height(), duration);
        frames.push(Frame {
            namespace: namespace.clone(),
            index: *index,
            grid: Some(grid),
            duration_override: normalize_override(frame.frame_interval, default_duration),
            duration,
            interpolated: false,
        });
    }
    frames.sort_by_key(|f| f.index);

    Ok(Animation {
        namespace,
        frame_interval: validated.frame_interval,
        r#loop: validated.r#loop,
        default_duration,
        frames,
    })
}

/// Characters in the color table that no grid uses.
pub fn unused_colors(model: &SpriteModel) -> Vec<char> {
    let mut used = std::collections::BTreeSet::new();
    match model {
        SpriteModel::Static(s) => used.extend(s.grid.characters()),
        SpriteModel::Animated(a) => {
            for frame in a.animations.values().flat_map(|anim| anim.frames.iter()) {
                if let Some(grid) = &frame.grid {
                    used.extend(grid.characters());
                }
            }
        }
    }
    model.colors().iter().map(|(ch, _)| ch).filter(|ch| !used.contains(ch)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpriteError;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test documents must be objects"),
        }
    }

    fn walker() -> Document {
        doc(json!({
            "sprite": {"name": "walker"},
            "animation": [
                {"namespace": "walk", "frame_interval": 0.2, "frame": [
                    {"frame_index": 0, "pixels": "#."},
                    {"pixels": ".#"},
                    {"frame_index": 5, "pixels": "##", "frame_interval": 0.4},
                    {"pixels": "..", "frame_interval": 0.2}
                ]},
                {"namespace": "idle", "loop": false, "frame": [{"pixels": "#."}]}
            ],
            "colors": {"#": "#000000", ".": {"red": 255, "green": 255, "blue": 255, "alpha": 0}}
        }))
    }

    #[test]
    fn test_build_static() {
        let d = doc(json!({
            "sprite": {"name": "dot", "pixels": "#@@\n@A@\n#@@"},
            "colors": {
                "#": {"red": 0, "green": 0, "blue": 0},
                "@": {"red": 255, "green": 0, "blue": 0},
                "A": {"red": 255, "green": 255, "blue": 255}
            }
        }));
        let model = build(&d).unwrap();
        let s = model.as_static().unwrap();
        assert_eq!(s.name(), "dot");
        assert_eq!(s.grid().color_at(1, 1), Some(image::Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_build_animated_orders_and_times_frames() {
        let model = build(&walker()).unwrap();
        let a = model.as_animated().unwrap();
        let names: Vec<&str> = a.animations().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["walk", "idle"]);

        let walk = a.animation("walk").unwrap();
        let indices: Vec<u32> = walk.frames().iter().map(|f| f.index()).collect();
        assert_eq!(indices, vec![0, 1, 5, 6]);
        assert_eq!(walk.frame_by_index(5).unwrap().duration(), 0.4);
        assert_eq!(walk.frame_by_index(5).unwrap().duration_override(), Some(0.4));
        // override equal to the animation default is normalized away
        assert_eq!(walk.frame_by_index(6).unwrap().duration_override(), None);
        assert_eq!(walk.frame_by_index(6).unwrap().duration(), 0.2);
        assert!(walk.frames().iter().all(|f| !f.is_interpolated()));
        assert!(walk.frames().iter().all(|f| f.namespace() == "walk"));

        let idle = a.animation("idle").unwrap();
        assert!(!idle.loops());
        assert_eq!(idle.frames()[0].duration(), DEFAULT_FRAME_INTERVAL);
    }

    #[test]
    fn test_configured_global_default() {
        let options = BuildOptions { default_frame_interval: 0.125 };
        let model = build_with(&walker(), &options).unwrap();
        let idle = model.as_animated().unwrap().animation("idle").unwrap();
        assert_eq!(idle.default_duration(), 0.125);
        assert_eq!(idle.frames()[0].duration(), 0.125);

        let bad = BuildOptions { default_frame_interval: 0.0 };
        assert!(matches!(build_with(&walker(), &bad), Err(SpriteError::InvalidFrameInterval { .. })));
    }

    #[test]
    fn test_frame_errors_abort_build() {
        let mut d = walker();
        d["animation"][1]["frame"][0]["pixels"] = json!("#?");
        match build(&d).unwrap_err() {
            SpriteError::MissingColorDefinition { character, x, y, context } => {
                assert_eq!((character, x, y), ('?', 1, 0));
                assert!(context.contains("idle"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_index_aborts_build() {
        let mut d = walker();
        d["animation"][0]["frame"][1]["frame_index"] = json!(5);
        assert!(matches!(
            build(&d),
            Err(SpriteError::DuplicateFrameIndex { index: 5, .. })
        ));
    }

    #[test]
    fn test_unused_colors() {
        let d = doc(json!({
            "sprite": {"name": "dot", "pixels": "#"},
            "colors": {"#": "black", "x": "red"}
        }));
        let model = build(&d).unwrap();
        assert_eq!(unused_colors(&model), vec!['x']);
        assert!(unused_colors(&build(&walker()).unwrap()).is_empty());
    }
}
