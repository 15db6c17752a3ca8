//! Sprite model serialization (deflate)
//!
//! Writes a [`SpriteModel`] back into the generic document shape. Building
//! the result again yields an identical model: frame indices are always
//! written out, while animation defaults and frame overrides only appear
//! when they were declared.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::color::{ColorTable, OPAQUE};
use crate::document::{Document, ANIMATION_SECTION, COLORS_SECTION, SPRITE_SECTION};
use crate::error::{Result, SpriteError};
use crate::models::{
    AnimatedSprite, Animation, AnimationSection, FrameSection, PixelText, SpriteModel,
    SpriteSection,
};

fn to_value<T: Serialize>(section: &str, value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| SpriteError::Encode { format: section.to_string(), message: e.to_string() })
}

/// Convert a sprite model into a document.
///
/// Interpolated frames are derived data and are left out.
pub fn serialize(model: &SpriteModel) -> Result<Document> {
    let mut document = Document::new();

    let sprite = SpriteSection {
        name: model.name().to_string(),
        pixels: model.as_static().map(|s| PixelText::Block(s.grid().to_text())),
    };
    document.insert(SPRITE_SECTION.to_string(), to_value(SPRITE_SECTION, &sprite)?);

    if let Some(animated) = model.as_animated() {
        document.insert(ANIMATION_SECTION.to_string(), animation_sections(animated)?);
    }

    document.insert(COLORS_SECTION.to_string(), color_table(model.colors()));
    Ok(document)
}

fn animation_sections(sprite: &AnimatedSprite) -> Result<Value> {
    let sections = sprite
        .animations()
        .values()
        .map(|animation| to_value(ANIMATION_SECTION, &animation_section(animation)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(sections))
}

fn animation_section(animation: &Animation) -> AnimationSection {
    let frame = animation
        .frames()
        .iter()
        .filter(|f| !f.is_interpolated())
        .filter_map(|f| {
            f.grid().map(|grid| FrameSection {
                namespace: Some(f.namespace().to_string()),
                frame_index: Some(f.index()),
                pixels: PixelText::Block(grid.to_text()),
                frame_interval: f.duration_override(),
            })
        })
        .collect();

    AnimationSection {
        namespace: Some(animation.namespace().to_string()),
        frame_interval: animation.frame_interval(),
        r#loop: animation.declared_loop(),
        frame,
    }
}

fn color_table(colors: &ColorTable) -> Value {
    let mut table = Map::new();
    for (ch, color) in colors.iter() {
        let [red, green, blue, alpha] = color.0;
        let mut entry = Map::new();
        entry.insert("red".to_string(), Value::from(red));
        entry.insert("green".to_string(), Value::from(green));
        entry.insert("blue".to_string(), Value::from(blue));
        if alpha != OPAQUE {
            entry.insert("alpha".to_string(), Value::from(alpha));
        }
        table.insert(ch.to_string(), Value::Object(entry));
    }
    Value::Object(table)
}
