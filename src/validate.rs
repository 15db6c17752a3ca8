//! Schema validation for sprite documents
//!
//! Checks a generic [`Document`] against the sprite schema and produces a
//! typed [`ValidatedSprite`]. Checks run in a fixed order:
//!
//! 1. a `[sprite]` section with a non-empty `name`
//! 2. exactly one of static `pixels` or animation/frame sections, decided
//!    before any of those sections is type-checked
//! 3. no unknown top-level sections
//! 4. for animated sprites, every animation declares a unique namespace and
//!    every frame names a declared one
//! 5. a well-formed `[colors]` table
//!
//! Nothing downstream of this module looks at the raw document again.

use indexmap::IndexMap;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::color::{parse_color_entry, ColorTable};
use crate::document::{
    section_list, Document, ANIMATION_SECTION, COLORS_SECTION, FRAME_SECTION, KNOWN_SECTIONS,
    SPRITE_SECTION,
};
use crate::error::{Result, SpriteError};
use crate::models::{AnimationSection, FrameSection, SpriteSection};
use crate::timing::check_interval;

/// A document that passed schema validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedSprite {
    Static(ValidatedStatic),
    Animated(ValidatedAnimated),
}

impl ValidatedSprite {
    pub fn name(&self) -> &str {
        match self {
            ValidatedSprite::Static(s) => &s.name,
            ValidatedSprite::Animated(a) => &a.name,
        }
    }
}

/// A static sprite before pixel decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedStatic {
    pub name: String,
    pub pixels: String,
    pub colors: ColorTable,
}

/// An animated sprite before frame resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAnimated {
    pub name: String,
    /// Animations in declaration order
    pub animations: Vec<ValidatedAnimation>,
    pub colors: ColorTable,
}

/// One animation with its frames in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAnimation {
    pub namespace: String,
    pub frame_interval: Option<f64>,
    pub r#loop: Option<bool>,
    pub frames: Vec<ValidatedFrame>,
}

/// One frame as declared in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFrame {
    pub frame_index: Option<u32>,
    pub pixels: String,
    pub frame_interval: Option<f64>,
}

fn typed<T: DeserializeOwned>(section: impl Into<String>, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| SpriteError::InvalidField { section: section.into(), message: e.to_string() })
}

fn typed_list<T: DeserializeOwned>(document: &Document, key: &str) -> Result<Vec<T>> {
    let Some(value) = document.get(key) else {
        return Ok(Vec::new());
    };
    let sections = section_list(value).ok_or_else(|| SpriteError::InvalidField {
        section: key.to_string(),
        message: "expected a table or an array of tables".to_string(),
    })?;
    sections
        .into_iter()
        .enumerate()
        .map(|(i, v)| typed(format!("{} #{}", key, i + 1), v))
        .collect()
}

/// Whether `key` is present and not an empty list.
fn declares_sections(document: &Document, key: &str) -> bool {
    match document.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Validate a document against the sprite schema.
pub fn validate_document(document: &Document) -> Result<ValidatedSprite> {
    // 1. sprite section and name
    let sprite_value = document
        .get(SPRITE_SECTION)
        .ok_or_else(|| SpriteError::malformed("document has no [sprite] section"))?;
    let sprite: SpriteSection = typed(SPRITE_SECTION, sprite_value)?;
    if sprite.name.trim().is_empty() {
        return Err(SpriteError::malformed("[sprite] name must be a non-empty string"));
    }

    // 2. static xor animated, decided on the raw sections so a malformed
    // frame next to static pixels still reports the conflict
    let has_static_pixels = sprite.pixels.as_ref().is_some_and(|p| !p.is_blank());
    let has_animation_frames =
        declares_sections(document, ANIMATION_SECTION) || declares_sections(document, FRAME_SECTION);

    match (has_static_pixels, has_animation_frames) {
        (true, true) => {
            return Err(SpriteError::malformed(format!(
                "sprite '{}' declares both static pixels and animation frames",
                sprite.name
            )))
        }
        (false, false) => {
            return Err(SpriteError::malformed(format!(
                "sprite '{}' declares neither static pixels nor animation frames",
                sprite.name
            )))
        }
        _ => {}
    }

    // 3. unknown sections
    if let Some(unknown) = document.keys().find(|k| !KNOWN_SECTIONS.contains(&k.as_str())) {
        return Err(SpriteError::InvalidField {
            section: unknown.clone(),
            message: "unknown section".to_string(),
        });
    }

    let animations: Vec<AnimationSection> = typed_list(document, ANIMATION_SECTION)?;
    let loose_frames: Vec<FrameSection> = typed_list(document, FRAME_SECTION)?;

    // 4. namespaces
    let grouped = if has_animation_frames {
        Some(group_frames(animations, loose_frames)?)
    } else {
        None
    };

    // 5. colors
    let colors = validate_colors(document)?;

    let validated = match grouped {
        None => ValidatedSprite::Static(ValidatedStatic {
            name: sprite.name,
            pixels: sprite.pixels.map(|p| p.to_block()).unwrap_or_default(),
            colors,
        }),
        Some(animations) => ValidatedSprite::Animated(ValidatedAnimated {
            name: sprite.name,
            animations,
            colors,
        }),
    };

    debug!("Validated sprite '{}'", validated.name());
    Ok(validated)
}

fn validate_frame(
    namespace: &str,
    section: FrameSection,
    position: usize,
) -> Result<ValidatedFrame> {
    let frame_interval = match section.frame_interval {
        Some(v) => Some(check_interval(&format!("frame {} of '{}'", position, namespace), v)?),
        None => None,
    };
    Ok(ValidatedFrame {
        frame_index: section.frame_index,
        pixels: section.pixels.to_block(),
        frame_interval,
    })
}

/// Bind every frame to its animation, keeping document order.
///
/// Nested frames come first (in animation order), then top-level frames.
fn group_frames(
    animations: Vec<AnimationSection>,
    loose_frames: Vec<FrameSection>,
) -> Result<Vec<ValidatedAnimation>> {
    let mut grouped: IndexMap<String, ValidatedAnimation> = IndexMap::new();
    let mut nested: Vec<(String, FrameSection)> = Vec::new();

    for (i, section) in animations.into_iter().enumerate() {
        let namespace = section
            .namespace
            .filter(|n| !n.trim().is_empty())
            .ok_or(SpriteError::MissingNamespace { section: ANIMATION_SECTION, position: i + 1 })?;
        if grouped.contains_key(&namespace) {
            return Err(SpriteError::DuplicateNamespace { namespace });
        }
        let frame_interval = match section.frame_interval {
            Some(v) => Some(check_interval(&format!("animation '{}'", namespace), v)?),
            None => None,
        };
        for frame in section.frame {
            let target = frame.namespace.clone().unwrap_or_else(|| namespace.clone());
            nested.push((target, frame));
        }
        grouped.insert(
            namespace.clone(),
            ValidatedAnimation { namespace, frame_interval, r#loop: section.r#loop, frames: vec![] },
        );
    }

    let mut loose = Vec::with_capacity(loose_frames.len());
    for (i, frame) in loose_frames.into_iter().enumerate() {
        let namespace = frame
            .namespace
            .clone()
            .ok_or(SpriteError::MissingNamespace { section: FRAME_SECTION, position: i + 1 })?;
        loose.push((namespace, frame));
    }

    for (namespace, frame) in nested.into_iter().chain(loose) {
        let animation = grouped
            .get_mut(&namespace)
            .ok_or_else(|| SpriteError::UnknownNamespace { namespace: namespace.clone() })?;
        let position = animation.frames.len();
        animation.frames.push(validate_frame(&namespace, frame, position)?);
    }

    if let Some(empty) = grouped.values().find(|a| a.frames.is_empty()) {
        return Err(SpriteError::malformed(format!(
            "animation '{}' has no frames",
            empty.namespace
        )));
    }

    Ok(grouped.into_values().collect())
}

fn validate_colors(document: &Document) -> Result<ColorTable> {
    let value = document.get(COLORS_SECTION).ok_or(SpriteError::MissingColorTable)?;
    let entries = value.as_object().ok_or_else(|| SpriteError::InvalidField {
        section: COLORS_SECTION.to_string(),
        message: "expected a table keyed by pixel character".to_string(),
    })?;

    let mut colors = ColorTable::new();
    for (key, entry) in entries {
        let mut chars = key.chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => {
                return Err(SpriteError::InvalidColor {
                    character: key.clone(),
                    reason: "color keys must be a single character".to_string(),
                })
            }
        };
        let color = parse_color_entry(entry).map_err(|e| SpriteError::InvalidColor {
            character: key.clone(),
            reason: e.to_string(),
        })?;
        colors.insert(ch, color);
    }
    Ok(colors)
}
