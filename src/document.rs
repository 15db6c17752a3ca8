//! The generic document tree exchanged with format adapters
//!
//! A document is an ordered mapping of section names to values. Format
//! adapters produce it from bytes and consume it when writing; the schema
//! validator is the only code that inspects its raw shape.

use serde_json::{Map, Value};

/// A parsed, format-neutral document. Key order follows the source.
pub type Document = Map<String, Value>;

/// Section holding the sprite name and, for static sprites, its pixels.
pub const SPRITE_SECTION: &str = "sprite";
/// Array of animation sections.
pub const ANIMATION_SECTION: &str = "animation";
/// Array of top-level frame sections, bound to animations by namespace.
pub const FRAME_SECTION: &str = "frame";
/// Color table keyed by pixel character.
pub const COLORS_SECTION: &str = "colors";

/// Top-level sections a sprite document may contain.
pub const KNOWN_SECTIONS: &[&str] =
    &[SPRITE_SECTION, ANIMATION_SECTION, FRAME_SECTION, COLORS_SECTION];

/// Interpret a value as a list of sections.
///
/// Arrays of tables are returned as-is; a lone table is treated as a
/// one-element list so `[animation]` and `[[animation]]` both work.
pub fn section_list(value: &Value) -> Option<Vec<&Value>> {
    match value {
        Value::Array(items) => Some(items.iter().collect()),
        Value::Object(_) => Some(vec![value]),
        _ => None,
    }
}
