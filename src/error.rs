//! Error types for sprite documents
//!
//! Every failure is a document-authoring mistake reported with enough context
//! (section, namespace, character, position) to locate it in the source.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpriteError>;

/// Error raised while loading, validating, building, or saving a sprite.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpriteError {
    /// The document is not a sprite: both or neither of static pixels and
    /// animation frames are present, or the `sprite` section is unusable.
    #[error("Malformed sprite: {reason}")]
    MalformedSprite { reason: String },

    /// A pixel character has no entry in the color table
    #[error("{context}: character '{character}' at ({x}, {y}) has no color definition")]
    MissingColorDefinition { character: char, x: usize, y: usize, context: String },

    /// Pixel rows have unequal length
    #[error("{context}: row {row} has {found} pixels, expected {expected}")]
    NonRectangularGrid { context: String, row: usize, expected: usize, found: usize },

    /// The pixel block contains no rows
    #[error("{context}: pixel block is empty")]
    EmptyGrid { context: String },

    /// Two frames of one namespace declare the same index
    #[error("Animation '{namespace}' declares frame_index {index} more than once")]
    DuplicateFrameIndex { namespace: String, index: u32 },

    /// A frame or playback request names an undeclared namespace
    #[error("Unknown animation namespace '{namespace}'")]
    UnknownNamespace { namespace: String },

    /// Two animation sections share a namespace
    #[error("Animation namespace '{namespace}' is declared more than once")]
    DuplicateNamespace { namespace: String },

    /// An animation (or top-level frame) section lacks its namespace
    #[error("{section} #{position} does not declare a namespace")]
    MissingNamespace { section: &'static str, position: usize },

    /// A color entry could not be resolved to RGBA channels
    #[error("Color '{character}': {reason}")]
    InvalidColor { character: String, reason: String },

    /// The document has no `colors` table
    #[error("Sprite has no color table")]
    MissingColorTable,

    /// A frame interval is not a positive finite number
    #[error("{context}: frame_interval must be a positive number, got {value}")]
    InvalidFrameInterval { context: String, value: f64 },

    /// A section does not match the typed schema
    #[error("Invalid [{section}] section: {message}")]
    InvalidField { section: String, message: String },

    /// No adapter is registered for the requested encoding
    #[error("Unsupported document format '{format}'")]
    UnsupportedFormat { format: String },

    /// The adapter cannot write this document
    #[error("Saving as '{format}' is not supported: {reason}")]
    SaveUnsupported { format: String, reason: String },

    /// The adapter failed to decode bytes into a document
    #[error("Failed to decode {format} document: {message}")]
    Decode { format: String, message: String },

    /// The adapter failed to encode a document
    #[error("Failed to encode {format} document: {message}")]
    Encode { format: String, message: String },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpriteError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        SpriteError::MalformedSprite { reason: reason.into() }
    }

    /// Short machine-friendly name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SpriteError::MalformedSprite { .. } => "malformed_sprite",
            SpriteError::MissingColorDefinition { .. } => "missing_color",
            SpriteError::NonRectangularGrid { .. } => "non_rectangular",
            SpriteError::EmptyGrid { .. } => "empty_grid",
            SpriteError::DuplicateFrameIndex { .. } => "duplicate_frame_index",
            SpriteError::UnknownNamespace { .. } => "unknown_namespace",
            SpriteError::DuplicateNamespace { .. } => "duplicate_namespace",
            SpriteError::MissingNamespace { .. } => "missing_namespace",
            SpriteError::InvalidColor { .. } => "invalid_color",
            SpriteError::MissingColorTable => "missing_color_table",
            SpriteError::InvalidFrameInterval { .. } => "invalid_frame_interval",
            SpriteError::InvalidField { .. } => "invalid_field",
            SpriteError::UnsupportedFormat { .. } => "unsupported_format",
            SpriteError::SaveUnsupported { .. } => "save_unsupported",
            SpriteError::Decode { .. } => "decode",
            SpriteError::Encode { .. } => "encode",
            SpriteError::Io(_) => "io",
        }
    }
}
