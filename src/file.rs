//! Loading and saving sprite documents
//!
//! Glue between the format adapters and the engine: text goes through a
//! [`DocumentFormat`] into a generic document, then through the builder.
//! Saving runs the serializer and encodes the result.

use std::fs;
use std::path::Path;

use log::debug;

use crate::builder::{build_with, BuildOptions};
use crate::error::Result;
use crate::format::{DocumentFormat, FormatRegistry};
use crate::models::SpriteModel;
use crate::serialize::serialize;

/// Loads and saves sprites with a format registry and build options.
#[derive(Default)]
pub struct Loader {
    registry: FormatRegistry,
    options: BuildOptions,
    fallback_format: Option<String>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use these build options for every load.
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Format used for paths whose extension names no registered format.
    pub fn with_fallback_format(mut self, name: impl Into<String>) -> Self {
        self.fallback_format = Some(name.into());
        self
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Pick a format: `explicit` if given, else by extension, else the
    /// fallback format.
    pub fn format_for(&self, path: &Path, explicit: Option<&str>) -> Result<&dyn DocumentFormat> {
        if let Some(name) = explicit {
            return self.registry.get(name);
        }
        match (self.registry.for_path(path), &self.fallback_format) {
            (Ok(format), _) => Ok(format),
            (Err(_), Some(fallback)) => self.registry.get(fallback),
            (Err(e), None) => Err(e),
        }
    }

    /// Parse and build a sprite from text in the named format.
    pub fn load_str(&self, text: &str, format: &str) -> Result<SpriteModel> {
        let document = self.registry.get(format)?.decode(text)?;
        build_with(&document, &self.options)
    }

    /// Read and build a sprite from a file.
    pub fn load_file(&self, path: &Path, format: Option<&str>) -> Result<SpriteModel> {
        let format = self.format_for(path, format)?;
        debug!("Loading {} as {}", path.display(), format.name());
        let text = fs::read_to_string(path)?;
        let document = format.decode(&text)?;
        build_with(&document, &self.options)
    }

    /// Serialize a sprite as text in the named format.
    pub fn save_string(&self, model: &SpriteModel, format: &str) -> Result<String> {
        let format = self.registry.get(format)?;
        format.encode(&serialize(model)?)
    }

    /// Serialize a sprite and write it to a file.
    pub fn save_file(&self, model: &SpriteModel, path: &Path, format: Option<&str>) -> Result<()> {
        let format = self.format_for(path, format)?;
        let text = format.encode(&serialize(model)?)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, text)?;
        debug!("Saved '{}' to {}", model.name(), path.display());
        Ok(())
    }
}

/// Parse and build a sprite from text with default settings.
///
/// # Examples
///
/// ```
/// let sprite = spritedef::load_str(
///     r##"
/// [sprite]
/// name = "dot"
/// pixels = "#"
///
/// [colors."#"]
/// red = 255
/// green = 0
/// blue = 0
/// "##,
///     "toml",
/// )
/// .unwrap();
/// assert_eq!(sprite.name(), "dot");
/// ```
pub fn load_str(text: &str, format: &str) -> Result<SpriteModel> {
    Loader::default().load_str(text, format)
}

/// Read a sprite file, choosing the format from its extension.
pub fn load_file(path: impl AsRef<Path>) -> Result<SpriteModel> {
    Loader::default().load_file(path.as_ref(), None)
}

/// Serialize a sprite as text in the named format.
pub fn save_string(model: &SpriteModel, format: &str) -> Result<String> {
    Loader::default().save_string(model, format)
}

/// Write a sprite file, choosing the format from its extension.
pub fn save_file(model: &SpriteModel, path: impl AsRef<Path>) -> Result<()> {
    Loader::default().save_file(model, path.as_ref(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpriteError;
    use tempfile::TempDir;

    const DOT: &str = r##"
[sprite]
name = "dot"
pixels = """
#.
.#
"""

[colors]
"#" = "#FF0000"
"." = { red = 0, green = 0, blue = 0, alpha = 0 }
"##;

    #[test]
    fn test_load_and_save_between_formats() {
        let model = load_str(DOT, "toml").unwrap();
        let json = save_string(&model, "json").unwrap();
        assert_eq!(load_str(&json, "json").unwrap(), model);
        assert_eq!(load_str(&json, "json5").unwrap(), model);
    }

    #[test]
    fn test_json5_is_read_only() {
        let model = load_str(DOT, "toml").unwrap();
        assert!(matches!(save_string(&model, "json5"), Err(SpriteError::SaveUnsupported { .. })));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let model = load_str(DOT, "toml").unwrap();
        let path = dir.path().join("nested").join("dot.toml");
        save_file(&model, &path).unwrap();
        assert_eq!(load_file(&path).unwrap(), model);
    }

    #[test]
    fn test_fallback_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dot.sprite");
        std::fs::write(&path, DOT).unwrap();

        assert!(matches!(load_file(&path), Err(SpriteError::UnsupportedFormat { .. })));
        let loader = Loader::new().with_fallback_format("toml");
        assert_eq!(loader.load_file(&path, None).unwrap().name(), "dot");
        assert!(loader.load_file(&path, Some("json")).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SpriteError::Io(_)));
    }
}
