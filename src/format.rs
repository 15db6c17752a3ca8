//! Document format adapters and their registry
//!
//! Each supported encoding implements [`DocumentFormat`], turning text into
//! a generic [`Document`] and back. The [`FormatRegistry`] selects an adapter
//! by format name or by file extension.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::document::Document;
use crate::error::{Result, SpriteError};

/// An encoding the engine can read (and possibly write) documents in.
pub trait DocumentFormat: Send + Sync {
    /// Format identifier, e.g. `"toml"`.
    fn name(&self) -> &'static str;

    /// File extensions (without the dot) handled by this format.
    fn extensions(&self) -> &'static [&'static str];

    /// Decode text into a generic document.
    fn decode(&self, text: &str) -> Result<Document>;

    /// Encode a generic document as text.
    fn encode(&self, document: &Document) -> Result<String>;
}

fn expect_table(format: &str, value: Value) -> Result<Document> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SpriteError::Decode {
            format: format.to_string(),
            message: format!("top level must be a table, got {}", type_name(&other)),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

/// TOML documents (`[sprite]`, `[[animation]]`, `[[animation.frame]]`, `[colors."#"]`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

impl DocumentFormat for TomlFormat {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["toml"]
    }

    fn decode(&self, text: &str) -> Result<Document> {
        let value: Value = toml::from_str(text).map_err(|e| SpriteError::Decode {
            format: self.name().to_string(),
            message: e.to_string(),
        })?;
        expect_table(self.name(), value)
    }

    fn encode(&self, document: &Document) -> Result<String> {
        toml::to_string_pretty(document).map_err(|e| SpriteError::Encode {
            format: self.name().to_string(),
            message: e.to_string(),
        })
    }
}

/// Plain JSON documents with the same section layout as TOML.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl DocumentFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn decode(&self, text: &str) -> Result<Document> {
        let value: Value = serde_json::from_str(text).map_err(|e| SpriteError::Decode {
            format: self.name().to_string(),
            message: e.to_string(),
        })?;
        expect_table(self.name(), value)
    }

    fn encode(&self, document: &Document) -> Result<String> {
        let mut text = serde_json::to_string_pretty(document).map_err(|e| SpriteError::Encode {
            format: self.name().to_string(),
            message: e.to_string(),
        })?;
        text.push('\n');
        Ok(text)
    }
}

/// JSON5 documents (comments, trailing commas, unquoted keys). Read-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json5Format;

impl DocumentFormat for Json5Format {
    fn name(&self) -> &'static str {
        "json5"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json5"]
    }

    fn decode(&self, text: &str) -> Result<Document> {
        let value: Value = json5::from_str(text).map_err(|e| SpriteError::Decode {
            format: self.name().to_string(),
            message: e.to_string(),
        })?;
        expect_table(self.name(), value)
    }

    fn encode(&self, _document: &Document) -> Result<String> {
        Err(SpriteError::SaveUnsupported {
            format: self.name().to_string(),
            reason: "json5 documents are read-only; save as json or toml".to_string(),
        })
    }
}

/// YAML documents (`sprite:`, `animation:` lists, quoted color keys).
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl DocumentFormat for YamlFormat {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn decode(&self, text: &str) -> Result<Document> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| SpriteError::Decode {
            format: self.name().to_string(),
            message: e.to_string(),
        })?;
        expect_table(self.name(), value)
    }

    fn encode(&self, document: &Document) -> Result<String> {
        serde_yaml::to_string(document).map_err(|e| SpriteError::Encode {
            format: self.name().to_string(),
            message: e.to_string(),
        })
    }
}

/// Registry of document formats keyed by name.
pub struct FormatRegistry {
    formats: HashMap<&'static str, Box<dyn DocumentFormat>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { formats: HashMap::new() }
    }

    /// Create a registry with the built-in `toml`, `json`, `json5` and
    /// `yaml` formats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TomlFormat));
        registry.register(Box::new(JsonFormat));
        registry.register(Box::new(Json5Format));
        registry.register(Box::new(YamlFormat));
        registry
    }

    /// Register a format. A format with the same name is replaced.
    pub fn register(&mut self, format: Box<dyn DocumentFormat>) {
        self.formats.insert(format.name(), format);
    }

    /// Check if a format with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Get a format by name.
    pub fn get(&self, name: &str) -> Result<&dyn DocumentFormat> {
        let key = name.to_ascii_lowercase();
        self.formats
            .get(key.as_str())
            .map(|f| f.as_ref())
            .ok_or_else(|| SpriteError::UnsupportedFormat { format: name.to_string() })
    }

    /// Pick the format for a path from its extension.
    pub fn for_path(&self, path: &Path) -> Result<&dyn DocumentFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| SpriteError::UnsupportedFormat { format: path.display().to_string() })?;

        self.formats
            .values()
            .find(|f| f.extensions().contains(&ext.as_str()))
            .map(|f| f.as_ref())
            .ok_or(SpriteError::UnsupportedFormat { format: ext })
    }

    /// Names of registered formats, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.formats.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
