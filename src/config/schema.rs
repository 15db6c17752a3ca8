//! Configuration schema types for `spritedef.toml`
//!
//! Defines the structure and validation rules for spritedef configuration.

use serde::{Deserialize, Serialize};

use crate::builder::BuildOptions;
use crate::timing::DEFAULT_FRAME_INTERVAL;

/// Largest accepted render scale.
pub const MAX_SCALE: u32 = 64;

/// Defaults applied while loading documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Seconds per frame when neither frame nor animation declares one
    #[serde(default = "default_frame_interval")]
    pub frame_interval: f64,
    /// Format for files whose extension names no known format
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { frame_interval: default_frame_interval(), format: default_format() }
    }
}

fn default_frame_interval() -> f64 {
    DEFAULT_FRAME_INTERVAL
}

fn default_format() -> String {
    "toml".to_string()
}

/// Playback settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Animation new players start on, when the sprite has it
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub initial_animation: Option<String>,
}

/// PNG and GIF export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Integer upscale factor
    #[serde(default = "default_scale")]
    pub scale: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: default_scale() }
    }
}

fn default_scale() -> u32 {
    1
}

/// Complete spritedef.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpritedefConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.scale")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "spritedef.toml: '{}' {}", self.field, self.message)
    }
}

impl SpritedefConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let interval = self.defaults.frame_interval;
        if !(interval.is_finite() && interval > 0.0) {
            errors.push(ConfigValidationError {
                field: "defaults.frame_interval".to_string(),
                message: "must be a positive number of seconds".to_string(),
            });
        }

        if self.defaults.format.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "defaults.format".to_string(),
                message: "must be a non-empty format name".to_string(),
            });
        }

        if let Some(name) = &self.playback.initial_animation {
            if name.trim().is_empty() {
                errors.push(ConfigValidationError {
                    field: "playback.initial_animation".to_string(),
                    message: "must be a non-empty namespace".to_string(),
                });
            }
        }

        if self.render.scale == 0 || self.render.scale > MAX_SCALE {
            errors.push(ConfigValidationError {
                field: "render.scale".to_string(),
                message: format!("must be between 1 and {}", MAX_SCALE),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Build options derived from `[defaults]`.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions { default_frame_interval: self.defaults.frame_interval }
    }
}
