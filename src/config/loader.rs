//! Configuration loading and discovery for `spritedef.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::SpritedefConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name looked up in the working directory and its parents.
pub const CONFIG_FILE: &str = "spritedef.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse spritedef.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the global frame interval
    pub frame_interval: Option<f64>,
    /// Override the fallback document format
    pub format: Option<String>,
    /// Override the initial animation
    pub initial_animation: Option<String>,
    /// Override the render scale
    pub scale: Option<u32>,
}

/// Find spritedef.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for spritedef.toml
/// 2. Check XDG_CONFIG_HOME/spritedef/spritedef.toml (or ~/.config/spritedef/spritedef.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find spritedef.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("spritedef").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find spritedef.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("art/spritedef.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<SpritedefConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

fn load_config_file(path: &Path) -> Result<SpritedefConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SpritedefConfig = toml::from_str(&contents)?;
    check(&config)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn check(config: &SpritedefConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// The configuration used when no spritedef.toml is found.
pub fn default_config() -> SpritedefConfig {
    SpritedefConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged
/// configuration is validated again.
pub fn merge_cli_overrides(
    config: &mut SpritedefConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(interval) = overrides.frame_interval {
        config.defaults.frame_interval = interval;
    }
    if let Some(ref format) = overrides.format {
        config.defaults.format = format.clone();
    }
    if let Some(ref name) = overrides.initial_animation {
        config.playback.initial_animation = Some(name.clone());
    }
    if let Some(scale) = overrides.scale {
        config.render.scale = scale;
    }
    check(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[render]\nscale = 2\n");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"");

        let subdir = temp.path().join("art").join("sprites");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join("spritedef");
        fs::create_dir_all(&dir).expect("should create config dir");
        let config_path = write_config(&dir, b"");

        let previous = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match previous {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[defaults]
frame_interval = 0.25

[playback]
initial_animation = "idle"
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.defaults.frame_interval, 0.25);
        assert_eq!(config.playback.initial_animation.as_deref(), Some("idle"));
        assert_eq!(config.render.scale, 1);
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");
        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[defaults]\nframe_interval = -1.0\n");
        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = default_config();
        let overrides = CliOverrides {
            scale: Some(4),
            initial_animation: Some("walk".to_string()),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides).expect("overrides are valid");
        assert_eq!(config.render.scale, 4);
        assert_eq!(config.playback.initial_animation.as_deref(), Some("walk"));
        assert_eq!(config.defaults.frame_interval, 0.5);
    }

    #[test]
    fn test_merge_cli_overrides_rechecks() {
        let mut config = default_config();
        let overrides = CliOverrides { scale: Some(0), ..Default::default() };
        let result = merge_cli_overrides(&mut config, &overrides);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
