//! Spritedef - Library for sprite definition documents
//!
//! This library provides functionality to:
//! - Validate TOML, JSON and JSON5 sprite documents against a strict schema
//! - Resolve frame indices and per-frame timing into an immutable sprite model
//! - Drive animation playback from elapsed time
//! - Serialize a model back into a document that rebuilds to the same model
//! - Render grids to PNG and animations to GIF

pub mod builder;
pub mod cli;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod file;
pub mod format;
pub mod frames;
pub mod gif;
pub mod interpolate;
pub mod models;
pub mod output;
pub mod pixels;
pub mod playback;
pub mod serialize;
pub mod timing;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use builder::{build, build_with, BuildOptions};
pub use error::{Result, SpriteError};
pub use file::{load_file, load_str, save_file, save_string, Loader};
pub use models::SpriteModel;
pub use playback::{PlaybackStatus, Player};
pub use serialize::serialize;
