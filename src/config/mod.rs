//! Configuration for spritedef
//!
//! Provides types, discovery and loading for `spritedef.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
