//! Data models for sprite documents (sections, grids, animations, sprites)

mod animation;
mod grid;
mod sections;
mod sprite;

// Re-export all public types
pub use animation::{Animation, Frame};
pub use grid::PixelGrid;
pub use sections::{AnimationSection, FrameSection, PixelText, SpriteSection};
pub use sprite::{AnimatedSprite, SpriteModel, StaticSprite};
