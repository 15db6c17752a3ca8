//! Sprite model: the validated, immutable form of a sprite document.

use indexmap::IndexMap;

use super::animation::Animation;
use super::grid::PixelGrid;
use crate::color::ColorTable;

/// A sprite with a single image.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticSprite {
    pub(crate) name: String,
    pub(crate) grid: PixelGrid,
    pub(crate) colors: ColorTable,
}

impl StaticSprite {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }
}

/// A sprite with named animations sharing one color table.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedSprite {
    pub(crate) name: String,
    pub(crate) animations: IndexMap<String, Animation>,
    pub(crate) colors: ColorTable,
}

impl AnimatedSprite {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Animations in declaration order.
    pub fn animations(&self) -> &IndexMap<String, Animation> {
        &self.animations
    }

    pub fn animation(&self, namespace: &str) -> Option<&Animation> {
        self.animations.get(namespace)
    }

    /// Namespace of the first declared animation.
    pub fn first_namespace(&self) -> Option<&str> {
        self.animations.keys().next().map(String::as_str)
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }
}

/// A validated sprite: exactly one of static or animated.
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteModel {
    Static(StaticSprite),
    Animated(AnimatedSprite),
}

impl SpriteModel {
    pub fn name(&self) -> &str {
        match self {
            SpriteModel::Static(s) => s.name(),
            SpriteModel::Animated(a) => a.name(),
        }
    }

    pub fn colors(&self) -> &ColorTable {
        match self {
            SpriteModel::Static(s) => s.colors(),
            SpriteModel::Animated(a) => a.colors(),
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, SpriteModel::Animated(_))
    }

    pub fn as_static(&self) -> Option<&StaticSprite> {
        match self {
            SpriteModel::Static(s) => Some(s),
            SpriteModel::Animated(_) => None,
        }
    }

    pub fn as_animated(&self) -> Option<&AnimatedSprite> {
        match self {
            SpriteModel::Animated(a) => Some(a),
            SpriteModel::Static(_) => None,
        }
    }
}
