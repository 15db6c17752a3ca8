//! Playback state machine
//!
//! A [`Player`] is a runtime cursor over an animated sprite. It borrows the
//! immutable model, so any number of players can share one sprite. Time
//! only moves forward through [`Player::advance`].

use log::{debug, trace, warn};

use crate::error::{Result, SpriteError};
use crate::models::{AnimatedSprite, Animation, Frame, SpriteModel};

/// Playback status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

/// Playback cursor over one animated sprite.
#[derive(Debug, Clone)]
pub struct Player<'a> {
    sprite: &'a AnimatedSprite,
    animation: &'a Animation,
    position: usize,
    elapsed: f64,
    status: PlaybackStatus,
}

impl<'a> Player<'a> {
    /// Create a stopped player on the first declared animation.
    pub fn new(sprite: &'a AnimatedSprite) -> Result<Self> {
        Self::with_initial(sprite, None)
    }

    /// Create a stopped player on `preferred` if the sprite has it, else on
    /// the first declared animation.
    pub fn with_initial(sprite: &'a AnimatedSprite, preferred: Option<&str>) -> Result<Self> {
        let preferred = preferred.and_then(|ns| {
            let found = sprite.animation(ns);
            if found.is_none() {
                warn!("Sprite '{}' has no animation '{}', starting on the first", sprite.name(), ns);
            }
            found
        });
        let animation = preferred
            .or_else(|| sprite.animations().values().next())
            .ok_or_else(|| {
                SpriteError::malformed(format!("sprite '{}' has no animations", sprite.name()))
            })?;
        debug!("Player for '{}' starts on '{}'", sprite.name(), animation.namespace());
        Ok(Self { sprite, animation, position: 0, elapsed: 0.0, status: PlaybackStatus::Stopped })
    }

    /// Create a player for a model, failing for static sprites.
    pub fn for_model(model: &'a SpriteModel, preferred: Option<&str>) -> Result<Self> {
        let sprite = model.as_animated().ok_or_else(|| {
            SpriteError::malformed(format!("sprite '{}' is static and cannot be played", model.name()))
        })?;
        Self::with_initial(sprite, preferred)
    }

    /// Switch to an animation and start it from its first frame.
    pub fn play_animation(&mut self, namespace: &str) -> Result<()> {
        let animation = self
            .sprite
            .animation(namespace)
            .ok_or_else(|| SpriteError::UnknownNamespace { namespace: namespace.to_string() })?;
        self.animation = animation;
        self.position = 0;
        self.elapsed = 0.0;
        self.status = PlaybackStatus::Playing;
        debug!("Playing '{}'", namespace);
        Ok(())
    }

    /// Resume (or start) the current animation.
    pub fn play(&mut self) {
        if self.status != PlaybackStatus::Playing {
            debug!("Resume '{}' at frame {}", self.namespace(), self.position);
            self.status = PlaybackStatus::Playing;
        }
    }

    /// Pause, keeping position and accumulated time.
    pub fn pause(&mut self) {
        debug!("Pause '{}' at frame {}", self.namespace(), self.position);
        self.status = PlaybackStatus::Paused;
    }

    /// Stop and rewind to the first frame.
    pub fn stop(&mut self) {
        debug!("Stop '{}'", self.namespace());
        self.status = PlaybackStatus::Stopped;
        self.position = 0;
        self.elapsed = 0.0;
    }

    /// Advance playback by `dt` seconds.
    ///
    /// Does nothing unless playing. A non-looping animation that runs past
    /// its last frame stays on that frame and stops. Whole loops are skipped
    /// in one step, so the cost does not grow with `dt`.
    pub fn advance(&mut self, dt: f64) {
        if self.status != PlaybackStatus::Playing || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.elapsed += dt;

        let frames = self.animation.frames();
        let remaining: f64 = frames.iter().skip(self.position).map(Frame::duration).sum();
        if self.elapsed >= remaining {
            if !self.animation.loops() {
                self.position = frames.len().saturating_sub(1);
                self.elapsed = 0.0;
                self.status = PlaybackStatus::Stopped;
                debug!("'{}' finished on frame {}", self.namespace(), self.position);
                return;
            }
            self.position = 0;
            self.elapsed = (self.elapsed - remaining) % self.animation.total_duration();
        }

        // Less than one pass through the rest of the animation is left.
        while let Some(frame) = frames.get(self.position) {
            if self.elapsed < frame.duration() || self.position + 1 >= frames.len() {
                break;
            }
            self.elapsed -= frame.duration();
            self.position += 1;
        }
        trace!("advance {}: '{}' frame {} (+{:.4})", dt, self.namespace(), self.position, self.elapsed);
    }

    /// Jump to a playback position, clamped to the animation's frames.
    pub fn set_frame(&mut self, position: usize) {
        self.position = position.min(self.frame_count().saturating_sub(1));
        self.elapsed = 0.0;
    }

    pub fn namespace(&self) -> &'a str {
        self.animation.namespace()
    }

    /// Position in playback order (not the frame index).
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_frame(&self) -> Option<&'a Frame> {
        self.animation.frame(self.position)
    }

    pub fn animation(&self) -> &'a Animation {
        self.animation
    }

    /// Time accumulated on the current frame.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn is_looping(&self) -> bool {
        self.animation.loops()
    }

    pub fn frame_count(&self) -> usize {
        self.animation.frame_count()
    }

    /// The namespace declared after the current one, wrapping around.
    pub fn next_animation(&self) -> &'a str {
        let animations = self.sprite.animations();
        let next = animations
            .get_index_of(self.namespace())
            .map_or(0, |i| (i + 1) % animations.len());
        animations.get_index(next).map_or(self.namespace(), |(ns, _)| ns.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use serde_json::{json, Value};

    fn model(value: Value) -> SpriteModel {
        match value {
            Value::Object(map) => build(&map).unwrap(),
            _ => panic!("test documents must be objects"),
        }
    }

    fn sprite() -> SpriteModel {
        model(json!({
            "sprite": {"name": "hero"},
            "animation": [
                {"namespace": "walk", "frame_interval": 0.3, "frame": [
                    {"pixels": "#"}, {"pixels": "#"}
                ]},
                {"namespace": "idle", "loop": false, "frame": [
                    {"pixels": "#", "frame_interval": 0.2},
                    {"pixels": "#", "frame_interval": 0.4}
                ]},
                {"namespace": "jump", "frame": [{"pixels": "#"}]}
            ],
            "colors": {"#": "black"}
        }))
    }

    #[test]
    fn test_initial_state() {
        let m = sprite();
        let player = Player::for_model(&m, None).unwrap();
        assert_eq!(player.status(), PlaybackStatus::Stopped);
        assert_eq!(player.namespace(), "walk");
        assert_eq!(player.position(), 0);
        assert_eq!(player.elapsed(), 0.0);

        let preferred = Player::for_model(&m, Some("idle")).unwrap();
        assert_eq!(preferred.namespace(), "idle");
        let fallback = Player::for_model(&m, Some("swim")).unwrap();
        assert_eq!(fallback.namespace(), "walk");
    }

    #[test]
    fn test_static_sprite_cannot_play() {
        let m = model(json!({"sprite": {"name": "dot", "pixels": "#"}, "colors": {"#": "black"}}));
        assert!(Player::for_model(&m, None).is_err());
    }

    #[test]
    fn test_looping_wrap() {
        let m = sprite();
        let mut player = Player::for_model(&m, None).unwrap();
        player.play_animation("walk").unwrap();
        player.advance(0.65);
        assert_eq!(player.position(), 0);
        assert!((player.elapsed() - 0.05).abs() < 1e-9);
        assert!(player.is_playing());
    }

    #[test]
    fn test_non_looping_stops_on_last_frame() {
        let m = sprite();
        let mut player = Player::for_model(&m, None).unwrap();
        player.play_animation("idle").unwrap();
        player.advance(0.25);
        assert_eq!(player.position(), 1);
        player.advance(1.0);
        assert_eq!(player.position(), 1);
        assert_eq!(player.status(), PlaybackStatus::Stopped);
        assert_eq!(player.elapsed(), 0.0);
    }

    #[test]
    fn test_long_tick_skips_whole_loops() {
        let m = model(json!({
            "sprite": {"name": "blink"},
            "animation": [{"namespace": "blink", "frame_interval": 0.25, "frame": [
                {"pixels": "#"}, {"pixels": "#"}
            ]}],
            "colors": {"#": "black"}
        }));
        let mut player = Player::for_model(&m, None).unwrap();
        player.play();

        let started = std::time::Instant::now();
        player.advance(1e9 + 0.375);
        assert!(started.elapsed() < std::time::Duration::from_millis(50));
        assert_eq!(player.position(), 1);
        assert_eq!(player.elapsed(), 0.125);
        assert!(player.is_playing());
    }

    #[test]
    fn test_tiny_intervals_with_long_tick() {
        let m = model(json!({
            "sprite": {"name": "flicker"},
            "animation": [
                {"namespace": "flicker", "frame_interval": 1e-9, "frame": [
                    {"pixels": "#"}, {"pixels": "#"}, {"pixels": "#"}
                ]},
                {"namespace": "once", "loop": false, "frame_interval": 1e-9, "frame": [
                    {"pixels": "#"}, {"pixels": "#"}
                ]}
            ],
            "colors": {"#": "black"}
        }));
        let mut player = Player::for_model(&m, None).unwrap();
        player.play();
        player.advance(3600.0);
        assert!(player.position() < 3);
        assert!(player.elapsed() < 2e-9);

        player.play_animation("once").unwrap();
        player.advance(3600.0);
        assert_eq!(player.position(), 1);
        assert_eq!(player.status(), PlaybackStatus::Stopped);
        assert_eq!(player.elapsed(), 0.0);
    }

    #[test]
    fn test_advance_ignored_unless_playing() {
        let m = sprite();
        let mut player = Player::for_model(&m, None).unwrap();
        player.advance(1.0);
        assert_eq!((player.position(), player.elapsed()), (0, 0.0));

        player.play();
        player.advance(0.4);
        player.pause();
        player.advance(5.0);
        assert_eq!(player.status(), PlaybackStatus::Paused);
        assert_eq!(player.position(), 1);
        assert!((player.elapsed() - 0.1).abs() < 1e-9);

        player.play();
        assert!(player.is_playing());
    }

    #[test]
    fn test_stop_rewinds_but_keeps_namespace() {
        let m = sprite();
        let mut player = Player::for_model(&m, None).unwrap();
        player.play_animation("idle").unwrap();
        player.advance(0.3);
        player.stop();
        assert_eq!(player.namespace(), "idle");
        assert_eq!((player.position(), player.elapsed()), (0, 0.0));
        assert_eq!(player.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn test_play_unknown_animation() {
        let m = sprite();
        let mut player = Player::for_model(&m, None).unwrap();
        let err = player.play_animation("swim").unwrap_err();
        assert!(matches!(err, SpriteError::UnknownNamespace { ref namespace } if namespace == "swim"));
        assert_eq!(player.namespace(), "walk");
        assert_eq!(player.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn test_set_frame_clamps_and_resets_time() {
        let m = sprite();
        let mut player = Player::for_model(&m, None).unwrap();
        player.play();
        player.advance(0.1);
        player.set_frame(10);
        assert_eq!(player.position(), 1);
        assert_eq!(player.elapsed(), 0.0);
        assert!(player.is_playing());
        assert_eq!(player.current_frame().map(|f| f.index()), Some(1));
    }

    #[test]
    fn test_next_animation_wraps() {
        let m = sprite();
        let mut player = Player::for_model(&m, None).unwrap();
        assert_eq!(player.next_animation(), "idle");
        player.play_animation("jump").unwrap();
        assert_eq!(player.next_animation(), "walk");
        assert!(player.is_looping());
        assert_eq!(player.frame_count(), 1);
    }

    #[test]
    fn test_players_share_one_model() {
        let m = sprite();
        let mut a = Player::for_model(&m, None).unwrap();
        let b = Player::for_model(&m, None).unwrap();
        a.play();
        a.advance(0.3);
        assert_eq!(a.position(), 1);
        assert_eq!(b.position(), 0);
    }
}
