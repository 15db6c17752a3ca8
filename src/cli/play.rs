//! Play command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::playback::{PlaybackStatus, Player};

use super::{Context, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the play command
pub fn run_play(
    ctx: &Context,
    input: &Path,
    animation: Option<&str>,
    tick: f64,
    ticks: u32,
) -> ExitCode {
    if !(tick.is_finite() && tick > 0.0) {
        eprintln!("Error: --tick must be a positive number of seconds");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let model = match ctx.load_sprite(input, None) {
        Ok(model) => model,
        Err(code) => return code,
    };
    let initial = ctx.config.playback.initial_animation.as_deref();
    let mut player = match Player::for_model(&model, initial) {
        Ok(player) => player,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let started = match animation {
        Some(name) => player.play_animation(name),
        None => {
            player.play();
            Ok(())
        }
    };
    if let Err(e) = started {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    println!("{:>8}  {:<12} {:>8} {:>6}  status", "time", "animation", "position", "index");
    for n in 1..=ticks {
        player.advance(tick);
        let index = player.current_frame().map_or(0, |f| f.index());
        let status = match player.status() {
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Stopped => "stopped",
        };
        println!(
            "{:>8.3}  {:<12} {:>8} {:>6}  {}",
            f64::from(n) * tick,
            player.namespace(),
            player.position(),
            index,
            status
        );
        if player.status() == PlaybackStatus::Stopped {
            break;
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}
