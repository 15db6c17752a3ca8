//! Render command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::gif::render_animation_gif;
use crate::models::{AnimatedSprite, Animation, SpriteModel};
use crate::output::{output_path, render_grid, save_png};

use super::{Context, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

fn select_animation<'a>(
    ctx: &Context,
    sprite: &'a AnimatedSprite,
    requested: Option<&str>,
) -> Result<&'a Animation, ExitCode> {
    if let Some(name) = requested {
        return sprite.animation(name).ok_or_else(|| {
            let known: Vec<&str> = sprite.animations().keys().map(String::as_str).collect();
            eprintln!("Error: no animation '{}' (available: {})", name, known.join(", "));
            ExitCode::from(EXIT_INVALID_ARGS)
        });
    }
    ctx.config
        .playback
        .initial_animation
        .as_deref()
        .and_then(|name| sprite.animation(name))
        .or_else(|| sprite.animations().values().next())
        .ok_or_else(|| {
            eprintln!("Error: sprite '{}' has no animations", sprite.name());
            ExitCode::from(EXIT_ERROR)
        })
}

/// Execute the render command
pub fn run_render(
    ctx: &Context,
    input: &Path,
    output: Option<&Path>,
    animation: Option<&str>,
    frame: Option<u32>,
    gif: bool,
) -> ExitCode {
    let model = match ctx.load_sprite(input, None) {
        Ok(model) => model,
        Err(code) => return code,
    };
    let scale = ctx.config.render.scale;

    let sprite = match &model {
        SpriteModel::Static(s) => {
            if gif || animation.is_some() || frame.is_some() {
                eprintln!("Error: sprite '{}' is static; --gif, --animation and --frame need an animated sprite", s.name());
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
            let path = output_path(input, s.name(), "png", output);
            return save(&render_grid(s.grid(), scale), &path);
        }
        SpriteModel::Animated(a) => a,
    };

    let selected = match select_animation(ctx, sprite, animation) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if gif {
        let path = output_path(input, selected.namespace(), "gif", output);
        if let Err(e) = render_animation_gif(selected, scale, &path) {
            eprintln!("Error: {}: {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Saved: {}", path.display());
        return ExitCode::from(EXIT_SUCCESS);
    }

    let chosen = match frame {
        Some(index) => selected.frame_by_index(index),
        None => selected.frames().first(),
    };
    let Some(grid) = chosen.and_then(|f| f.grid()) else {
        let indices: Vec<String> = selected.frames().iter().map(|f| f.index().to_string()).collect();
        eprintln!(
            "Error: animation '{}' has no frame {} (frames: {})",
            selected.namespace(),
            frame.map_or_else(|| "to render".to_string(), |i| i.to_string()),
            indices.join(", ")
        );
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    let index = chosen.map_or(0, |f| f.index());
    let label = format!("{}_{}", selected.namespace(), index);
    let path = output_path(input, &label, "png", output);
    save(&render_grid(grid, scale), &path)
}

fn save(image: &image::RgbaImage, path: &Path) -> ExitCode {
    if let Err(e) = save_png(image, path) {
        eprintln!("Error: {}: {}", path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved: {}", path.display());
    ExitCode::from(EXIT_SUCCESS)
}
