//! Info command implementation

use std::path::Path;
use std::process::ExitCode;

use serde_json::{json, Value};

use crate::color::format_hex;
use crate::models::{Animation, SpriteModel};

use super::{Context, EXIT_ERROR, EXIT_SUCCESS};

fn animation_summary(animation: &Animation) -> Value {
    let frames: Vec<Value> = animation
        .frames()
        .iter()
        .map(|f| {
            json!({
                "index": f.index(),
                "width": f.grid().map(|g| g.width()),
                "height": f.grid().map(|g| g.height()),
                "duration": f.duration(),
                "override": f.duration_override(),
            })
        })
        .collect();
    json!({
        "namespace": animation.namespace(),
        "loop": animation.loops(),
        "frame_interval": animation.default_duration(),
        "total_duration": animation.total_duration(),
        "frames": frames,
    })
}

fn summary(model: &SpriteModel) -> Value {
    let colors: serde_json::Map<String, Value> =
        model.colors().iter().map(|(ch, c)| (ch.to_string(), json!(format_hex(c)))).collect();
    match model {
        SpriteModel::Static(s) => json!({
            "name": s.name(),
            "kind": "static",
            "width": s.grid().width(),
            "height": s.grid().height(),
            "colors": colors,
        }),
        SpriteModel::Animated(a) => json!({
            "name": a.name(),
            "kind": "animated",
            "animations": a.animations().values().map(animation_summary).collect::<Vec<_>>(),
            "colors": colors,
        }),
    }
}

fn print_text(model: &SpriteModel) {
    println!("Sprite: {}", model.name());
    match model {
        SpriteModel::Static(s) => {
            println!("Kind: static ({}x{})", s.grid().width(), s.grid().height());
        }
        SpriteModel::Animated(a) => {
            println!("Kind: animated ({} animation{})", a.animations().len(), if a.animations().len() == 1 { "" } else { "s" });
            for animation in a.animations().values() {
                println!();
                println!(
                    "  {} (loop: {}, frame_interval: {}s, total: {:.3}s)",
                    animation.namespace(),
                    if animation.loops() { "yes" } else { "no" },
                    animation.default_duration(),
                    animation.total_duration()
                );
                for frame in animation.frames() {
                    let size = frame
                        .grid()
                        .map_or_else(|| "-".to_string(), |g| format!("{}x{}", g.width(), g.height()));
                    let marker = if frame.duration_override().is_some() { " *" } else { "" };
                    println!("    [{}] {} {}s{}", frame.index(), size, frame.duration(), marker);
                }
            }
        }
    }
    println!();
    println!("Colors:");
    for (ch, color) in model.colors().iter() {
        println!("  {} {}", ch, format_hex(color));
    }
}

/// Execute the info command
pub fn run_info(ctx: &Context, input: &Path, json: bool) -> ExitCode {
    let model = match ctx.load_sprite(input, None) {
        Ok(model) => model,
        Err(code) => return code,
    };

    if json {
        match serde_json::to_string_pretty(&summary(&model)) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print_text(&model);
    }
    ExitCode::from(EXIT_SUCCESS)
}
