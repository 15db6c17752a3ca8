//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod convert;
mod info;
mod play;
mod render;
mod validate;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, SpritedefConfig};
use crate::file::Loader;
use crate::models::SpriteModel;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Extensions of documents picked up when scanning a directory.
const SPRITE_EXTENSIONS: &[&str] = &["toml", "json", "json5", "yaml", "yml"];

/// Check if a path has a sprite document extension.
pub fn is_sprite_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SPRITE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Find all sprite documents in a directory (recursively), sorted.
///
/// `spritedef.toml` config files are skipped.
pub fn find_sprite_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let dir_str = dir.display().to_string();

    for ext in SPRITE_EXTENSIONS {
        if let Ok(paths) = glob(&format!("{}/**/*.{}", dir_str, ext)) {
            files.extend(paths.filter_map(Result::ok));
        }
    }

    files.retain(|p| p.file_name().is_some_and(|n| n != crate::config::CONFIG_FILE));
    files.sort();
    files
}

/// Spritedef - validate, convert, render and play sprite definition documents
#[derive(Parser)]
#[command(name = "spritedef")]
#[command(about = "Spritedef - validate, convert, render and play sprite definitions (.toml, .json, .json5, .yaml)")]
#[command(version)]
pub struct Cli {
    /// Path to a spritedef.toml (default: discovered from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seconds per frame when neither the frame nor its animation sets one
    #[arg(long, global = true)]
    pub frame_interval: Option<f64>,

    /// Format for files whose extension names no known format
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Animation to start on when none is given (default: first declared)
    #[arg(long, global = true)]
    pub initial_animation: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate sprite documents
    Validate {
        /// Files to validate
        files: Vec<PathBuf>,

        /// Also validate every sprite document under this directory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Treat warnings (unused colors) as errors
        #[arg(long)]
        strict: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert a sprite document to another format
    Convert {
        /// Input document
        input: PathBuf,

        /// Output document
        output: PathBuf,

        /// Input format (default: from the input extension)
        #[arg(long)]
        from: Option<String>,

        /// Output format (default: from the output extension)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show a sprite's animations, frames and timing
    Info {
        /// Input document
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a sprite or animation frame to PNG, or an animation to GIF
    Render {
        /// Input document
        input: PathBuf,

        /// Output file or directory (ends with /).
        /// If omitted: {input}_{label}.png next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Animation to render (default: configured initial, else first)
        #[arg(long)]
        animation: Option<String>,

        /// Frame index to render (default: first frame)
        #[arg(long)]
        frame: Option<u32>,

        /// Scale output by integer factor (1-64, default from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: Option<u32>,

        /// Output the whole animation as an animated GIF
        #[arg(long)]
        gif: bool,
    },
    /// Simulate playback and print the frame shown after each tick
    Play {
        /// Input document
        input: PathBuf,

        /// Animation to play (default: configured initial, else first)
        #[arg(long)]
        animation: Option<String>,

        /// Seconds per tick
        #[arg(long, default_value = "0.1")]
        tick: f64,

        /// Number of ticks to simulate
        #[arg(long, default_value = "10")]
        ticks: u32,
    },
}

/// Loaded configuration plus a loader configured from it.
pub struct Context {
    pub config: SpritedefConfig,
    pub loader: Loader,
}

impl Context {
    pub fn load_sprite(&self, path: &Path, format: Option<&str>) -> Result<SpriteModel, ExitCode> {
        self.loader.load_file(path, format).map_err(|e| {
            eprintln!("Error: {}: {}", path.display(), e);
            ExitCode::from(EXIT_ERROR)
        })
    }
}

fn load_context(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Context, ExitCode> {
    let mut config = load_config(config_path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })?;
    merge_cli_overrides(&mut config, overrides).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;

    let loader = Loader::new()
        .with_options(config.build_options())
        .with_fallback_format(config.defaults.format.clone());
    Ok(Context { config, loader })
}

/// Run the parsed command line.
pub fn run(cli: Cli) -> ExitCode {
    let scale = match &cli.command {
        Commands::Render { scale, .. } => *scale,
        _ => None,
    };
    let overrides = CliOverrides {
        frame_interval: cli.frame_interval,
        format: cli.format.clone(),
        initial_animation: cli.initial_animation.clone(),
        scale,
    };
    let ctx = match load_context(cli.config.as_deref(), &overrides) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    match cli.command {
        Commands::Validate { files, dir, strict, json } => {
            validate::run_validate(&ctx, &files, dir.as_deref(), strict, json)
        }
        Commands::Convert { input, output, from, to } => {
            convert::run_convert(&ctx, &input, &output, from.as_deref(), to.as_deref())
        }
        Commands::Info { input, json } => info::run_info(&ctx, &input, json),
        Commands::Render { input, output, animation, frame, scale: _, gif } => {
            render::run_render(&ctx, &input, output.as_deref(), animation.as_deref(), frame, gif)
        }
        Commands::Play { input, animation, tick, ticks } => {
            play::run_play(&ctx, &input, animation.as_deref(), tick, ticks)
        }
    }
}
