//! Convert command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{Context, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the convert command
pub fn run_convert(
    ctx: &Context,
    input: &Path,
    output: &Path,
    from: Option<&str>,
    to: Option<&str>,
) -> ExitCode {
    let model = match ctx.load_sprite(input, from) {
        Ok(model) => model,
        Err(code) => return code,
    };

    if let Err(e) = ctx.loader.save_file(&model, output, to) {
        eprintln!("Error: {}: {}", output.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output.display());
    ExitCode::from(EXIT_SUCCESS)
}
