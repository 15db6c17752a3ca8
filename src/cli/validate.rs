//! Validate command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rayon::prelude::*;

use crate::builder::unused_colors;

use super::{find_sprite_files, is_sprite_file, Context, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Outcome of validating one file.
struct FileReport {
    path: PathBuf,
    error: Option<String>,
    kind: Option<&'static str>,
    warnings: Vec<String>,
}

impl FileReport {
    fn failed(&self, strict: bool) -> bool {
        self.error.is_some() || (strict && !self.warnings.is_empty())
    }
}

fn collect_files(files: &[PathBuf], dir: Option<&Path>) -> Vec<PathBuf> {
    let mut collected = Vec::new();
    for path in files {
        if path.is_dir() {
            collected.extend(find_sprite_files(path));
        } else {
            if !is_sprite_file(path) {
                log::warn!("{}: unrecognized extension, using the default format", path.display());
            }
            collected.push(path.clone());
        }
    }
    if let Some(dir) = dir {
        collected.extend(find_sprite_files(dir));
    }
    collected
}

fn check_file(ctx: &Context, path: &Path) -> FileReport {
    match ctx.loader.load_file(path, None) {
        Ok(model) => FileReport {
            path: path.to_path_buf(),
            error: None,
            kind: None,
            warnings: unused_colors(&model)
                .into_iter()
                .map(|ch| format!("color '{}' is never used", ch))
                .collect(),
        },
        Err(e) => FileReport {
            path: path.to_path_buf(),
            error: Some(e.to_string()),
            kind: Some(e.kind()),
            warnings: vec![],
        },
    }
}

/// Execute the validate command
pub fn run_validate(
    ctx: &Context,
    files: &[PathBuf],
    dir: Option<&Path>,
    strict: bool,
    json: bool,
) -> ExitCode {
    let file_list = collect_files(files, dir);
    if file_list.is_empty() {
        eprintln!("Error: No files to validate");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let reports: Vec<FileReport> = file_list.par_iter().map(|path| check_file(ctx, path)).collect();
    let failures = reports.iter().filter(|r| r.failed(strict)).count();

    if json {
        let files: Vec<_> = reports
            .iter()
            .map(|r| {
                serde_json::json!({
                    "path": r.path.display().to_string(),
                    "valid": !r.failed(strict),
                    "error": r.error,
                    "kind": r.kind,
                    "warnings": r.warnings,
                })
            })
            .collect();
        let output = serde_json::json!({ "valid": failures == 0, "files": files });
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for report in &reports {
            match &report.error {
                Some(error) => eprintln!("{}: ERROR - {}", report.path.display(), error),
                None => println!("{}: ok", report.path.display()),
            }
            for warning in &report.warnings {
                eprintln!("{}: WARNING - {}", report.path.display(), warning);
            }
        }

        println!();
        match failures {
            0 => println!("All {} file{} valid.", reports.len(), plural(reports.len())),
            n => println!("{} of {} file{} failed.", n, reports.len(), plural(reports.len())),
        }
        let warned = reports.iter().any(|r| r.error.is_none() && !r.warnings.is_empty());
        if !strict && warned {
            println!("Hint: Run with --strict to treat warnings as errors.");
        }
    }

    if failures == 0 {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
