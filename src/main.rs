//! Spritedef - Command-line tool for validating, converting and playing sprite definitions

use std::process::ExitCode;

use clap::Parser;
use spritedef::cli::{self, Cli};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli::run(cli)
}
