//! irregular-ts command-line interface
//!
//! Computes one rolling-window operator over a CSV of (time, value)
//! observations. Set `RUST_LOG=debug` for progress on stderr.

use irregular_ts_cli::args::Args;
use irregular_ts_cli::commands;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse_args();
    match commands::run(&args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
