use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use succinctus::commands;
use succinctus::config::{Cli, Config, Mode};
use succinctus::profiler::{BasicProfiler, NoProfiler};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from(Cli::parse());

    let start = Instant::now();
    let outcome = match (config.algo, config.profile) {
        (Mode::Bv, false) => commands::run_bv::<NoProfiler>(&config.file_in, &config.file_out),
        (Mode::Bv, true) => commands::run_bv::<BasicProfiler>(&config.file_in, &config.file_out),
        (Mode::Bp, false) => commands::run_bp::<NoProfiler>(&config.file_in, &config.file_out),
        (Mode::Bp, true) => commands::run_bp::<BasicProfiler>(&config.file_in, &config.file_out),
    };
    let elapsed_ms = start.elapsed().as_millis();

    match outcome {
        Ok(result) => {
            println!(
                "RESULT algo={} name=succinctus time={} space={}",
                config.algo, elapsed_ms, result.space_bits
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
