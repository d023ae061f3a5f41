use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Which façade a run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Dynamic bit vector driver.
    Bv,
    /// Dynamic balanced-parentheses tree driver.
    Bp,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Bv => write!(f, "bv"),
            Mode::Bp => write!(f, "bp"),
        }
    }
}

/// `<binary> (bv|bp) <input-path> <output-path> [--profile]`
#[derive(Debug, Parser)]
#[command(name = "succinctus", about = "Dynamic bit vector / balanced-parentheses tree driver")]
pub struct Cli {
    /// Which data structure to drive.
    pub mode: Mode,
    /// Path to the command input file.
    pub input: PathBuf,
    /// Path to write query results and the final structure to.
    pub output: PathBuf,
    /// Record per-operation wall-clock time with `BasicProfiler` and log a summary on exit,
    /// instead of the zero-cost `NoProfiler` default.
    #[arg(long)]
    pub profile: bool,
}

/// Resolved run configuration, independent of `clap` so `commands` doesn't need to depend on it.
#[derive(Debug, Clone)]
pub struct Config {
    pub algo: Mode,
    pub file_in: PathBuf,
    pub file_out: PathBuf,
    pub profile: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            algo: cli.mode,
            file_in: cli.input,
            file_out: cli.output,
            profile: cli.profile,
        }
    }
}
