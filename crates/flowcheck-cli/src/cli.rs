//! Command-line argument surface (§6).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Static reachability and soundness checker for `zofar` branching questionnaires.
#[derive(Parser, Debug)]
#[command(name = "flowcheck", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Raise log verbosity; repeatable (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Checks a questionnaire XML document and reports every violation found.
    Check {
        /// Path to the questionnaire XML document.
        input: PathBuf,

        /// Output rendering.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
