//! # flowcheck-cli
//!
//! The `flowcheck` binary: parses arguments, initializes logging at the
//! requested verbosity, runs [`flowcheck::check`], and renders the report.

mod cli;

pub use cli::{Cli, Commands, OutputFormat};

use clap::Parser;
use std::process::ExitCode;

/// Initializes `env_logger` at a level derived from `-v`'s repeat count,
/// then dispatches to the requested subcommand. Returns the process exit
/// code: `0` when the report is `ok`, `1` otherwise or on a CLI-level error.
pub fn run_cli() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { input, format } => run_check(&input, format),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_check(input: &std::path::Path, format: OutputFormat) -> ExitCode {
    let report = flowcheck::check(input);

    match format {
        OutputFormat::Json => match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("failed to render report as JSON: {e}");
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Text => render_text(&report),
    }

    if report.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn render_text(report: &flowcheck::Report) {
    if report.ok {
        println!("ok");
        if let Some(graph) = &report.graph {
            for node in &graph.nodes {
                println!("  {}: {}", node.uid, node.predicate);
            }
        }
        return;
    }
    for error in &report.errors {
        println!("{}: {}", error.kind, error.message);
    }
}
