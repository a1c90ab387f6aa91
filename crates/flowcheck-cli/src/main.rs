use std::process::ExitCode;

fn main() -> ExitCode {
    flowcheck_cli::run_cli()
}
