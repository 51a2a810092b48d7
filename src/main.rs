use fimov::cli::{CliError, EXIT_PARTIAL_MOVE, USAGE, parse_args, run_cli};
use fimov::output::OutputFormatter;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let request = match parse_args(env::args_os()) {
        Ok(request) => request,
        // Lets clap print help/version (exit 0) or its own diagnostics (exit 2)
        Err(CliError::Clap(e)) => e.exit(),
        Err(e) => {
            println!("Error: {}", e);
            println!("{}", USAGE);
            return ExitCode::from(fimov::AppError::from(e).exit_code());
        }
    };

    match run_cli(&request) {
        Ok(report) if report.is_complete_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_PARTIAL_MOVE),
        Err(e) => {
            OutputFormatter::error(&format!("Error: {}", e));
            ExitCode::from(e.exit_code())
        }
    }
}
