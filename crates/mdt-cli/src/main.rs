use mdt_cli::{command, init_tracing, is_caller_error, run, CALLER_ERROR_EXIT};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();
    let matches = command().get_matches();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&matches, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            if is_caller_error(&err) {
                ExitCode::from(CALLER_ERROR_EXIT)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
