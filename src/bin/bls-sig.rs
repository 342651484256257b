use std::process::ExitCode;

use pairing_sig::cli::{self, USAGE};

fn main() -> ExitCode {
    pairing_sig::logging::init_tracing(None);

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    }
    match cli::run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("bls-sig {}: {err}", args[0]);
            ExitCode::FAILURE
        }
    }
}
