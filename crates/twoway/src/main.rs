#![forbid(unsafe_code)]

use std::process::ExitCode;

use clap::Parser;
use twoway::{AppError, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match start(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("twoway: {e}");
            ExitCode::FAILURE
        }
    }
}

fn start(cli: &Cli) -> Result<(), AppError> {
    let config = cli.resolve(|key| std::env::var(key).ok())?;
    twoway::logging::init(&config)?;
    twoway::run(&config)
}
