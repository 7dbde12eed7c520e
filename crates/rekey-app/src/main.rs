#![forbid(unsafe_code)]

//! rekey binary entry point.

mod app;
mod cli;
mod logging;
mod theme;

use std::env;
use std::process;

fn main() {
    let outcome = match cli::parse_from(env::args().skip(1)) {
        Ok(outcome) => outcome,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("try 'rekey --help'");
            process::exit(2);
        }
    };

    let opts = match outcome {
        cli::Outcome::Help => {
            println!("{}", cli::help_text());
            return;
        }
        cli::Outcome::Version => {
            println!("rekey {}", cli::version());
            return;
        }
        cli::Outcome::Run(opts) => opts,
    };

    if let Some(path) = &opts.log_file
        && let Err(e) = logging::init(path)
    {
        eprintln!("Failed to open log file {path}: {e}");
        process::exit(1);
    }

    if let Err(e) = app::run(&opts) {
        eprintln!("Runtime error: {e}");
        process::exit(1);
    }
}
