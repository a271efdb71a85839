use std::process::ExitCode;

use clap::Parser;
use qlot::cli::{Arguments, ExitStatus, run_cli};

fn main() -> ExitCode {
    let args = Arguments::parse();

    match run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("ERROR: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
