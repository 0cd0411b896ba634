use std::process::ExitCode;

use crate::cli::run;

pub mod cli;
mod config;
pub mod tags;
pub mod walk;

fn main() -> ExitCode {
    run()
}
