use clap::Parser;
use thiserror::Error;
use std::{path::PathBuf, process::ExitCode};

use crate::config::{Config, ErrorPolicy};
use crate::walk::{self, TreeReport, WalkError};

#[derive(Parser)]
#[command(name = "desc2comm")]
#[command(version = "0.1")]
#[command(about = "Copies description tag to comment tag in MP3 file.")]
pub struct Cli {
    /// Directory path of search root.
    pub root_directory: PathBuf,

    /// Path to an optional config TOML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log per-file failures and continue instead of aborting
    #[arg(short, long)]
    pub keep_going: bool,

    /// Follow symbolic links while walking the tree
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long)]
    pub log_level: Option<log::LevelFilter>,
}

impl Cli {
    /// Config file values, overridden by command line flags
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if self.keep_going {
            cfg.on_error = ErrorPolicy::Continue;
        }
        if self.follow_symlinks {
            cfg.follow_symlinks = true;
        }
        if self.log_level.is_some() {
            cfg.log_level = self.log_level;
        }

        Ok(cfg)
    }
}

fn init_logger(level: log::LevelFilter) {
    // a second init (tests running the CLI several times) keeps the first logger
    let _ = env_logger::Builder::new().filter_level(level).try_init();
}

fn log_summary(report: &TreeReport) {
    log::info!(
        "visited {} files: {} copied, {} skipped, {} failed",
        report.visited,
        report.copied,
        report.skipped,
        report.failures.len()
    );
    for failure in &report.failures {
        log::warn!("  failed: {}", failure.path().to_string_lossy());
    }
}

#[derive(Debug, Error)]
enum RunError {
    #[error("{0:#}")]
    Config(anyhow::Error),

    #[error(transparent)]
    Walk(#[from] WalkError),
}

impl RunError {
    fn exit_code(&self) -> u8 {
        match self {
            RunError::Config(_) | RunError::Walk(WalkError::NotADirectory(_)) => 2,
            RunError::Walk(WalkError::Tag(_)) => 1,
        }
    }
}

fn execute(cli: &Cli) -> Result<TreeReport, RunError> {
    let cfg = cli.resolve_config().map_err(RunError::Config)?;

    init_logger(cfg.log_level.unwrap_or(log::LevelFilter::Info));

    let report = walk::process_tree(&cli.root_directory, &cfg)?;
    log_summary(&report);
    Ok(report)
}

/// Entrypoint for CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
