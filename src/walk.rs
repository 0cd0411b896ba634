//! Module to walk a directory tree and copy description frames into comments

use walkdir::WalkDir;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    config::{Config, ErrorPolicy},
    tags::{self, CopyOutcome, error::TagError},
};

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("{} is not directory.", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Tag(#[from] TagError),
}

/// Counters of a single tree run
#[derive(Debug, Default)]
pub struct TreeReport {
    pub visited: usize,
    pub copied: usize,
    pub skipped: usize,
    /// per-file failures tolerated with [`ErrorPolicy::Continue`]
    pub failures: Vec<TagError>,
}

impl TreeReport {
    fn record(&mut self, outcome: CopyOutcome) {
        self.visited += 1;
        if outcome.is_copied() {
            self.copied += 1;
        } else {
            self.skipped += 1;
        }
    }
}

pub fn require_directory(path: &Path) -> Result<(), WalkError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(WalkError::NotADirectory(path.to_path_buf()))
    }
}

/// Case-insensitive `.mp3` suffix check on the file name
pub fn is_mp3_file(path: &Path) -> bool {
    path.file_name().is_some_and(|name| {
        name.as_encoded_bytes()
            .to_ascii_lowercase()
            .ends_with(b".mp3")
    })
}

/// Recursively finds all MP3 files under `root` and copies their description into a comment.
///
/// Fails before touching anything if `root` is not a directory.
pub fn process_tree(root: &Path, config: &Config) -> Result<TreeReport, WalkError> {
    require_directory(root)?;

    let root_str = root.to_string_lossy();
    let mut report = TreeReport::default();

    let paths = WalkDir::new(root)
        .follow_links(config.follow_symlinks)
        .into_iter()
        .filter_map(|e| match e {
            Ok(e) => Some(e),
            Err(err) => {
                log::warn!("error while scanning dir {root_str}, skipping an entry: {err}");
                None
            }
        })
        .map(|e| e.into_path())
        .filter(|path| path.is_file() && is_mp3_file(path));

    for path in paths {
        match tags::copy_description_to_comment(&path) {
            Ok(outcome) => report.record(outcome),
            Err(err) => match config.on_error {
                ErrorPolicy::Abort => return Err(err.into()),
                ErrorPolicy::Continue => {
                    log::warn!("{err}, continuing");
                    report.visited += 1;
                    report.failures.push(err);
                }
            },
        }
    }

    Ok(report)
}
