use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("failed to read ID3 tag from {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("failed to write ID3 tag to {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },
}

impl TagError {
    pub fn path(&self) -> &Path {
        match self {
            TagError::Load { path, .. } | TagError::Save { path, .. } => path,
        }
    }
}
