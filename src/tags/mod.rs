//! Module to read and update the comment/description frames of one MP3 file

use std::path::{Path, PathBuf};

use id3::frame::{Comment, Content};
use id3::{Encoding, Frame, Tag, TagLike, Version};

use crate::tags::error::TagError;

pub mod error;

const COMMENT_FRAME_ID: &str = "COMM";
const DESCRIPTION_KEY: &str = "DESCRIPTION";

/// Result of processing a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// File already has at least one comment frame, left untouched
    CommentPresent,
    /// No comment, but also no (non-empty) description to copy
    NoDescription,
    /// A new comment frame was added and the file was saved
    Copied,
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied)
    }
}

/// COMM frame as written by this tool
#[derive(Debug, Clone, PartialEq)]
pub struct CommentFrame {
    pub encoding: Encoding,
    pub lang: String,
    pub description: String,
    pub text: Vec<String>,
}

impl CommentFrame {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            encoding: Encoding::UTF8,
            lang: "eng".to_string(),
            description: String::new(),
            text: vec![text.into()],
        }
    }

    fn into_frame(self) -> Frame {
        // only the first body value is written
        let text = self.text.into_iter().next().unwrap_or_default();
        Frame::with_content(
            COMMENT_FRAME_ID,
            Content::Comment(Comment {
                lang: self.lang,
                description: self.description,
                text,
            }),
        )
        .set_encoding(Some(self.encoding))
    }
}

/// Tag frames of one file, loaded fresh for every file.
#[derive(Debug)]
pub struct MetadataContainer {
    path: PathBuf,
    tag: Tag,
}

impl MetadataContainer {
    pub fn load(path: &Path) -> Result<Self, TagError> {
        let tag = Tag::read_from_path(path).map_err(|source| TagError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            tag,
        })
    }

    /// True if any COMM frame exists, whatever its language or description key
    pub fn has_comment_frame(&self) -> bool {
        self.tag.comments().next().is_some()
    }

    /// First value of the first `TXXX:DESCRIPTION` frame.
    ///
    /// ID3v2.4 stores multiple values NUL-separated, only the first one is returned.
    pub fn description_text(&self) -> Option<String> {
        self.tag
            .extended_texts()
            .find(|et| et.description == DESCRIPTION_KEY)
            .map(|et| {
                et.value
                    .split('\0')
                    .next()
                    .unwrap_or_default()
                    .to_string()
            })
    }

    /// Adds `frame` and writes the whole tag back to the source file
    pub fn apply_and_persist(mut self, frame: CommentFrame) -> Result<(), TagError> {
        self.tag.add_frame(frame.into_frame());
        self.tag
            .write_to_path(&self.path, Version::Id3v24)
            .map_err(|source| TagError::Save {
                path: self.path,
                source,
            })
    }
}

/// Copies the description text into a new comment frame, unless the file already has a comment.
///
/// Running it a second time on the same file is a no-op.
pub fn copy_description_to_comment(path: &Path) -> Result<CopyOutcome, TagError> {
    log::debug!("Processing \"{}\"", path.to_string_lossy());

    let container = MetadataContainer::load(path)?;

    if container.has_comment_frame() {
        log::debug!("\tComment tag is available. Skip.");
        return Ok(CopyOutcome::CommentPresent);
    }

    let text = match container.description_text() {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(CopyOutcome::NoDescription),
    };

    container.apply_and_persist(CommentFrame::from_text(text))?;
    log::debug!("\tCopied text from description to comment tag.");

    Ok(CopyOutcome::Copied)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use id3::frame::{Comment, ExtendedText};
    use id3::{Tag, TagLike, Version};

    // some bytes standing in for the audio stream
    const FAKE_AUDIO: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00];

    /// Writes a tagged fake MP3 with the given description and comment frames
    pub fn write_mp3(
        path: &Path,
        description: Option<&str>,
        comment: Option<&str>,
    ) -> anyhow::Result<()> {
        std::fs::write(path, FAKE_AUDIO)?;

        let mut tag = Tag::new();
        tag.set_title("fixture");
        if let Some(value) = description {
            tag.add_frame(ExtendedText {
                description: "DESCRIPTION".to_string(),
                value: value.to_string(),
            });
        }
        if let Some(text) = comment {
            tag.add_frame(Comment {
                lang: "eng".to_string(),
                description: String::new(),
                text: text.to_string(),
            });
        }
        tag.write_to_path(path, Version::Id3v24)?;
        Ok(())
    }

    /// Comment bodies currently stored in the file
    pub fn read_comments(path: &Path) -> anyhow::Result<Vec<Comment>> {
        let tag = Tag::read_from_path(path)?;
        Ok(tag.comments().cloned().collect())
    }
}
