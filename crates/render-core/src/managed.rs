//! Rendered files bound to their targets
//!
//! A managed file follows a verify/update cycle: `verify` compares the
//! target on disk with the rendering, `update` writes it when they differ.

use serde::{Deserialize, Serialize};

use render_fs::{FileMode, NormalizedPath, checksum, io};
use render_template::TextDiff;

use crate::Result;

/// State of a target relative to its rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Content and mode match
    UpToDate,
    /// Target does not exist
    Missing,
    /// Content differs
    ContentDrift,
    /// Content matches but permissions differ
    ModeDrift,
}

impl FileStatus {
    pub fn needs_update(self) -> bool {
        self != FileStatus::UpToDate
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FileStatus::UpToDate => "up to date",
            FileStatus::Missing => "missing",
            FileStatus::ContentDrift => "content differs",
            FileStatus::ModeDrift => "mode differs",
        };
        f.write_str(text)
    }
}

/// A rendering and the file it is meant to land in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedFile {
    /// Name of the template this was rendered from
    pub source: String,
    pub target: NormalizedPath,
    pub content: String,
    pub mode: FileMode,
}

impl ManagedFile {
    pub fn new(
        source: impl Into<String>,
        target: NormalizedPath,
        content: String,
        mode: FileMode,
    ) -> Self {
        Self {
            source: source.into(),
            target,
            content,
            mode,
        }
    }

    /// Checksum of the rendered content.
    pub fn checksum(&self) -> String {
        checksum::compute_content_checksum(&self.content)
    }

    /// Compare the target on disk with the rendering.
    pub fn verify(&self) -> Result<FileStatus> {
        let Some(current) = io::read_optional(&self.target)? else {
            return Ok(FileStatus::Missing);
        };
        if current != self.content.as_bytes() {
            return Ok(FileStatus::ContentDrift);
        }
        match FileMode::of(&self.target.to_native())? {
            Some(mode) if mode != self.mode => Ok(FileStatus::ModeDrift),
            _ => Ok(FileStatus::UpToDate),
        }
    }

    /// Diff the current target content (empty if missing) against the rendering.
    pub fn diff(&self) -> Result<TextDiff> {
        let current = io::read_optional_lossy(&self.target)?.unwrap_or_default();
        let label = self.target.as_str();
        Ok(TextDiff::compute(
            &current,
            &self.content,
            &format!("{} (current)", label),
            &format!("{} (rendered)", label),
        ))
    }

    /// Write the rendering to the target if it is not up to date.
    ///
    /// Returns the status observed before writing.
    pub fn update(&self) -> Result<FileStatus> {
        let status = self.verify()?;
        match status {
            FileStatus::UpToDate => {
                tracing::debug!(path = %self.target, "already up to date");
            }
            FileStatus::ModeDrift => {
                self.mode.apply(&self.target.to_native())?;
                tracing::info!(path = %self.target, mode = %self.mode, "fixed file mode");
            }
            FileStatus::Missing | FileStatus::ContentDrift => {
                io::write_atomic(&self.target, self.content.as_bytes(), self.mode)?;
                tracing::info!(path = %self.target, %status, "wrote rendered file");
            }
        }
        Ok(status)
    }
}
