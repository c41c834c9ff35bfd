//! Error types for render-core

use std::path::PathBuf;

/// Result type for render-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in render-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Manifest file not found at expected path
    #[error("Manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// Manifest parsed but is not usable
    #[error("Invalid manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// A rendering needs a target to be verified or written
    #[error("No target given for template {template}")]
    NoTarget { template: String },

    /// Filesystem error from render-fs
    #[error(transparent)]
    Fs(#[from] render_fs::Error),

    /// Template or value tree error from render-template
    #[error(transparent)]
    Template(#[from] render_template::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
