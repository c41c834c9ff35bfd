//! Error types for render-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from render-core
    #[error(transparent)]
    Core(#[from] render_core::Error),

    /// Error from render-fs
    #[error(transparent)]
    Fs(#[from] render_fs::Error),

    /// Error from render-template
    #[error(transparent)]
    Template(#[from] render_template::Error),

    /// Error from render-postfixadmin
    #[error(transparent)]
    PostfixAdmin(#[from] render_postfixadmin::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
