//! Error types for render-postfixadmin

/// Result type for PostfixAdmin rendering
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing the PostfixAdmin configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("Neither admin_password nor admin_password_encrypted is set")]
    MissingAdminPassword,

    #[error("Failed to run {program}: {source}")]
    HashCommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// doveadm exited with non-zero status while hashing
    #[error("Password hashing failed (exit code {code}): {stderr}")]
    HashCommandFailed { code: i32, stderr: String },

    #[error("Password hashing produced no output")]
    EmptyHash,

    #[error(transparent)]
    Fs(#[from] render_fs::Error),

    #[error(transparent)]
    Template(#[from] render_template::Error),
}
