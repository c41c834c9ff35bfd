//! Error types for render-template

/// Result type for render-template operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or rendering templates
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse template {template} at line {line}, column {column}: {message}")]
    TemplateParse {
        template: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unresolved placeholder(s) in {template}: {}", .paths.join(", "))]
    UnresolvedPlaceholder { template: String, paths: Vec<String> },

    #[error("Placeholder {path} in {template} resolves to a {kind}, expected a scalar")]
    NonScalarValue {
        template: String,
        path: String,
        kind: &'static str,
    },

    #[error("Invalid placeholder path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid override '{input}': expected path=value")]
    InvalidOverride { input: String },

    #[error("Cannot set {path}: {reason}")]
    PathSetFailed { path: String, reason: String },

    #[error(transparent)]
    Fs(#[from] render_fs::Error),
}
