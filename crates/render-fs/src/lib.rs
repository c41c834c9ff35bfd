//! Filesystem primitives for the config renderer
//!
//! Provides normalized paths, atomic writes that publish files with a
//! fixed permission mode, content checksums and format-agnostic loading
//! of structured files (values, settings, manifests).

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod mode;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use mode::FileMode;
pub use path::NormalizedPath;
