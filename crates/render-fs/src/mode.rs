//! Permission modes for written files

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Unix permission bits applied to a rendered file.
///
/// Rendered configuration usually carries credentials, so the default is
/// owner read/write only (`0600`). On non-unix platforms modes are accepted
/// but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileMode(u32);

impl FileMode {
    /// Owner read/write only.
    pub const OWNER_ONLY: FileMode = FileMode(0o600);

    /// Create a mode from permission bits. Bits above `0o7777` are dropped.
    pub fn new(bits: u32) -> Self {
        Self(bits & 0o7777)
    }

    /// The raw permission bits.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Read the current mode of a file, `None` when it does not exist.
    #[cfg(unix)]
    pub fn of(path: &Path) -> Result<Option<FileMode>> {
        use std::os::unix::fs::PermissionsExt;

        match std::fs::metadata(path) {
            Ok(meta) => Ok(Some(FileMode::new(meta.permissions().mode()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Modes are not tracked on this platform.
    #[cfg(not(unix))]
    pub fn of(path: &Path) -> Result<Option<FileMode>> {
        let _ = path;
        Ok(None)
    }

    /// Apply this mode to an existing file.
    #[cfg(unix)]
    pub fn apply(self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(path, std::fs::Permissions::from_mode(self.0))
            .map_err(|e| Error::io(path, e))
    }

    #[cfg(not(unix))]
    pub fn apply(self, path: &Path) -> Result<()> {
        let _ = path;
        Ok(())
    }
}

impl Default for FileMode {
    fn default() -> Self {
        Self::OWNER_ONLY
    }
}

impl FromStr for FileMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0o").unwrap_or(trimmed);
        if digits.is_empty() || digits.len() > 4 {
            return Err(Error::InvalidMode { value: s.to_string() });
        }
        u32::from_str_radix(digits, 8)
            .map(FileMode::new)
            .map_err(|_| Error::InvalidMode { value: s.to_string() })
    }
}

impl TryFrom<String> for FileMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FileMode> for String {
    fn from(mode: FileMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("600", 0o600)]
    #[case("0600", 0o600)]
    #[case("0o640", 0o640)]
    #[case(" 644 ", 0o644)]
    fn parses_octal_strings(#[case] input: &str, #[case] bits: u32) {
        assert_eq!(input.parse::<FileMode>().unwrap().bits(), bits);
    }

    #[rstest]
    #[case("")]
    #[case("rw-------")]
    #[case("800")]
    #[case("10600")]
    fn rejects_invalid_modes(#[case] input: &str) {
        assert!(matches!(
            input.parse::<FileMode>(),
            Err(Error::InvalidMode { .. })
        ));
    }

    #[test]
    fn default_is_owner_only() {
        assert_eq!(FileMode::default().to_string(), "0600");
    }
}
