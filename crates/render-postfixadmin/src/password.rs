//! Setup password hashing via `doveadm pw`

use std::path::PathBuf;
use std::process::Command;

use crate::{Error, Result};

/// Default hashing scheme, matching `$CONF['encrypt'] = 'dovecot:SHA256-CRYPT'`.
pub const DEFAULT_SCHEME: &str = "SHA256-CRYPT";

/// Hashes and verifies the PostfixAdmin setup password.
pub trait PasswordHasher {
    /// Produce a new (salted) hash for `password`.
    fn hash(&self, password: &str) -> Result<String>;

    /// Whether `hash` was produced from `password`.
    fn verify(&self, hash: &str, password: &str) -> Result<bool>;
}

/// Runs the external `doveadm pw` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doveadm {
    pub program: PathBuf,
    pub scheme: String,
}

impl Default for Doveadm {
    fn default() -> Self {
        Self {
            program: PathBuf::from("doveadm"),
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl Doveadm {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    fn run(&self, args: &[&str]) -> Result<std::process::Output> {
        Command::new(&self.program)
            .arg("pw")
            .args(args)
            .output()
            .map_err(|source| Error::HashCommandSpawn {
                program: self.program.display().to_string(),
                source,
            })
    }
}

impl PasswordHasher for Doveadm {
    fn hash(&self, password: &str) -> Result<String> {
        tracing::debug!(program = %self.program.display(), scheme = %self.scheme, "hashing setup password");
        let output = self.run(&["-s", &self.scheme, "-p", password])?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(Error::HashCommandFailed { code, stderr });
        }

        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if hash.is_empty() {
            return Err(Error::EmptyHash);
        }
        Ok(hash)
    }

    fn verify(&self, hash: &str, password: &str) -> Result<bool> {
        // doveadm exits non-zero when the password does not match
        let output = self.run(&["-t", hash, "-p", password])?;
        Ok(output.status.success())
    }
}
