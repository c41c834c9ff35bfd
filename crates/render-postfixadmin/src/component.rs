//! The PostfixAdmin component

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use render_core::ManagedFile;
use render_fs::{FileMode, NormalizedPath, io};
use render_template::{Template, ValueTree};

use crate::password::PasswordHasher;
use crate::settings::PostfixAdminSettings;
use crate::{Error, Result};

/// The built-in `config.local.php` template.
pub const CONFIG_TEMPLATE: &str = include_str!("../templates/config.local.php");

const TEMPLATE_NAME: &str = "postfixadmin/config.local.php";

static SETUP_PASSWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\$CONF\['setup_password'\]\s*=\s*'((?:[^'\\]|\\.)*)';")
        .expect("Invalid setup_password regex")
});

/// Escape a value for a single-quoted PHP string.
fn php_quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn php_unquote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next @ ('\\' | '\'')) => out.push(next),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// The setup password hash in an already rendered `config.local.php`.
fn existing_setup_password(rendered: &str) -> Option<String> {
    SETUP_PASSWORD_REGEX
        .captures(rendered)
        .and_then(|caps| caps.get(1))
        .map(|m| php_unquote(m.as_str()))
        .filter(|hash| !hash.is_empty())
}

/// Renders PostfixAdmin's `config.local.php` from settings.
#[derive(Debug, Clone)]
pub struct PostfixAdmin {
    settings: PostfixAdminSettings,
}

impl PostfixAdmin {
    pub fn new(settings: PostfixAdminSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PostfixAdminSettings {
        &self.settings
    }

    /// Resolve the setup password hash.
    ///
    /// A pre-hashed password wins. Otherwise the hash found in `current`
    /// (the target's present content) is reused when it still verifies, so
    /// re-rendering unchanged settings produces identical output; a fresh
    /// hash is generated only when it does not.
    pub fn setup_password_hash(
        &self,
        hasher: &dyn PasswordHasher,
        current: Option<&str>,
    ) -> Result<String> {
        if let Some(encrypted) = &self.settings.admin_password_encrypted {
            return Ok(encrypted.clone());
        }
        let password = self
            .settings
            .admin_password
            .as_deref()
            .ok_or(Error::MissingAdminPassword)?;

        if let Some(existing) = current.and_then(existing_setup_password) {
            if hasher.verify(&existing, password)? {
                tracing::debug!("reusing setup password hash from current file");
                return Ok(existing);
            }
            tracing::info!("setup password changed, generating a new hash");
        }

        hasher.hash(password)
    }

    /// The `component.*` value tree for the built-in template.
    ///
    /// String values are escaped for the single-quoted PHP strings they
    /// land in.
    pub fn value_tree(&self, hasher: &dyn PasswordHasher, current: Option<&str>) -> Result<ValueTree> {
        let db = &self.settings.db;
        let db_address = db.address()?;
        let postfix = self.settings.postfix_address()?;
        let hash = self.setup_password_hash(hasher, current)?;

        Ok(ValueTree::from_value(json!({
            "component": {
                "admin_password_encrypted": php_quote(&hash),
                "db": {
                    "dbms": php_quote(&db.dbms),
                    "address": {"connect": {
                        "host": php_quote(&db_address.connect.host),
                        "port": db_address.connect.port,
                    }},
                    "username": php_quote(&db.username),
                    "password": php_quote(&db.password),
                    "database": php_quote(&db.database),
                },
                "postfix": {"connect": {
                    "host": php_quote(&postfix.connect.host),
                    "port": postfix.connect.port,
                }},
            }
        })))
    }

    /// Render the built-in template against `current` target content.
    pub fn render(&self, hasher: &dyn PasswordHasher, current: Option<&str>) -> Result<String> {
        let template = Template::parse(TEMPLATE_NAME, CONFIG_TEMPLATE)?;
        let tree = self.value_tree(hasher, current)?;
        Ok(template.render(&tree)?.text)
    }

    /// Render for `target`, reusing the hash in the file already there.
    pub fn managed_file(
        &self,
        target: NormalizedPath,
        mode: FileMode,
        hasher: &dyn PasswordHasher,
    ) -> Result<ManagedFile> {
        let current = io::read_optional_lossy(&target)?;
        let content = self.render(hasher, current.as_deref())?;
        Ok(ManagedFile::new(TEMPLATE_NAME, target, content, mode))
    }
}
