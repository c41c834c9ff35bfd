//! PostfixAdmin settings file
//!
//! ```toml
//! admin_password = "secret"
//! postfix = "mail.example.com"
//!
//! [db]
//! address = "db.example.com"
//! password = "tiger"
//! ```

use serde::{Deserialize, Serialize};

use crate::address::{Address, POSTGRES_PORT, SMTP_PORT};
use crate::Result;

fn default_dbms() -> String {
    "pgsql".to_string()
}

fn default_db_name() -> String {
    "postfix".to_string()
}

fn default_doveadm() -> String {
    "doveadm".to_string()
}

/// Database connection used by PostfixAdmin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSettings {
    /// `host[:port]`, port defaults to 5432
    pub address: String,
    pub password: String,
    #[serde(default = "default_dbms")]
    pub dbms: String,
    #[serde(default = "default_db_name")]
    pub username: String,
    #[serde(default = "default_db_name")]
    pub database: String,
}

impl DatabaseSettings {
    pub fn address(&self) -> Result<Address> {
        Address::parse(&self.address, POSTGRES_PORT)
    }
}

/// Settings for rendering `config.local.php`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostfixAdminSettings {
    /// Plain setup password, hashed with doveadm
    #[serde(default)]
    pub admin_password: Option<String>,

    /// Pre-hashed setup password, used verbatim
    #[serde(default)]
    pub admin_password_encrypted: Option<String>,

    /// SMTP relay `host[:port]`, port defaults to 25
    pub postfix: String,

    pub db: DatabaseSettings,

    /// doveadm binary used for hashing
    #[serde(default = "default_doveadm")]
    pub doveadm: String,
}

impl PostfixAdminSettings {
    pub fn postfix_address(&self) -> Result<Address> {
        Address::parse(&self.postfix, SMTP_PORT)
    }
}
