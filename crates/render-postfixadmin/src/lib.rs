//! PostfixAdmin `config.local.php` rendering
//!
//! Builds the `component.*` value tree for the built-in PostfixAdmin
//! template from a settings file: database connection, SMTP relay and the
//! setup password, hashed with `doveadm`.

pub mod address;
pub mod component;
pub mod error;
pub mod password;
pub mod settings;

pub use address::{Address, Endpoint};
pub use component::{CONFIG_TEMPLATE, PostfixAdmin};
pub use error::{Error, Result};
pub use password::{Doveadm, PasswordHasher};
pub use settings::{DatabaseSettings, PostfixAdminSettings};
