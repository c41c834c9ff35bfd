//! Shared test utilities for the config renderer workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`] - sample templates and values files
//! - [`deployment`] - [`TestDeployment`] builder for on-disk scenarios

pub mod deployment;
pub mod fixtures;

pub use deployment::TestDeployment;
