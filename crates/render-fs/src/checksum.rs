//! Content checksums
//!
//! Renderings are identified by `sha256:<hex>` of their text.

use sha2::{Digest, Sha256};

/// `sha256:<hex>` of `content`.
pub fn compute_content_checksum(content: &str) -> String {
    format!("sha256:{:x}", Sha256::digest(content.as_bytes()))
}
