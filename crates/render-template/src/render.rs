//! Strict rendering of templates against value trees

use render_fs::checksum::compute_content_checksum;

use crate::template::{Segment, Template};
use crate::values::{self, ValueTree};
use crate::{Error, Result};

/// A fully substituted template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Rendered text, free of placeholder tokens
    pub text: String,
    /// Checksum of `text` in `sha256:<hex>` form
    pub checksum: String,
}

/// Render a template, substituting each placeholder with its scalar value.
///
/// All placeholders are resolved before any output is assembled. Every
/// missing path is reported together, in first-occurrence order.
pub fn render(template: &Template, tree: &ValueTree) -> Result<Rendered> {
    let mut unresolved: Vec<String> = Vec::new();
    let mut resolved: Vec<String> = Vec::new();

    for segment in template.segments() {
        let Segment::Placeholder(path) = segment else {
            continue;
        };
        match tree.lookup(path) {
            Some(value) => match values::scalar_text(value) {
                Some(text) => resolved.push(text),
                None => {
                    return Err(Error::NonScalarValue {
                        template: template.name().to_string(),
                        path: path.to_string(),
                        kind: values::kind_name(value),
                    });
                }
            },
            None => {
                if !unresolved.iter().any(|p| p == path.as_str()) {
                    unresolved.push(path.to_string());
                }
            }
        }
    }

    if !unresolved.is_empty() {
        tracing::debug!(template = template.name(), missing = ?unresolved, "render failed");
        return Err(Error::UnresolvedPlaceholder {
            template: template.name().to_string(),
            paths: unresolved,
        });
    }

    let mut text = String::new();
    let mut substitutions = resolved.into_iter();
    for segment in template.segments() {
        match segment {
            Segment::Literal(literal) => text.push_str(literal),
            Segment::Placeholder(_) => {
                if let Some(value) = substitutions.next() {
                    text.push_str(&value);
                }
            }
        }
    }

    let checksum = compute_content_checksum(&text);
    tracing::debug!(template = template.name(), %checksum, "rendered template");
    Ok(Rendered { text, checksum })
}

impl Template {
    /// Render this template. See [`render`].
    pub fn render(&self, tree: &ValueTree) -> Result<Rendered> {
        render(self, tree)
    }
}
