//! Template parsing
//!
//! Splits text into literal runs and `{{path}}` placeholders. Whitespace
//! directly inside the braces is ignored, so `{{ db.host }}` and
//! `{{db.host}}` are the same placeholder.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::path::PlaceholderPath;
use crate::{Error, Result};

/// Matches a complete placeholder token and captures its inner text.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^{}]*)\}\}").expect("Invalid placeholder regex")
});

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied to the output unchanged
    Literal(String),
    /// A reference resolved against the value tree
    Placeholder(PlaceholderPath),
}

/// A parsed template: an ordered sequence of literal and placeholder segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text. `name` identifies the template in errors.
    ///
    /// Fails on an opening `{{` that does not form a valid placeholder:
    /// unterminated, empty, or with an invalid path inside.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let mut segments = Vec::new();
        let mut last_end = 0;

        for caps in PLACEHOLDER_REGEX.captures_iter(text) {
            let whole = caps.get(0).expect("group 0 always matches");
            let inner = caps.get(1).expect("group 1 always participates");

            push_literal(&name, text, last_end, whole.start(), &mut segments)?;

            let path = PlaceholderPath::parse(inner.as_str().trim()).map_err(|e| {
                let (line, column) = line_column(text, whole.start());
                Error::TemplateParse {
                    template: name.clone(),
                    line,
                    column,
                    message: match e {
                        Error::InvalidPath { path, reason } if path.is_empty() => {
                            format!("empty placeholder ({})", reason)
                        }
                        Error::InvalidPath { path, reason } => {
                            format!("invalid placeholder '{}': {}", path, reason)
                        }
                        other => other.to_string(),
                    },
                }
            })?;
            segments.push(Segment::Placeholder(path));
            last_end = whole.end();
        }

        push_literal(&name, text, last_end, text.len(), &mut segments)?;

        tracing::debug!(
            template = %name,
            segments = segments.len(),
            "parsed template"
        );
        Ok(Self { name, segments })
    }

    /// Name used to identify this template in errors and logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder paths in first-occurrence order, without duplicates.
    pub fn placeholders(&self) -> Vec<&PlaceholderPath> {
        let mut seen = HashSet::new();
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(path) => Some(path),
                Segment::Literal(_) => None,
            })
            .filter(|path| seen.insert(path.as_str()))
            .collect()
    }
}

/// Push `text[start..end]` as a literal, rejecting stray opening braces.
fn push_literal(
    name: &str,
    text: &str,
    start: usize,
    end: usize,
    segments: &mut Vec<Segment>,
) -> Result<()> {
    if start == end {
        return Ok(());
    }
    let literal = &text[start..end];
    if let Some(offset) = literal.find("{{") {
        let (line, column) = line_column(text, start + offset);
        return Err(Error::TemplateParse {
            template: name.to_string(),
            line,
            column,
            message: "unterminated placeholder".to_string(),
        });
    }
    segments.push(Segment::Literal(literal.to_string()));
    Ok(())
}

/// 1-based line and column (in characters) of a byte offset.
fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
