//! Line diffs between a file on disk and a fresh rendering

use serde::Serialize;
use similar::ChangeTag;

/// A changed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineChange {
    /// Present only in the new rendering
    Added { line: String },
    /// Present only in the current file
    Removed { line: String },
}

/// Result of comparing current content with a rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDiff {
    /// Are the two texts byte-identical?
    pub is_equivalent: bool,
    /// Similarity ratio (0.0 to 1.0)
    pub similarity: f64,
    pub changes: Vec<LineChange>,
    /// Unified diff, empty when equivalent
    pub unified: String,
}

impl TextDiff {
    /// Compare `old` (current file) with `new` (rendering).
    ///
    /// `old_name`/`new_name` label the unified diff headers.
    pub fn compute(old: &str, new: &str, old_name: &str, new_name: &str) -> Self {
        if old == new {
            return Self {
                is_equivalent: true,
                similarity: 1.0,
                changes: Vec::new(),
                unified: String::new(),
            };
        }

        let diff = similar::TextDiff::from_lines(old, new);
        let changes = diff
            .iter_all_changes()
            .filter_map(|change| {
                let line = change.value().trim_end_matches('\n').to_string();
                match change.tag() {
                    ChangeTag::Insert => Some(LineChange::Added { line }),
                    ChangeTag::Delete => Some(LineChange::Removed { line }),
                    ChangeTag::Equal => None,
                }
            })
            .collect();
        let unified = diff
            .unified_diff()
            .context_radius(3)
            .header(old_name, new_name)
            .to_string();

        Self {
            is_equivalent: false,
            similarity: diff.ratio() as f64,
            changes,
            unified,
        }
    }
}
