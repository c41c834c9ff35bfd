//! Placeholder paths and value tree traversal
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `component.db.address.connect.host`
//! - Array indexing: `servers[0].host`
//!
//! Keys consist of ASCII letters, digits, `_` and `-`.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::{Error, Result};

/// A segment of a path - either a key or an array index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A key in a mapping (e.g., "db" in "component.db")
    Key(String),
    /// An index in a sequence (e.g., 0 in `servers[0]`)
    Index(usize),
}

/// A parsed placeholder reference such as `component.db.username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceholderPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl PlaceholderPath {
    /// Parse a dotted path.
    ///
    /// ```
    /// use render_template::{PathSegment, PlaceholderPath};
    ///
    /// let path = PlaceholderPath::parse("servers[0].host").unwrap();
    /// assert_eq!(path.segments(), &[
    ///     PathSegment::Key("servers".to_string()),
    ///     PathSegment::Index(0),
    ///     PathSegment::Key("host".to_string()),
    /// ]);
    /// assert!(PlaceholderPath::parse("db..host").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPath {
            path: input.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut current_key = String::new();
        // True right after a '.', or at the start: a key must follow
        let mut expect_key = true;
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if expect_key {
                        return Err(invalid("empty key"));
                    }
                    if !current_key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                    }
                    expect_key = true;
                }
                '[' => {
                    if !current_key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                    } else if segments.is_empty() || expect_key {
                        return Err(invalid("index without a preceding key"));
                    }
                    let mut index_str = String::new();
                    let mut closed = false;
                    for ch in chars.by_ref() {
                        if ch == ']' {
                            closed = true;
                            break;
                        }
                        index_str.push(ch);
                    }
                    if !closed {
                        return Err(invalid("unterminated index"));
                    }
                    let index = index_str
                        .parse::<usize>()
                        .map_err(|_| invalid("index is not a non-negative integer"))?;
                    segments.push(PathSegment::Index(index));
                    expect_key = false;
                    if let Some(&next) = chars.peek() {
                        if next != '.' && next != '[' {
                            return Err(invalid("expected '.' or '[' after an index"));
                        }
                    }
                }
                c if c.is_ascii_alphanumeric() || c == '_' || c == '-' => {
                    current_key.push(c);
                    expect_key = false;
                }
                other => {
                    return Err(invalid(&format!("unexpected character '{}'", other)));
                }
            }
        }

        if expect_key {
            return Err(invalid(if segments.is_empty() { "empty path" } else { "trailing '.'" }));
        }
        if !current_key.is_empty() {
            segments.push(PathSegment::Key(current_key));
        }

        Ok(Self {
            raw: input.to_string(),
            segments,
        })
    }

    /// The path as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl FromStr for PlaceholderPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PlaceholderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Get a value at the given path.
///
/// Returns `None` if any segment is missing.
pub fn get_at_path<'a>(value: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    segments.iter().try_fold(value, |current, segment| match segment {
        PathSegment::Key(key) => current.get(key),
        PathSegment::Index(idx) => current.get(*idx),
    })
}

/// Set a value at the given path, creating intermediate mappings.
///
/// Sequences are never grown: an index must already exist. A non-mapping
/// value standing where a mapping is needed is an error rather than being
/// silently replaced.
pub fn set_at_path(value: &mut Value, path: &PlaceholderPath, new_value: Value) -> Result<()> {
    let fail = |reason: String| Error::PathSetFailed {
        path: path.to_string(),
        reason,
    };

    let Some((last, parents)) = path.segments().split_last() else {
        *value = new_value;
        return Ok(());
    };

    let mut current = value;
    for (position, segment) in parents.iter().enumerate() {
        current = match segment {
            PathSegment::Key(key) => {
                if current.is_null() {
                    *current = Value::Object(Map::new());
                }
                let Value::Object(map) = current else {
                    return Err(fail(format!("segment {} is not a mapping", position)));
                };
                map.entry(key.clone()).or_insert_with(|| Value::Object(Map::new()))
            }
            PathSegment::Index(idx) => current
                .as_array_mut()
                .and_then(|arr| arr.get_mut(*idx))
                .ok_or_else(|| fail(format!("index {} does not exist", idx)))?,
        };
    }

    match last {
        PathSegment::Key(key) => {
            if current.is_null() {
                *current = Value::Object(Map::new());
            }
            match current {
                Value::Object(map) => {
                    map.insert(key.clone(), new_value);
                    Ok(())
                }
                _ => Err(fail(format!("parent of '{}' is not a mapping", key))),
            }
        }
        PathSegment::Index(idx) => match current.as_array_mut().and_then(|arr| arr.get_mut(*idx)) {
            Some(slot) => {
                *slot = new_value;
                Ok(())
            }
            None => Err(fail(format!("index {} does not exist", idx))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> PlaceholderPath {
        PlaceholderPath::parse(s).unwrap()
    }

    #[test]
    fn test_parse_path_dotted() {
        assert_eq!(
            path("component.db.username").segments(),
            &[
                PathSegment::Key("component".to_string()),
                PathSegment::Key("db".to_string()),
                PathSegment::Key("username".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_path_nested_indices() {
        assert_eq!(
            path("matrix[1][2]").segments(),
            &[
                PathSegment::Key("matrix".to_string()),
                PathSegment::Index(1),
                PathSegment::Index(2),
            ]
        );
    }

    #[test]
    fn test_parse_path_rejects_malformed() {
        for bad in ["", ".", "a.", ".a", "a..b", "a b", "[0]", "a[x]", "a[0", "a[0]b", "a.[0]"] {
            assert!(PlaceholderPath::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_get_at_path() {
        let value = json!({"component": {"db": {"servers": [{"host": "a"}, {"host": "b"}]}}});
        assert_eq!(
            get_at_path(&value, path("component.db.servers[1].host").segments()),
            Some(&json!("b"))
        );
        assert_eq!(get_at_path(&value, path("component.missing").segments()), None);
        assert_eq!(get_at_path(&value, path("component.db.servers[5]").segments()), None);
    }

    #[test]
    fn test_set_at_path_creates_intermediates() {
        let mut value = json!({});
        set_at_path(&mut value, &path("component.db.password"), json!("tiger")).unwrap();
        assert_eq!(value, json!({"component": {"db": {"password": "tiger"}}}));
    }

    #[test]
    fn test_set_at_path_refuses_to_replace_scalars() {
        let mut value = json!({"component": "flat"});
        assert!(set_at_path(&mut value, &path("component.db"), json!("x")).is_err());
        assert_eq!(value, json!({"component": "flat"}));
    }

    #[test]
    fn test_set_at_path_existing_index() {
        let mut value = json!({"hosts": ["a", "b"]});
        set_at_path(&mut value, &path("hosts[1]"), json!("c")).unwrap();
        assert_eq!(value, json!({"hosts": ["a", "c"]}));
        assert!(set_at_path(&mut value, &path("hosts[2]"), json!("d")).is_err());
    }
}
