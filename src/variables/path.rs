//! Path navigation into JSON values.
//!
//! Chain variables address into saved response bodies with a small path
//! grammar: dot-separated fields, each optionally suffixed with a bracket
//! index (`items[0]`), or a bare bracket index (`[0]`). Navigation returns
//! `None` for anything that does not resolve - a missing field, an
//! out-of-range index, or indexing into a non-array - so "not found" is a
//! representable result rather than an error.

use serde_json::Value as JsonValue;

/// One segment of a navigation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object field access (e.g. `user`, `content-type`).
    Field(String),

    /// Array index access (e.g. `[0]`).
    Index(usize),
}

/// Parses a path into segments.
///
/// # Examples
///
/// - `user.name` → `[Field("user"), Field("name")]`
/// - `items[0].id` → `[Field("items"), Index(0), Field("id")]`
/// - `[2]` → `[Index(2)]`
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Field(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Field(std::mem::take(&mut current)));
                }

                let mut index_str = String::new();
                for next_ch in chars.by_ref() {
                    if next_ch == ']' {
                        break;
                    }
                    index_str.push(next_ch);
                }

                if let Ok(index) = index_str.trim().parse::<usize>() {
                    segments.push(PathSegment::Index(index));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(PathSegment::Field(current));
    }

    segments
}

/// Navigates a JSON value along a path.
///
/// # Returns
///
/// The addressed value, or `None` when any step does not resolve.
///
/// # Examples
///
/// ```
/// use httpfile::variables::path::navigate;
/// use serde_json::json;
///
/// let value = json!({"user": {"id": 42}, "tags": ["a", "b"]});
/// assert_eq!(navigate(&value, "user.id"), Some(&json!(42)));
/// assert_eq!(navigate(&value, "tags[1]"), Some(&json!("b")));
/// assert_eq!(navigate(&value, "user.missing"), None);
/// assert_eq!(navigate(&value, "tags[9]"), None);
/// ```
pub fn navigate<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let mut current = value;

    for segment in parse_path(path) {
        current = match segment {
            PathSegment::Field(name) => current.get(name.as_str())?,
            PathSegment::Index(index) => current.get(index)?,
        };
    }

    Some(current)
}

/// Converts a resolved JSON value to its substitution text.
///
/// Strings are used bare (no surrounding quotes); other scalars use their
/// canonical form; objects and arrays serialize to compact JSON.
pub fn value_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => "null".to_string(),
        JsonValue::Array(_) | JsonValue::Object(_) => value.to_string(),
    }
}
