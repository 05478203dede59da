//! Pseudo-multipart body parser.
//!
//! Request documents describe multipart bodies inline as text: parts are
//! delimited with `--<boundary>` lines, carry either RFC-style headers
//! (`Content-Disposition: form-data; name="x"`) or a simplified `name: x`
//! syntax, and a content line starting with `<` references a file to be read
//! by the transport layer at send time.
//!
//! ```http
//! --boundary
//! Content-Disposition: form-data; name="file"; filename="a.pdf"
//! Content-Type: application/pdf
//!
//! < ./relative/path.pdf
//! --boundary--
//! ```

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Extracts the `name` attribute of a Content-Disposition header.
static NAME_ATTR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"name="([^"]+)""#).expect("Failed to compile name attr regex"));

/// Extracts the `filename` attribute of a Content-Disposition header.
static FILENAME_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"filename="([^"]+)""#).expect("Failed to compile filename attr regex")
});

/// Extracts the `boundary` attribute of a Content-Type header value.
static BOUNDARY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"boundary=([^;]+)").expect("Failed to compile boundary regex"));

/// Charset for generated boundary suffixes.
const BOUNDARY_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random suffix in a generated boundary.
const BOUNDARY_SUFFIX_LEN: usize = 13;

/// One field or file inside a multipart body.
///
/// Exactly one of `value` (literal text) or `file_path` (a reference for the
/// transport layer to read) is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipartPart {
    /// Form field name. Required; parts without one are dropped.
    pub name: String,

    /// Original file name to advertise for file parts.
    pub filename: Option<String>,

    /// Content type of this part, if declared.
    pub content_type: Option<String>,

    /// Literal text content.
    pub value: Option<String>,

    /// Path of a file to read externally (from a `< path` content line).
    pub file_path: Option<String>,
}

/// A parsed multipart body: the boundary plus its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipartBody {
    /// Boundary token (without the leading `--`).
    pub boundary: String,

    /// Parts in document order.
    pub parts: Vec<MultipartPart>,
}

/// Errors from multipart body parsing.
///
/// Individual malformed parts are dropped (and logged) rather than failing
/// the parse; only an empty net result is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartError {
    /// No usable parts were found in the body.
    NoParts,
}

impl fmt::Display for MultipartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultipartError::NoParts => write!(f, "No multipart parts found"),
        }
    }
}

impl std::error::Error for MultipartError {}

/// Parses a multipart body description into its parts.
///
/// The body is split on the literal `--<boundary>` token; the preamble before
/// the first boundary and the closing `--` segment are discarded. Parts
/// missing the required `name` are dropped with a logged error.
///
/// # Arguments
///
/// * `body` - The body text from a parsed request
/// * `boundary` - The boundary token, typically from
///   [`extract_boundary`]
///
/// # Examples
///
/// ```
/// use httpfile::multipart::parse;
///
/// let body = "--b\nContent-Disposition: form-data; name=\"field\"\n\nhello\n--b--";
/// let multipart = parse(body, "b").unwrap();
/// assert_eq!(multipart.parts.len(), 1);
/// assert_eq!(multipart.parts[0].value.as_deref(), Some("hello"));
/// ```
pub fn parse(body: &str, boundary: &str) -> Result<MultipartBody, MultipartError> {
    let delimiter = format!("--{}", boundary);
    let sections: Vec<&str> = body.split(delimiter.as_str()).collect();

    let mut parts = Vec::new();

    // Skip the preamble (first) and the closing "--" segment (last).
    if sections.len() > 2 {
        for section in &sections[1..sections.len() - 1] {
            let section = section.trim();
            if section.is_empty() {
                continue;
            }

            if let Some(part) = parse_part(section) {
                parts.push(part);
            }
        }
    }

    if parts.is_empty() {
        return Err(MultipartError::NoParts);
    }

    Ok(MultipartBody {
        boundary: boundary.to_string(),
        parts,
    })
}

/// Parses one part: a header block terminated by the first blank line,
/// followed by content lines.
fn parse_part(section: &str) -> Option<MultipartPart> {
    let mut name: Option<String> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut file_path: Option<String> = None;
    let mut value_lines: Vec<&str> = Vec::new();
    let mut headers_done = false;

    for line in section.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)) {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            headers_done = true;
            continue;
        }

        if !headers_done {
            parse_part_header(trimmed, &mut name, &mut filename, &mut content_type);
        } else if let Some(rest) = trimmed.strip_prefix('<') {
            file_path = Some(rest.trim().to_string());
        } else {
            value_lines.push(line);
        }
    }

    let value = if file_path.is_none() && !value_lines.is_empty() {
        Some(value_lines.join("\n").trim().to_string())
    } else {
        None
    };

    let name = match name {
        Some(n) => n,
        None => {
            log::error!("multipart part missing required \"name\" field");
            return None;
        }
    };

    Some(MultipartPart {
        name,
        filename,
        content_type,
        value,
        file_path,
    })
}

/// Parses one part-header line in either RFC or simplified syntax.
fn parse_part_header(
    line: &str,
    name: &mut Option<String>,
    filename: &mut Option<String>,
    content_type: &mut Option<String>,
) {
    let lower = line.to_lowercase();

    if let Some(colon_pos) = line.find(':') {
        let rest = line[colon_pos + 1..].trim();

        if lower.starts_with("content-disposition:") {
            if let Some(caps) = NAME_ATTR_REGEX.captures(rest) {
                *name = Some(caps[1].to_string());
            }
            if let Some(caps) = FILENAME_ATTR_REGEX.captures(rest) {
                *filename = Some(caps[1].to_string());
            }
        } else if lower.starts_with("content-type:") {
            *content_type = Some(rest.to_string());
        } else {
            // Simplified syntax: name: field / filename: a.pdf / content-type: ...
            let key = line[..colon_pos].trim().to_lowercase();
            match key.as_str() {
                "name" => *name = Some(rest.to_string()),
                "filename" => *filename = Some(rest.to_string()),
                "content-type" => *content_type = Some(rest.to_string()),
                _ => {}
            }
        }
    }
}

/// Reads the `boundary=` attribute out of a Content-Type header value.
///
/// # Examples
///
/// ```
/// use httpfile::multipart::extract_boundary;
///
/// assert_eq!(
///     extract_boundary("multipart/form-data; boundary=\"abc123\"").as_deref(),
///     Some("abc123")
/// );
/// assert_eq!(extract_boundary("multipart/form-data"), None);
/// ```
pub fn extract_boundary(content_type: &str) -> Option<String> {
    BOUNDARY_REGEX.captures(content_type).map(|caps| {
        let raw = caps[1].trim();
        raw.trim_start_matches(['"', '\''])
            .trim_end_matches(['"', '\''])
            .to_string()
    })
}

/// Generates a random boundary for callers that did not supply one.
pub fn generate_boundary() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..BOUNDARY_SUFFIX_LEN)
        .map(|_| BOUNDARY_CHARSET[rng.gen_range(0..BOUNDARY_CHARSET.len())] as char)
        .collect();
    format!("----WebKitFormBoundary{}", suffix)
}
