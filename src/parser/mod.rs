//! Request-document parser.
//!
//! This module parses plain-text request documents (`.http`/`.rest` style)
//! into structured [`ParsedRequest`] objects. A document holds any number of
//! requests separated by `###` or `---` lines; comments (`#` or `//`) are
//! skipped outside of bodies, and malformed lines are collected as errors
//! without aborting the scan.
//!
//! Parsing is a line-oriented state machine: the parser reads a request line,
//! then headers, then (for methods that allow one) a body, finalizing the
//! in-progress request at each separator and at end of input.

pub mod error;
pub mod validator;

use crate::models::{HttpMethod, ParsedRequest};
use error::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Matches a request separator: a line of three-or-more `#` or `-` characters
/// with optional surrounding whitespace.
static SEPARATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(#{3,}|-{3,})\s*$").expect("Failed to compile separator regex"));

/// Matches a `@name <identifier>` annotation inside a comment line.
static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@name\s+([A-Za-z0-9_]+)").expect("Failed to compile name regex"));

/// Parser state while scanning a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    ReadingRequestLine,
    ReadingHeaders,
    ReadingBody,
}

/// Result of parsing a request document.
///
/// A parse with errors still yields every request that parsed cleanly; the
/// caller decides whether the errors make the overall result unusable.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Requests found in document order, with ids `req-1..req-N`.
    pub requests: Vec<ParsedRequest>,

    /// Errors for malformed lines, each carrying its line number.
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// True when the document parsed without any errors.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses a request document into requests and collected errors.
///
/// Requests are separated by lines of `###` or `---` (three or more). A
/// malformed request line or header is recorded as a [`ParseError`] and the
/// scan continues, so one broken request does not hide the rest of the
/// document.
///
/// # Arguments
///
/// * `content` - The full document text; `\n` and `\r\n` line endings are
///   both accepted
///
/// # Examples
///
/// ```
/// use httpfile::parser::parse;
///
/// let content = r#"
/// GET https://api.example.com/users
///
/// ####
///
/// POST https://api.example.com/users
/// Content-Type: application/json
///
/// {"name": "John"}
/// "#;
///
/// let result = parse(content);
/// assert!(result.success());
/// assert_eq!(result.requests.len(), 2);
/// assert_eq!(result.requests[0].id, "req-1");
/// ```
pub fn parse(content: &str) -> ParseResult {
    let lines: Vec<&str> = content.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();

    let mut requests: Vec<ParsedRequest> = Vec::new();
    let mut errors: Vec<ParseError> = Vec::new();

    let mut state = ParserState::ReadingRequestLine;
    let mut current: Option<ParsedRequest> = None;
    let mut body_lines: Vec<&str> = Vec::new();

    for (i, &line) in lines.iter().enumerate() {
        let line_number = i + 1;

        // A separator always finalizes the in-progress request and resets the
        // machine; runs of separators emit nothing.
        if SEPARATOR_REGEX.is_match(line) {
            if let Some(mut request) = current.take() {
                finalize_request(&mut request, &mut body_lines);
                requests.push(request);
            }
            body_lines.clear();
            state = ParserState::ReadingRequestLine;
            continue;
        }

        let trimmed = line.trim();

        match state {
            ParserState::ReadingRequestLine => {
                if trimmed.is_empty() || is_comment_line(trimmed) {
                    continue;
                }

                match parse_request_line(line, line_number) {
                    Ok(mut request) => {
                        request.name = extract_request_name(&lines, i);
                        current = Some(request);
                        body_lines.clear();
                        state = ParserState::ReadingHeaders;
                    }
                    // Failure keeps the state machine here; the next candidate
                    // line is re-attempted as a request line.
                    Err(err) => errors.push(err),
                }
            }

            ParserState::ReadingHeaders => {
                if is_comment_line(trimmed) {
                    continue;
                }

                // Blank line ends the header block. Body-less methods never
                // enter body state, so any following content is not collected.
                if trimmed.is_empty() {
                    if let Some(request) = current.as_ref() {
                        if request.method.allows_body() {
                            state = ParserState::ReadingBody;
                        }
                    }
                    continue;
                }

                match parse_header_line(line, line_number) {
                    Ok((key, value)) => {
                        if let Some(request) = current.as_mut() {
                            request.add_header(key, value);
                        }
                    }
                    Err(err) => errors.push(err),
                }
            }

            ParserState::ReadingBody => {
                // Bodies are verbatim: blank lines and comment-looking lines
                // are content here.
                body_lines.push(line);
            }
        }
    }

    // Finalize an incomplete trailing request at end of input.
    if let Some(mut request) = current.take() {
        finalize_request(&mut request, &mut body_lines);
        requests.push(request);
    }

    // Ids are a pure function of final parse order.
    for (idx, request) in requests.iter_mut().enumerate() {
        request.id = format!("req-{}", idx + 1);
    }

    if !errors.is_empty() {
        log::error!("parser encountered {} error(s)", errors.len());
        for err in &errors {
            log::error!("  line {}: {}", err.line(), err);
        }
    }

    ParseResult { requests, errors }
}

/// Checks whether a trimmed line is a comment (`#` or `//` prefix).
fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with('#') || trimmed.starts_with("//")
}

/// Scans backward from the request line for a `@name <identifier>` annotation.
///
/// Only the comment block immediately above the request line is considered;
/// the scan stops at the first blank line or separator.
fn extract_request_name(lines: &[&str], request_line_index: usize) -> Option<String> {
    for i in (0..request_line_index).rev() {
        let trimmed = lines[i].trim();

        if trimmed.is_empty() || SEPARATOR_REGEX.is_match(trimmed) {
            break;
        }

        if is_comment_line(trimmed) {
            if let Some(caps) = NAME_REGEX.captures(trimmed) {
                return Some(caps[1].to_string());
            }
        }
    }

    None
}

/// Parses a `METHOD URL [# inline comment]` request line.
///
/// The method is validated against the known set and normalized to uppercase.
/// A `#` preceded by whitespace starts an inline comment; a bare `#` (e.g. a
/// URL fragment) is left alone. The URL is accepted if it starts with `/`,
/// contains a `{{` placeholder, or parses as an absolute URL.
fn parse_request_line(line: &str, line_number: usize) -> Result<ParsedRequest, ParseError> {
    let trimmed = line.trim();

    let clean = match trimmed.find(" #") {
        Some(idx) => trimmed[..idx].trim(),
        None => trimmed,
    };

    let parts: Vec<&str> = clean.split_whitespace().collect();

    if parts.len() < 2 {
        return Err(ParseError::InvalidRequestLine {
            found: clean.to_string(),
            line: line_number,
        });
    }

    let method_token = parts[0].to_uppercase();
    let method = HttpMethod::from_str(&method_token).ok_or(ParseError::InvalidMethod {
        method: method_token,
        line: line_number,
    })?;

    let url = parts[1];
    if !is_valid_url(url) {
        return Err(ParseError::InvalidUrl {
            url: url.to_string(),
            line: line_number,
        });
    }

    let mut request = ParsedRequest::new(method, url);
    request.line_number = line_number;
    Ok(request)
}

/// Parses a `Key: Value` header line, trimming both sides.
fn parse_header_line(line: &str, line_number: usize) -> Result<(String, String), ParseError> {
    let colon_pos = match line.find(':') {
        Some(pos) => pos,
        None => {
            return Err(ParseError::InvalidHeader {
                header: line.trim().to_string(),
                line: line_number,
            })
        }
    };

    let key = line[..colon_pos].trim();
    let value = line[colon_pos + 1..].trim();

    if key.is_empty() {
        return Err(ParseError::EmptyHeaderName { line: line_number });
    }

    Ok((key.to_string(), value.to_string()))
}

/// Validates a request-line URL.
///
/// Placeholder-bearing URLs are deferred to post-resolution validation, and
/// relative paths are allowed for use with an externally configured base.
fn is_valid_url(url: &str) -> bool {
    if url.contains("{{") {
        return true;
    }

    if url.starts_with('/') {
        return true;
    }

    Url::parse(url).is_ok()
}

/// Trims trailing blank lines from the body buffer and attaches the remainder.
fn finalize_request(request: &mut ParsedRequest, body_lines: &mut Vec<&str>) {
    while body_lines.last().map_or(false, |l| l.trim().is_empty()) {
        body_lines.pop();
    }

    if !body_lines.is_empty() {
        request.body = Some(body_lines.join("\n"));
    }
}
