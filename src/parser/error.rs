//! Error types for request-document parsing.
//!
//! Parse errors are collected, not thrown: a malformed line never aborts the
//! scan, and every error carries the 1-based line number it occurred on.

use std::fmt;

/// Errors that can occur while parsing a request document.
///
/// Each variant includes contextual information to help users locate and fix
/// syntax errors in their request files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request line did not have the `METHOD URL` shape.
    InvalidRequestLine {
        /// The text that failed to parse (after inline-comment stripping)
        found: String,
        /// Line number in the source document (1-based)
        line: usize,
    },

    /// Invalid or unsupported HTTP method.
    InvalidMethod {
        /// The invalid method token that was encountered
        method: String,
        /// Line number in the source document (1-based)
        line: usize,
    },

    /// Invalid URL format.
    ///
    /// A URL is accepted if it starts with `/`, contains a `{{` placeholder,
    /// or parses as an absolute URL.
    InvalidUrl {
        /// The invalid URL token that was encountered
        url: String,
        /// Line number in the source document (1-based)
        line: usize,
    },

    /// Header line without a colon separator.
    InvalidHeader {
        /// The offending header line
        header: String,
        /// Line number in the source document (1-based)
        line: usize,
    },

    /// Header line with an empty name before the colon.
    EmptyHeaderName {
        /// Line number in the source document (1-based)
        line: usize,
    },
}

impl ParseError {
    /// Returns the line number associated with this error.
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidRequestLine { line, .. } => *line,
            ParseError::InvalidMethod { line, .. } => *line,
            ParseError::InvalidUrl { line, .. } => *line,
            ParseError::InvalidHeader { line, .. } => *line,
            ParseError::EmptyHeaderName { line } => *line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidRequestLine { found, line } => {
                write!(
                    f,
                    "Invalid request line at line {}: expected \"METHOD URL\", got \"{}\"",
                    line, found
                )
            }
            ParseError::InvalidMethod { method, line } => {
                write!(
                    f,
                    "Invalid HTTP method '{}' at line {}. Expected one of: GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS",
                    method, line
                )
            }
            ParseError::InvalidUrl { url, line } => {
                write!(
                    f,
                    "Invalid URL format '{}' at line {}. URL must start with http://, https://, or /",
                    url, line
                )
            }
            ParseError::InvalidHeader { header, line } => {
                write!(
                    f,
                    "Invalid header format '{}' at line {}: missing colon. Expected 'Header-Name: value'",
                    header, line
                )
            }
            ParseError::EmptyHeaderName { line } => {
                write!(f, "Invalid header at line {}: empty header name", line)
            }
        }
    }
}

impl std::error::Error for ParseError {}
