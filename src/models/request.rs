//! HTTP request data models.
//!
//! This module defines the core data structures for representing HTTP requests
//! parsed from request documents, including the request method, headers, body,
//! and metadata about the request's position in the source document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// HTTP request method.
///
/// Covers the methods accepted on a request line. Methods are written
/// case-insensitively in source documents and normalized to uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    /// Parses a string into an HttpMethod.
    ///
    /// # Arguments
    ///
    /// * `s` - A string slice representing the HTTP method, in any case
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string is a recognized method, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "PATCH" => Some(HttpMethod::PATCH),
            "DELETE" => Some(HttpMethod::DELETE),
            "HEAD" => Some(HttpMethod::HEAD),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            _ => None,
        }
    }

    /// Whether this method may carry a request body.
    ///
    /// GET and HEAD requests never carry one; the parser uses this to decide
    /// whether a blank line after the header block opens a body section.
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::GET | HttpMethod::HEAD)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents one HTTP request parsed out of a request document.
///
/// This structure contains everything needed to execute the request once
/// variables are resolved: method, URL, headers, body, and metadata about its
/// location in the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedRequest {
    /// Stable identifier assigned in document order (`req-1`, `req-2`, ...).
    ///
    /// Recomputed on every parse; unique within a single parse result.
    pub id: String,

    /// Optional symbolic name from a `@name <identifier>` comment preceding
    /// the request line.
    ///
    /// Named requests have their responses saved to the chain store under
    /// this name, making them addressable from later requests via
    /// `{{name.response...}}` placeholders.
    pub name: Option<String>,

    /// HTTP method (GET, POST, PUT, etc.).
    pub method: HttpMethod,

    /// Target URL for the request.
    ///
    /// May contain unresolved `{{variable}}` placeholders; full URL
    /// validation is deferred until after resolution.
    pub url: String,

    /// Request headers in document order.
    ///
    /// Keys are stored case-sensitively as written. Later entries for the
    /// same key overwrite earlier ones; duplicate detection across casings
    /// is a validation concern, not a parser concern.
    pub headers: IndexMap<String, String>,

    /// Optional request body.
    ///
    /// Present only when the method permits a body and the document has
    /// non-blank content after the header block. Trailing blank lines are
    /// trimmed; interior blank lines are preserved verbatim.
    pub body: Option<String>,

    /// 1-based line number of the request line in the source document.
    ///
    /// Unique across all requests in one parse result; used to correlate a
    /// document position with a request.
    pub line_number: usize,
}

impl ParsedRequest {
    /// Creates a new ParsedRequest with the given method and URL.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: None,
            method,
            url: url.into(),
            headers: IndexMap::new(),
            body: None,
            line_number: 0,
        }
    }

    /// Adds a header, overwriting any existing entry with the same key.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Sets the request body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = Some(body.into());
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        self.body.as_ref().map_or(false, |b| !b.is_empty())
    }

    /// Gets the Content-Type header value if present (case-insensitive lookup).
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the Content-Type header declares a multipart body.
    pub fn is_multipart(&self) -> bool {
        self.content_type()
            .map_or(false, |ct| ct.trim_start().starts_with("multipart/"))
    }
}
