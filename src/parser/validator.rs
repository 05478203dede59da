//! Post-parse request validation.
//!
//! The parser is deliberately permissive; this lint pass catches problems
//! that are legal syntax but almost certainly mistakes, such as duplicate
//! headers that differ only in case.

use crate::models::ParsedRequest;
use std::collections::HashSet;

/// A validation finding with an optional fix suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// What is wrong with the request.
    pub message: String,

    /// How the user might fix it.
    pub suggestion: Option<String>,
}

/// Validates a parsed request, returning the first issue found.
///
/// Checks:
/// - duplicate header keys under case-insensitive comparison (the parser
///   stores keys case-sensitively, so `Accept` and `accept` both survive
///   parsing but cannot both be sent);
/// - a body on a GET/HEAD request (impossible from the parser, but
///   reachable on hand-built requests).
pub fn validate(request: &ParsedRequest) -> Option<ValidationIssue> {
    let mut seen = HashSet::new();
    for key in request.headers.keys() {
        if !seen.insert(key.to_lowercase()) {
            return Some(ValidationIssue {
                message: "Duplicate header keys found (headers are case-insensitive)".to_string(),
                suggestion: Some("Remove duplicate headers or combine their values".to_string()),
            });
        }
    }

    if request.has_body() {
        let has_content_length = request
            .headers
            .keys()
            .any(|k| k.eq_ignore_ascii_case("content-length"));
        if !has_content_length && request.method.allows_body() {
            log::debug!("request {} has a body but no Content-Length header", request.id);
        }
    }

    if !request.method.allows_body() && request.has_body() {
        return Some(ValidationIssue {
            message: format!("{} requests should not have a body", request.method),
            suggestion: Some("Remove the request body".to_string()),
        });
    }

    None
}
