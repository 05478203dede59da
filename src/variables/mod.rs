//! Variable resolution for parsed requests.
//!
//! Placeholders come in two kinds, substituted in two strictly ordered
//! phases:
//!
//! 1. **Chain variables** — `{{name.response.body.user.id}}` reads a field
//!    of a previously saved response ([`crate::chain::ResponseStore`]).
//!    Misses are non-fatal: the placeholder stays in the text.
//! 2. **Environment variables** — `{{BASE_URL}}` reads the active
//!    [`crate::environment::Environment`]. Misses and cycles are fatal to
//!    the resolution call.
//!
//! Chain resolution runs first because its placeholders are syntactically a
//! superset of bare environment names; resolving environment variables first
//! could consume partial matches.

pub mod chain;
pub mod environment;
pub mod path;
pub mod resolver;

pub use chain::resolve_chain_variables;
pub use environment::{
    extract_variable_names, resolve_environment_variables, validate_variables,
    MAX_RESOLUTION_DEPTH,
};
pub use path::{navigate, parse_path, value_to_string, PathSegment};
pub use resolver::{resolve_request, resolve_text, ResolutionContext};

use std::fmt;

/// Errors that abort a single resolution call.
///
/// All variants concern environment-variable resolution; chain-variable
/// misses are deliberately left in the text instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A referenced variable has no entry in the active environment.
    UndefinedVariable {
        /// The missing variable name
        name: String,
        /// Name of the environment that was searched
        environment: String,
    },

    /// A variable's value contains a placeholder for itself.
    CircularReference(String),

    /// The round ceiling was reached without the text stabilizing,
    /// treated as an undetected cycle.
    MaxDepthExceeded,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UndefinedVariable { name, environment } => {
                write!(
                    f,
                    "Variable \"{}\" not found in environment \"{}\"",
                    name, environment
                )
            }
            ResolveError::CircularReference(name) => {
                write!(f, "Circular reference detected: {}", name)
            }
            ResolveError::MaxDepthExceeded => {
                write!(
                    f,
                    "Variable resolution exceeded maximum depth (possible circular reference)"
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}
