//! Two-phase request resolution.
//!
//! Applies chain-variable resolution and then environment-variable
//! resolution to a parsed request's url, header values, and body, producing
//! a new request. Dependencies arrive as explicit parameters in a
//! [`ResolutionContext`]; there is no shared or wired-in state, so
//! concurrent resolutions of different requests cannot interfere.

use crate::chain::ResponseStore;
use crate::environment::Environment;
use crate::models::ParsedRequest;
use crate::variables::chain::resolve_chain_variables;
use crate::variables::environment::resolve_environment_variables;
use crate::variables::ResolveError;

/// Everything a resolution call reads: the active environment (if any) and
/// the chain-response store.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    /// Active environment; with none, the environment phase is skipped.
    pub environment: Option<&'a Environment>,

    /// Saved responses for chain-variable lookups.
    pub responses: &'a ResponseStore,
}

impl<'a> ResolutionContext<'a> {
    /// Creates a context from its two dependencies.
    pub fn new(environment: Option<&'a Environment>, responses: &'a ResponseStore) -> Self {
        Self {
            environment,
            responses,
        }
    }
}

/// Resolves all placeholders in one text: chain phase, then environment
/// phase.
///
/// Chain misses pass through untouched; environment failures abort with an
/// error (see [`ResolveError`]).
pub fn resolve_text(text: &str, ctx: &ResolutionContext) -> Result<String, ResolveError> {
    if !text.contains("{{") {
        return Ok(text.to_string());
    }

    let after_chain = resolve_chain_variables(text, ctx.responses);

    match ctx.environment {
        Some(env) => resolve_environment_variables(&after_chain, env),
        None => {
            log::debug!("no environment active; skipping environment phase");
            Ok(after_chain)
        }
    }
}

/// Resolves a parsed request into an executable one.
///
/// Produces a new request with url, every header value, and body fully
/// substituted; the input is never mutated. An error from any single field
/// aborts this request's resolution only.
///
/// # Examples
///
/// ```
/// use httpfile::chain::ResponseStore;
/// use httpfile::environment::Environment;
/// use httpfile::models::{HttpMethod, ParsedRequest};
/// use httpfile::variables::{resolve_request, ResolutionContext};
///
/// let mut env = Environment::new("dev");
/// env.set("BASE_URL", "http://localhost:3000");
///
/// let store = ResponseStore::new();
/// let request = ParsedRequest::new(HttpMethod::GET, "{{BASE_URL}}/users");
///
/// let ctx = ResolutionContext::new(Some(&env), &store);
/// let resolved = resolve_request(&request, &ctx).unwrap();
/// assert_eq!(resolved.url, "http://localhost:3000/users");
/// ```
pub fn resolve_request(
    request: &ParsedRequest,
    ctx: &ResolutionContext,
) -> Result<ParsedRequest, ResolveError> {
    log::debug!("resolving variables for request {}", request.id);

    let mut resolved = request.clone();

    resolved.url = resolve_text(&request.url, ctx)?;

    for (_, value) in resolved.headers.iter_mut() {
        *value = resolve_text(value, ctx)?;
    }

    resolved.body = match &request.body {
        Some(body) => Some(resolve_text(body, ctx)?),
        None => None,
    };

    Ok(resolved)
}
