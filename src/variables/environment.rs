//! Environment-variable resolution (phase two).
//!
//! Substitutes `{{NAME}}` placeholders from the active environment. Values
//! may themselves contain placeholders, so resolution is iterative: each
//! round replaces every visible placeholder, and the loop runs until the
//! text stabilizes or the round ceiling converts a suspected cycle into a
//! deterministic failure.

use crate::environment::Environment;
use crate::variables::ResolveError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum substitution rounds before resolution is abandoned.
pub const MAX_RESOLUTION_DEPTH: usize = 10;

/// Matches `{{ NAME }}` with optional padding whitespace inside the braces.
static VARIABLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
        .expect("Failed to compile variable regex")
});

/// Resolves all environment placeholders in a text.
///
/// Each round replaces every visible placeholder with its environment value;
/// values containing further placeholders are picked up by the next round
/// (one level of indirection per round).
///
/// # Errors
///
/// * [`ResolveError::UndefinedVariable`] - a referenced name has no entry
/// * [`ResolveError::CircularReference`] - a value contains a placeholder
///   for itself
/// * [`ResolveError::MaxDepthExceeded`] - the text did not stabilize within
///   [`MAX_RESOLUTION_DEPTH`] rounds
///
/// # Examples
///
/// ```
/// use httpfile::environment::Environment;
/// use httpfile::variables::resolve_environment_variables;
///
/// let mut env = Environment::new("dev");
/// env.set("HOST", "localhost");
/// env.set("BASE_URL", "http://{{HOST}}:3000");
///
/// let resolved = resolve_environment_variables("{{BASE_URL}}/users", &env).unwrap();
/// assert_eq!(resolved, "http://localhost:3000/users");
/// ```
pub fn resolve_environment_variables(
    text: &str,
    environment: &Environment,
) -> Result<String, ResolveError> {
    let mut resolved = text.to_string();

    for _ in 0..MAX_RESOLUTION_DEPTH {
        if !VARIABLE_REGEX.is_match(&resolved) {
            return Ok(resolved);
        }

        let mut next = String::with_capacity(resolved.len());
        let mut last_end = 0;

        for caps in VARIABLE_REGEX.captures_iter(&resolved) {
            let full = caps.get(0).expect("regex match has group 0");
            let name = &caps[1];

            let value =
                environment
                    .get(name)
                    .ok_or_else(|| ResolveError::UndefinedVariable {
                        name: name.to_string(),
                        environment: environment.name.clone(),
                    })?;

            // Direct self-reference; indirect cycles fall out of the round
            // ceiling instead.
            if value.contains(&format!("{{{{{}}}}}", name)) {
                return Err(ResolveError::CircularReference(name.to_string()));
            }

            next.push_str(&resolved[last_end..full.start()]);
            next.push_str(value);
            last_end = full.end();
        }

        next.push_str(&resolved[last_end..]);
        resolved = next;
    }

    if VARIABLE_REGEX.is_match(&resolved) {
        return Err(ResolveError::MaxDepthExceeded);
    }

    Ok(resolved)
}

/// Extracts the distinct environment-variable names referenced in a text,
/// in first-appearance order.
pub fn extract_variable_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for caps in VARIABLE_REGEX.captures_iter(text) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names
}

/// Reports which referenced names are absent from the given environment.
///
/// Non-throwing pre-flight helper: with no environment, every referenced
/// name is missing.
pub fn validate_variables(text: &str, environment: Option<&Environment>) -> Vec<String> {
    extract_variable_names(text)
        .into_iter()
        .filter(|name| environment.map_or(true, |env| !env.contains(name)))
        .collect()
}
