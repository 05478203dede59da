//! Chain-variable resolution (phase one).
//!
//! Substitutes `{{name.response.(body|headers|status)[.path]}}` placeholders
//! from the response store. This phase never fails: a placeholder whose
//! request name, section, or path does not resolve is logged and left in the
//! text untouched, on the theory that an unresolved chain reference is more
//! useful visible as-is than erroring the whole request.

use crate::chain::ResponseStore;
use crate::variables::path::{navigate, value_to_string};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value as JsonValue};

/// Matches `{{name.response.section[path]}}` placeholders. The path char
/// class includes `-` so response header names are addressable.
static CHAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\.response\.(body|headers|status)([-.\[\]A-Za-z0-9_]+)?\}\}")
        .expect("Failed to compile chain variable regex")
});

/// Resolves all chain placeholders in a text, leaving misses untouched.
///
/// # Arguments
///
/// * `text` - Text possibly containing chain placeholders
/// * `store` - Saved responses keyed by request name
///
/// # Examples
///
/// ```
/// use httpfile::chain::ResponseStore;
/// use httpfile::variables::resolve_chain_variables;
/// use std::collections::HashMap;
///
/// let mut store = ResponseStore::new();
/// store.save("login", 200, HashMap::new(), r#"{"token": "abc"}"#);
///
/// let resolved = resolve_chain_variables("Bearer {{login.response.body.token}}", &store);
/// assert_eq!(resolved, "Bearer abc");
/// ```
pub fn resolve_chain_variables(text: &str, store: &ResponseStore) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for caps in CHAIN_REGEX.captures_iter(text) {
        let full = caps.get(0).expect("regex match has group 0");
        let name = &caps[1];
        let section = &caps[2];
        let path = caps
            .get(3)
            .map(|m| m.as_str().strip_prefix('.').unwrap_or(m.as_str()))
            .unwrap_or("");

        result.push_str(&text[last_end..full.start()]);

        match resolve_one(name, section, path, store) {
            Some(value) => {
                log::info!("resolved chain variable {} -> {}", full.as_str(), value);
                result.push_str(&value);
            }
            None => {
                log::warn!("chain variable not found: {}", full.as_str());
                result.push_str(full.as_str());
            }
        }

        last_end = full.end();
    }

    result.push_str(&text[last_end..]);
    result
}

/// Resolves a single chain placeholder, or `None` when anything along the
/// way is missing.
fn resolve_one(name: &str, section: &str, path: &str, store: &ResponseStore) -> Option<String> {
    let saved = match store.get(name) {
        Some(saved) => saved,
        None => {
            log::error!("no saved response with name: {}", name);
            return None;
        }
    };

    // Status is a bare number; any trailing path is ignored.
    if section == "status" {
        return Some(saved.status.to_string());
    }

    let section_value: JsonValue = match section {
        "body" => saved.body.clone(),
        "headers" => {
            let map: Map<String, JsonValue> = saved
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
                .collect();
            JsonValue::Object(map)
        }
        _ => return None,
    };

    if path.is_empty() {
        return Some(value_to_string(&section_value));
    }

    navigate(&section_value, path).map(value_to_string)
}
