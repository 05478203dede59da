//! Request chaining integration tests.
//!
//! These tests verify the full chain workflow: a named request's response is
//! saved to the store, and later requests read it back through
//! `{{name.response...}}` placeholders, combined with environment variables.

use httpfile::chain::ResponseStore;
use httpfile::environment::Environment;
use httpfile::parser::parse;
use httpfile::variables::{resolve_request, ResolutionContext, ResolveError};
use std::collections::HashMap;

use super::init_test_env;

fn json_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

#[test]
fn test_login_then_authorized_request() {
    init_test_env();

    let document = r#"# @name login
POST https://api.example.com/auth/login
Content-Type: application/json

{"username": "test", "password": "pass"}

###

GET https://api.example.com/api/profile
Authorization: Bearer {{login.response.body.token}}
"#;

    let result = parse(document);
    assert!(result.success());
    assert_eq!(result.requests[0].name, Some("login".to_string()));

    // Simulate the transport completing the login request
    let mut store = ResponseStore::new();
    store.save(
        result.requests[0].name.as_deref().unwrap(),
        200,
        json_headers(),
        r#"{"token": "jwt-abc", "user": {"id": 42}}"#,
    );

    let ctx = ResolutionContext::new(None, &store);
    let profile = resolve_request(&result.requests[1], &ctx).unwrap();

    assert_eq!(
        profile.headers.get("Authorization"),
        Some(&"Bearer jwt-abc".to_string())
    );
}

#[test]
fn test_chain_path_navigation_into_json() {
    init_test_env();

    let mut store = ResponseStore::new();
    store.save(
        "login",
        200,
        json_headers(),
        r#"{"user": {"id": 42}}"#,
    );

    let result = parse("GET https://api.example.com/users/{{login.response.body.user.id}}");
    let ctx = ResolutionContext::new(None, &store);

    let resolved = resolve_request(&result.requests[0], &ctx).unwrap();
    assert_eq!(resolved.url, "https://api.example.com/users/42");
}

#[test]
fn test_chain_status_and_headers_sections() {
    init_test_env();

    let mut store = ResponseStore::new();
    store.save("probe", 204, json_headers(), "");

    let result = parse(
        "POST https://api.example.com/report\n\nstatus={{probe.response.status}} type={{probe.response.headers.Content-Type}}",
    );
    let ctx = ResolutionContext::new(None, &store);

    let resolved = resolve_request(&result.requests[0], &ctx).unwrap();
    assert_eq!(
        resolved.body.as_deref(),
        Some("status=204 type=application/json")
    );
}

#[test]
fn test_unresolved_chain_placeholder_passes_through() {
    init_test_env();

    let store = ResponseStore::new();
    let result = parse("GET https://api.example.com/x\nX-Prev: {{missing.response.body.x}}");

    let ctx = ResolutionContext::new(None, &store);
    let resolved = resolve_request(&result.requests[0], &ctx).unwrap();

    assert_eq!(
        resolved.headers.get("X-Prev"),
        Some(&"{{missing.response.body.x}}".to_string())
    );
}

#[test]
fn test_chain_and_environment_combined() {
    init_test_env();

    let mut env = Environment::new("staging");
    env.set("BASE_URL", "https://staging.example.com");

    let mut store = ResponseStore::new();
    store.save("createUser", 201, json_headers(), r#"{"id": 99}"#);

    let result = parse("DELETE {{BASE_URL}}/users/{{createUser.response.body.id}}");
    let ctx = ResolutionContext::new(Some(&env), &store);

    let resolved = resolve_request(&result.requests[0], &ctx).unwrap();
    assert_eq!(resolved.url, "https://staging.example.com/users/99");
}

#[test]
fn test_overwritten_response_is_visible_to_next_resolution() {
    init_test_env();

    let mut store = ResponseStore::new();
    store.save("login", 200, json_headers(), r#"{"token": "first"}"#);
    store.save("login", 200, json_headers(), r#"{"token": "second"}"#);

    let result = parse("GET https://x.example.com\nAuthorization: {{login.response.body.token}}");
    let ctx = ResolutionContext::new(None, &store);

    let resolved = resolve_request(&result.requests[0], &ctx).unwrap();
    assert_eq!(
        resolved.headers.get("Authorization"),
        Some(&"second".to_string())
    );
}

#[test]
fn test_one_failing_request_does_not_affect_others() {
    init_test_env();

    let mut env = Environment::new("dev");
    env.set("A", "{{B}}");
    env.set("B", "{{A}}");
    env.set("GOOD", "fine");

    let document = "GET https://x.example.com/{{A}}\n###\nGET https://x.example.com/{{GOOD}}";
    let result = parse(document);
    let store = ResponseStore::new();
    let ctx = ResolutionContext::new(Some(&env), &store);

    let first = resolve_request(&result.requests[0], &ctx);
    assert_eq!(first.unwrap_err(), ResolveError::MaxDepthExceeded);

    let second = resolve_request(&result.requests[1], &ctx).unwrap();
    assert_eq!(second.url, "https://x.example.com/fine");
}

#[test]
fn test_chain_value_containing_env_placeholder_resolves_in_phase_two() {
    init_test_env();

    let mut env = Environment::new("dev");
    env.set("REGION", "eu-west");

    let mut store = ResponseStore::new();
    store.save(
        "config",
        200,
        json_headers(),
        r#"{"endpoint": "https://{{REGION}}.example.com"}"#,
    );

    let result = parse("GET {{config.response.body.endpoint}}/status");
    let ctx = ResolutionContext::new(Some(&env), &store);

    let resolved = resolve_request(&result.requests[0], &ctx).unwrap();
    assert_eq!(resolved.url, "https://eu-west.example.com/status");
}

#[test]
fn test_store_clear_makes_placeholders_unresolvable_again() {
    init_test_env();

    let mut store = ResponseStore::new();
    store.save("login", 200, json_headers(), r#"{"token": "t"}"#);

    let result = parse("GET https://x.example.com/{{login.response.body.token}}");

    {
        let ctx = ResolutionContext::new(None, &store);
        let resolved = resolve_request(&result.requests[0], &ctx).unwrap();
        assert_eq!(resolved.url, "https://x.example.com/t");
    }

    store.clear();

    let ctx = ResolutionContext::new(None, &store);
    let resolved = resolve_request(&result.requests[0], &ctx).unwrap();
    assert_eq!(
        resolved.url,
        "https://x.example.com/{{login.response.body.token}}"
    );
}
