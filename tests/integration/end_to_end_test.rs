//! End-to-end integration tests.
//!
//! These tests verify complete workflows from document parsing through
//! environment loading, variable resolution, and multipart materialization,
//! without any network transport.

use httpfile::chain::ResponseStore;
use httpfile::environment::{load_env_file, select_default, Environment};
use httpfile::models::HttpMethod;
use httpfile::multipart;
use httpfile::parser::{parse, validator};
use httpfile::variables::{resolve_request, validate_variables, ResolutionContext};
use std::fs;
use tempfile::TempDir;

use super::init_test_env;

#[test]
fn test_parse_resolve_workflow() {
    init_test_env();

    let document = r#"
# Collection of user endpoints

GET {{BASE_URL}}/users
Accept: application/json

###

POST {{BASE_URL}}/users
Content-Type: application/json
X-Api-Key: {{API_KEY}}

{"name": "Alice", "team": "{{TEAM}}"}
"#;

    let result = parse(document);
    assert!(result.success());
    assert_eq!(result.requests.len(), 2);

    let mut env = Environment::new("dev");
    env.set("BASE_URL", "http://localhost:3000");
    env.set("API_KEY", "k-123");
    env.set("TEAM", "core");

    let store = ResponseStore::new();
    let ctx = ResolutionContext::new(Some(&env), &store);

    let first = resolve_request(&result.requests[0], &ctx).unwrap();
    assert_eq!(first.url, "http://localhost:3000/users");

    let second = resolve_request(&result.requests[1], &ctx).unwrap();
    assert_eq!(
        second.headers.get("X-Api-Key"),
        Some(&"k-123".to_string())
    );
    assert_eq!(
        second.body.as_deref(),
        Some(r#"{"name": "Alice", "team": "core"}"#)
    );
}

#[test]
fn test_env_file_to_resolution_workflow() {
    init_test_env();

    let dir = TempDir::new().unwrap();
    let env_path = dir.path().join(".env");
    fs::write(
        &env_path,
        "# local settings\nBASE_URL=http://localhost:8080\nGREETING=\"Hello World\"\n",
    )
    .unwrap();

    let env = load_env_file(&env_path).unwrap();
    assert_eq!(env.name, "default");
    assert_eq!(env.get("GREETING").unwrap(), "Hello World");

    let result = parse("POST {{BASE_URL}}/echo\n\n{{GREETING}}");
    let store = ResponseStore::new();
    let ctx = ResolutionContext::new(Some(&env), &store);

    let resolved = resolve_request(&result.requests[0], &ctx).unwrap();
    assert_eq!(resolved.url, "http://localhost:8080/echo");
    assert_eq!(resolved.body.as_deref(), Some("Hello World"));
}

#[test]
fn test_environment_discovery_and_selection() {
    init_test_env();

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "WHERE=default\n").unwrap();
    fs::write(dir.path().join(".env.production"), "WHERE=prod\n").unwrap();

    let envs = httpfile::environment::load_environments(dir.path());
    assert_eq!(envs.len(), 2);

    let active = select_default(&envs).unwrap();
    assert_eq!(active.name, "default");
    assert_eq!(active.get("WHERE").unwrap(), "default");
}

#[test]
fn test_preflight_validation_before_resolution() {
    init_test_env();

    let mut env = Environment::new("dev");
    env.set("BASE_URL", "http://localhost");

    let document = "GET {{BASE_URL}}/users?key={{API_KEY}}";
    let result = parse(document);

    let missing = validate_variables(&result.requests[0].url, Some(&env));
    assert_eq!(missing, vec!["API_KEY"]);

    // The resolution itself fails on the same variable
    let store = ResponseStore::new();
    let ctx = ResolutionContext::new(Some(&env), &store);
    assert!(resolve_request(&result.requests[0], &ctx).is_err());
}

#[test]
fn test_multipart_workflow() {
    init_test_env();

    let document = "POST https://api.example.com/upload\nContent-Type: multipart/form-data; boundary=----WebKitFormBoundaryX\n\n------WebKitFormBoundaryX\nContent-Disposition: form-data; name=\"title\"\n\nQuarterly report\n------WebKitFormBoundaryX\nContent-Disposition: form-data; name=\"file\"; filename=\"report.pdf\"\nContent-Type: application/pdf\n\n< ./report.pdf\n------WebKitFormBoundaryX--";

    let result = parse(document);
    assert!(result.success());

    let request = &result.requests[0];
    assert!(request.is_multipart());

    let boundary = multipart::extract_boundary(request.content_type().unwrap()).unwrap();
    assert_eq!(boundary, "----WebKitFormBoundaryX");

    let body = request.body.as_deref().unwrap();
    let parsed = multipart::parse(body, &boundary).unwrap();
    assert_eq!(parsed.parts.len(), 2);

    assert_eq!(parsed.parts[0].name, "title");
    assert_eq!(parsed.parts[0].value.as_deref(), Some("Quarterly report"));

    assert_eq!(parsed.parts[1].name, "file");
    assert_eq!(parsed.parts[1].filename.as_deref(), Some("report.pdf"));
    assert_eq!(parsed.parts[1].file_path.as_deref(), Some("./report.pdf"));
}

#[test]
fn test_validator_catches_cross_case_duplicates() {
    init_test_env();

    let document =
        "POST https://api.example.com\nContent-Type: application/json\ncontent-type: text/plain";

    let result = parse(document);
    assert!(result.success());

    // Parser keeps both casings; the validator flags the conflict
    assert_eq!(result.requests[0].headers.len(), 2);
    let issue = validator::validate(&result.requests[0]).unwrap();
    assert!(issue.message.contains("Duplicate header"));
}

#[test]
fn test_partial_failure_keeps_other_requests_usable() {
    init_test_env();

    let document = "INVALID https://x\n###\nGET https://y\n###\nBREW http://teapot";

    let result = parse(document);
    assert!(!result.success());
    assert_eq!(result.requests.len(), 1);
    assert_eq!(result.errors.len(), 2);

    let mut env = Environment::new("dev");
    env.set("unused", "x");
    let store = ResponseStore::new();
    let ctx = ResolutionContext::new(Some(&env), &store);

    let resolved = resolve_request(&result.requests[0], &ctx).unwrap();
    assert_eq!(resolved.url, "https://y");
}

#[test]
fn test_document_edge_cases() {
    init_test_env();

    // Separator-only document
    let result = parse("###\n###\n---\n");
    assert!(result.success());
    assert!(result.requests.is_empty());

    // Request with name annotation and inline comment together
    let result = parse("# @name ping # checks liveness\nGET https://api.example.com/ping # quick");
    assert_eq!(result.requests[0].name, Some("ping".to_string()));
    assert_eq!(result.requests[0].url, "https://api.example.com/ping");

    // Body-less method with trailing content
    let result = parse("GET https://api.example.com/users\n\nleftover content");
    assert_eq!(result.requests[0].body, None);

    // Body with interior blank line survives, trailing blanks trimmed
    let result = parse("POST https://api.example.com\n\nLine 1\n\nLine 3\n\n\n");
    assert_eq!(
        result.requests[0].body.as_deref(),
        Some("Line 1\n\nLine 3")
    );
}

#[test]
fn test_ids_follow_document_order_across_methods() {
    init_test_env();

    let methods = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];
    let document = methods
        .iter()
        .map(|m| format!("{} https://api.example.com/x", m))
        .collect::<Vec<_>>()
        .join("\n###\n");

    let result = parse(&document);
    assert!(result.success());
    assert_eq!(result.requests.len(), methods.len());

    for (i, request) in result.requests.iter().enumerate() {
        assert_eq!(request.id, format!("req-{}", i + 1));
        assert_eq!(request.method, HttpMethod::from_str(methods[i]).unwrap());
    }
}
