//! httpfile - request-file parsing and variable resolution.
//!
//! This crate turns plain-text documents containing one or more HTTP
//! requests into structured, executable request objects, and resolves
//! runtime values into them. It performs no network I/O itself: the
//! transport layer, editor integration, and response rendering are external
//! collaborators that consume the data structures produced here.
//!
//! # Architecture
//!
//! - **models**: core value objects for parsed requests and saved responses
//! - **parser**: line-oriented state machine turning a document into
//!   requests plus collected errors
//! - **multipart**: pseudo-multipart body descriptions into typed parts
//! - **environment**: `.env`-style variable sets and their loader
//! - **chain**: the in-memory store of named prior responses
//! - **variables**: the two-phase resolution engine (chain values first,
//!   then environment variables) with cycle detection
//!
//! # Request documents
//!
//! ```http
//! # @name login
//! POST https://api.example.com/auth/login
//! Content-Type: application/json
//!
//! {"username": "admin", "password": "{{PASSWORD}}"}
//!
//! ###
//!
//! GET https://api.example.com/profile
//! Authorization: Bearer {{login.response.body.token}}
//! ```
//!
//! Requests are separated by `###` (or `---`) lines; `#`/`//` start
//! comments; a `@name` annotation makes a request's response addressable
//! from later requests.
//!
//! # Resolving
//!
//! ```
//! use httpfile::chain::ResponseStore;
//! use httpfile::environment::Environment;
//! use httpfile::parser::parse;
//! use httpfile::variables::{resolve_request, ResolutionContext};
//!
//! let result = parse("GET {{BASE_URL}}/users");
//! assert!(result.success());
//!
//! let mut env = Environment::new("dev");
//! env.set("BASE_URL", "http://localhost:3000");
//! let store = ResponseStore::new();
//!
//! let ctx = ResolutionContext::new(Some(&env), &store);
//! let resolved = resolve_request(&result.requests[0], &ctx).unwrap();
//! assert_eq!(resolved.url, "http://localhost:3000/users");
//! ```

pub mod chain;
pub mod environment;
pub mod models;
pub mod multipart;
pub mod parser;
pub mod variables;

pub use chain::ResponseStore;
pub use environment::Environment;
pub use models::{HttpMethod, ParsedRequest, SavedResponse};
pub use parser::{parse, ParseResult};
pub use variables::{resolve_request, ResolutionContext, ResolveError};
