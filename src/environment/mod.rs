//! Environment management.
//!
//! Environments are named variable sets parsed from `.env`-style files:
//! `KEY=value` lines with `#` comments, blank lines, and optional single or
//! double quotes around values. The loader is the only component in the
//! crate that touches the filesystem.

pub mod loader;
pub mod models;
pub mod parser;

pub use loader::{load_env_file, load_environments, select_default, EnvError, ENV_FILE_NAMES};
pub use models::Environment;
pub use parser::{parse_env, EnvParseError, EnvParseResult};
