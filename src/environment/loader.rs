//! Environment file loader.
//!
//! The only filesystem access in the crate: reads `.env`-style files and
//! hands them to the text parser. Discovery probes a fixed list of
//! well-known file names in a directory; files that fail to read or parse
//! are logged and skipped so one bad file does not hide the others.

use super::models::Environment;
use super::parser::{parse_env, EnvParseError};
use std::fs;
use std::io;
use std::path::Path;

/// Well-known environment file names, probed in order.
pub const ENV_FILE_NAMES: &[&str] = &[
    ".env",
    ".env.local",
    ".env.development",
    ".env.production",
    ".env.test",
];

/// Errors that can occur while loading an environment file.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvError {
    /// IO error occurred while reading the file.
    IoError(String),

    /// The file content had malformed lines.
    ParseError {
        /// Display name of the offending file
        file: String,
        /// The collected per-line errors
        errors: Vec<EnvParseError>,
    },
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::IoError(msg) => write!(f, "IO error: {}", msg),
            EnvError::ParseError { file, errors } => {
                write!(f, "Failed to parse {}: ", file)?;
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "{}", messages.join(", "))
            }
        }
    }
}

impl std::error::Error for EnvError {}

impl From<io::Error> for EnvError {
    fn from(err: io::Error) -> Self {
        EnvError::IoError(err.to_string())
    }
}

/// Loads and parses a single environment file.
///
/// The environment name is derived from the file name (`.env` → "default",
/// `.env.production` → "production").
///
/// # Arguments
///
/// * `path` - Path to the environment file
///
/// # Returns
///
/// * `Ok(Environment)` - the parsed environment with `source_path` set
/// * `Err(EnvError)` - the file could not be read or had malformed lines
pub fn load_env_file(path: &Path) -> Result<Environment, EnvError> {
    let content = fs::read_to_string(path)?;
    let name = environment_name_from_path(path);

    let result = parse_env(&content, &name);
    if !result.success() {
        return Err(EnvError::ParseError {
            file: path.display().to_string(),
            errors: result.errors,
        });
    }

    let mut environment = result.environment;
    environment.source_path = Some(path.to_path_buf());
    Ok(environment)
}

/// Loads every well-known environment file present in a directory.
///
/// Missing files are skipped silently; unreadable or malformed files are
/// logged and skipped. Returns the environments in probe order.
pub fn load_environments(dir: &Path) -> Vec<Environment> {
    let mut environments = Vec::new();

    for filename in ENV_FILE_NAMES {
        let path = dir.join(filename);
        if !path.is_file() {
            continue;
        }

        match load_env_file(&path) {
            Ok(env) => {
                log::info!("loaded environment \"{}\" from {}", env.name, filename);
                environments.push(env);
            }
            Err(err) => {
                log::error!("skipping {}: {}", filename, err);
            }
        }
    }

    environments
}

/// Picks the environment to activate by default: "default" when present,
/// otherwise the first loaded.
pub fn select_default(environments: &[Environment]) -> Option<&Environment> {
    environments
        .iter()
        .find(|e| e.name == "default")
        .or_else(|| environments.first())
}

/// Derives an environment name from a file name.
///
/// `.env` maps to "default"; anything else takes its last dot-segment
/// (`.env.production` → "production").
pub fn environment_name_from_path(path: &Path) -> String {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(".env");

    if filename == ".env" {
        return "default".to_string();
    }

    filename
        .rsplit('.')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("default")
        .to_string()
}
