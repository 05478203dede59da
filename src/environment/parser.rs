//! `.env`-style environment file parser.
//!
//! Parses `KEY=value` lines into an [`Environment`]. Blank lines and `#`
//! comments are skipped, values may be single- or double-quoted, and keys
//! must be valid identifiers. Malformed lines are collected as per-line
//! errors without stopping the scan.

use super::models::Environment;
use once_cell::sync::Lazy;
use regex::Regex;

/// Valid environment variable key: identifier characters only.
static KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Failed to compile key regex"));

/// A malformed environment file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvParseError {
    /// Line number in the source file (1-based).
    pub line: usize,

    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for EnvParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Result of parsing environment file text.
///
/// Valid lines always land in `environment`, even when other lines failed;
/// `success()` reports whether the whole file parsed cleanly.
#[derive(Debug, Clone)]
pub struct EnvParseResult {
    /// The environment built from the lines that parsed.
    pub environment: Environment,

    /// Errors for the lines that did not.
    pub errors: Vec<EnvParseError>,
}

impl EnvParseResult {
    /// True when every line parsed cleanly.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses environment file text into variables.
///
/// # Arguments
///
/// * `content` - The file text
/// * `name` - Name for the resulting environment (derived from the file name
///   by the loader)
///
/// # Examples
///
/// ```
/// use httpfile::environment::parser::parse_env;
///
/// let result = parse_env("BASE_URL=http://localhost:3000\n# comment\nTOKEN=\"abc\"\n", "dev");
/// assert!(result.success());
/// assert_eq!(result.environment.get("TOKEN").unwrap(), "abc");
/// ```
pub fn parse_env(content: &str, name: &str) -> EnvParseResult {
    let mut environment = Environment::new(name);
    let mut errors = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line_number = i + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let eq_pos = match line.find('=') {
            Some(pos) => pos,
            None => {
                errors.push(EnvParseError {
                    line: line_number,
                    message: format!("Invalid format: expected KEY=VALUE, got \"{}\"", line),
                });
                continue;
            }
        };

        let key = line[..eq_pos].trim();
        let value = line[eq_pos + 1..].trim();

        if !KEY_REGEX.is_match(key) {
            errors.push(EnvParseError {
                line: line_number,
                message: format!(
                    "Invalid key: \"{}\". Keys must start with a letter or underscore and contain only alphanumeric or underscore characters",
                    key
                ),
            });
            continue;
        }

        let value = unquote(value);

        if environment.contains(key) {
            log::warn!(
                "duplicate variable \"{}\" in environment \"{}\"; last value will be used",
                key,
                name
            );
        }

        environment.set(key, value);
    }

    EnvParseResult {
        environment,
        errors,
    }
}

/// Strips one pair of matching single or double quotes from a value.
///
/// Inner content is left unmodified; unmatched or mixed quotes pass through.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 {
        if (value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\''))
        {
            return &value[1..value.len() - 1];
        }
    }
    value
}
