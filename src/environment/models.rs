//! Environment data model.
//!
//! An environment is a named set of string variables loaded independently of
//! any request execution; the resolution engine substitutes them into
//! `{{name}}` placeholders. Environments are loaded once and swapped
//! wholesale on switch, never mutated mid-resolution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A named set of variables for request resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Environment {
    /// Environment name (e.g., "default", "production").
    pub name: String,

    /// Variable key-value pairs. Keys are case-sensitive; duplicates in the
    /// source resolve last-write-wins.
    #[serde(default)]
    pub variables: HashMap<String, String>,

    /// Path of the file this environment was loaded from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

impl Environment {
    /// Creates a new empty environment with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: HashMap::new(),
            source_path: None,
        }
    }

    /// Creates a new environment with name and variables.
    pub fn with_variables(name: impl Into<String>, variables: HashMap<String, String>) -> Self {
        Self {
            name: name.into(),
            variables,
            source_path: None,
        }
    }

    /// Gets a variable value by name.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.variables.get(key)
    }

    /// Sets a variable value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Checks if a variable exists.
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Returns the number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Checks if the environment has no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
