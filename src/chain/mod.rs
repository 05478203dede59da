//! Chain-response store.
//!
//! Responses of named requests are kept here so later requests can reference
//! them through `{{name.response...}}` placeholders. The store is a plain
//! in-memory map owned by the caller; persistence, if any, is an external
//! concern. Usage is single-writer/multiple-reader: a response is written
//! once when its request completes and read by any number of subsequent
//! resolutions, which only take `&self`.

use crate::models::SavedResponse;
use std::collections::HashMap;

/// Named map of saved responses for request chaining.
#[derive(Debug, Clone, Default)]
pub struct ResponseStore {
    responses: HashMap<String, SavedResponse>,
}

impl ResponseStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    /// Saves a response under a request name, replacing any previous entry.
    ///
    /// The raw body is parsed as JSON when possible (see
    /// [`SavedResponse::from_raw`]).
    pub fn save(
        &mut self,
        name: impl Into<String>,
        status: u16,
        headers: HashMap<String, String>,
        raw_body: impl Into<String>,
    ) {
        let name = name.into();
        let saved = SavedResponse::from_raw(name.clone(), status, headers, raw_body);
        log::info!("saved response \"{}\" (status {})", name, status);
        self.responses.insert(name, saved);
    }

    /// Inserts an already-built response snapshot.
    pub fn insert(&mut self, response: SavedResponse) {
        self.responses.insert(response.name.clone(), response);
    }

    /// Gets a saved response by name.
    pub fn get(&self, name: &str) -> Option<&SavedResponse> {
        self.responses.get(name)
    }

    /// Removes a saved response, returning true if it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.responses.remove(name).is_some()
    }

    /// Removes every saved response.
    pub fn clear(&mut self) {
        self.responses.clear();
    }

    /// Names of all saved responses.
    pub fn names(&self) -> Vec<&str> {
        self.responses.keys().map(|s| s.as_str()).collect()
    }

    /// Number of saved responses.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Checks if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}
