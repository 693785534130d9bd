//! Parameterized configuration key resolution
//!
//! Alert definitions may reference runtime configuration through
//! `{{path.to.value}}` tokens instead of literal values. The resolver
//! extracts those paths, remembers which keys were parameterized, and
//! answers value lookups against the injected configuration table.

use std::collections::HashMap;

/// Tracks parameterized lookup keys and resolves them against
/// the runtime configuration table
#[derive(Debug, Default)]
pub struct LookupResolver {
    /// Keys discovered through parameterized references, in discovery order
    keys: Vec<String>,
    /// Runtime configuration values keyed by canonical path
    values: HashMap<String, String>,
}

impl LookupResolver {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// Replace the runtime configuration value table
    pub fn set_values(&mut self, values: HashMap<String, String>) {
        self.values = values;
    }

    /// Resolve a raw configuration key.
    ///
    /// If the key carries a `{{path}}` token, the inner path is registered
    /// as a lookup key (once) and returned as the canonical key. Only the
    /// first token is extracted. A key without a token is a literal and is
    /// returned unchanged.
    pub fn resolve_key(&mut self, raw: &str) -> String {
        let path = regex::Regex::new(r"\{\{(\S+?)\}\}")
            .ok()
            .and_then(|re| re.captures(raw))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        match path {
            Some(path) => {
                tracing::debug!(raw = %raw, path = %path, "found parameterized lookup key");
                if !self.keys.iter().any(|k| k == &path) {
                    self.keys.push(path.clone());
                }
                path
            }
            None => raw.to_string(),
        }
    }

    /// Resolve a key to its runtime value.
    ///
    /// A key that was never registered via [`resolve_key`](Self::resolve_key)
    /// is a literal and comes back unchanged. A registered key is looked up
    /// in the value table; `None` marks a registered key with no value.
    pub fn resolve_value<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        if !self.keys.iter().any(|k| k == key) {
            return Some(key);
        }
        self.values.get(key).map(String::as_str)
    }

    /// Lookup keys discovered so far, in discovery order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}
