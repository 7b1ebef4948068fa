//! Resolved application properties.
//!
//! An ordered string→string map populated by the configuration loader and
//! read-only once stack definition begins. Accessors fail with
//! [`PropError::Missing`] for absent keys; there is no removal operation.

use super::error::PropError;
use indexmap::IndexMap;

/// The resolved property set for one provisioning run.
///
/// Last write for a key wins; values are never merged or appended.
#[derive(Debug, Clone, Default)]
pub struct AppProps {
    values: IndexMap<String, String>,
}

impl AppProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a property. Always succeeds.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Presence-checking lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value for `key`, or [`PropError::Missing`].
    pub fn get_string(&self, key: &str) -> Result<String, PropError> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| PropError::Missing(key.to_string()))
    }

    /// Parse the value for `key` as a boolean.
    ///
    /// Accepts `true`/`false` case-insensitively. A present but malformed
    /// value fails with [`PropError::NotABoolean`] — it is never silently
    /// coerced to false.
    pub fn get_bool(&self, key: &str) -> Result<bool, PropError> {
        let value = self.get_string(key)?;
        match value.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(PropError::NotABoolean {
                key: key.to_string(),
                value,
            }),
        }
    }

    /// Split the value for `key` on commas into trimmed entries.
    ///
    /// A present-but-empty value yields an empty list.
    pub fn get_string_list(&self, key: &str) -> Result<Vec<String>, PropError> {
        let value = self.get_string(key)?;
        if value.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(value.split(',').map(|s| s.trim().to_string()).collect())
    }

    /// Iterate properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
