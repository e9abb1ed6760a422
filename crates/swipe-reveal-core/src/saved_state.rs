//! Opaque key-value container for persisted UI state.
//!
//! A [`SavedState`] is handed to components when their host is about to be
//! torn down (process death, configuration change) and handed back when it
//! is recreated. Components store whatever they need under their own keys;
//! the host only moves the container around, typically as a JSON string.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StateError, StateResult};
use crate::logging::targets;

/// A key-value container for persisted state.
///
/// Values are stored as JSON so that the container stays independent of the
/// types written into it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedState {
    entries: BTreeMap<String, serde_json::Value>,
}

impl SavedState {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StateResult<()> {
        let json = serde_json::to_value(value).map_err(|source| StateError::Encode {
            key: key.to_string(),
            source,
        })?;
        tracing::trace!(target: targets::SAVED_STATE, key, "stored entry");
        self.entries.insert(key.to_string(), json);
        Ok(())
    }

    /// Read the entry stored under `key`.
    ///
    /// Returns `Ok(None)` if there is no such entry and an error if the entry
    /// exists but does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StateResult<Option<T>> {
        let Some(value) = self.entries.get(key) else {
            return Ok(None);
        };
        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|source| StateError::Decode {
                key: key.to_string(),
                source,
            })
    }

    /// Returns true if an entry exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove the entry stored under `key`.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// All keys in the container, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the container holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the whole container to a JSON document.
    pub fn to_json(&self) -> StateResult<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Parse a container previously produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> StateResult<Self> {
        let entries = serde_json::from_str(json)?;
        Ok(Self { entries })
    }
}
