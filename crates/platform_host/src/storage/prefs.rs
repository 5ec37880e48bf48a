//! Lightweight preference storage contracts and adapters.
//!
//! Browser `localStorage` is synchronous, so the contract is too: every call completes before the
//! next UI event is processed.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors surfaced by [`PrefsStore`] implementations and the typed helpers.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// The backing storage is not reachable (for example, disabled `localStorage`).
    #[error("preference storage unavailable")]
    Unavailable,
    /// The value could not be encoded as JSON.
    #[error("failed to serialize preference `{key}`: {source}")]
    Serialize {
        /// Preference key being written.
        key: String,
        /// Underlying encoder error.
        source: serde_json::Error,
    },
    /// The stored JSON text did not match the requested type.
    #[error("failed to deserialize preference `{key}`: {source}")]
    Deserialize {
        /// Preference key being read.
        key: String,
        /// Underlying decoder error.
        source: serde_json::Error,
    },
    /// The backing storage rejected the operation.
    #[error("preference storage failed: {0}")]
    Storage(String),
}

/// Host service for lightweight preference values (JSON stored as text per key).
pub trait PrefsStore {
    /// Loads a raw JSON string for a preference key.
    fn load_pref(&self, key: &str) -> Result<Option<String>, PrefsError>;

    /// Saves a raw JSON string for a preference key.
    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), PrefsError>;

    /// Deletes a preference key.
    fn delete_pref(&self, key: &str) -> Result<(), PrefsError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for unsupported targets.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref(&self, _key: &str) -> Result<Option<String>, PrefsError> {
        Ok(None)
    }

    fn save_pref(&self, _key: &str, _raw_json: &str) -> Result<(), PrefsError> {
        Ok(())
    }

    fn delete_pref(&self, _key: &str) -> Result<(), PrefsError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string. Clones share the same map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), PrefsError> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn delete_pref(&self, key: &str) -> Result<(), PrefsError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, PrefsError> {
    let Some(raw) = store.load_pref(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|source| PrefsError::Deserialize {
        key: key.to_string(),
        source,
    })?;
    Ok(Some(value))
}

/// Serializes and saves a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or store save fails.
pub fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), PrefsError> {
    let raw = serde_json::to_string(value).map_err(|source| PrefsError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.save_pref(key, &raw)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct DockPref {
        pinned: Vec<String>,
    }

    #[test]
    fn memory_store_shares_state_between_clones() {
        let store = MemoryPrefsStore::default();
        let clone = store.clone();

        store.save_pref("desk.theme", "\"ubuntu\"").expect("save");
        assert_eq!(
            clone.load_pref("desk.theme").expect("load"),
            Some("\"ubuntu\"".to_string())
        );

        clone.delete_pref("desk.theme").expect("delete");
        assert!(store.is_empty());
    }

    #[test]
    fn typed_helpers_read_back_structured_values() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;
        save_pref_with(
            store_obj,
            "desk.dock",
            &DockPref {
                pinned: vec!["pomodoro".to_string()],
            },
        )
        .expect("save typed pref");

        let loaded: Option<DockPref> = load_pref_with(store_obj, "desk.dock").expect("load");
        assert_eq!(
            loaded,
            Some(DockPref {
                pinned: vec!["pomodoro".to_string()]
            })
        );
    }

    #[test]
    fn malformed_json_reports_the_offending_key() {
        let store = MemoryPrefsStore::default();
        store.save_pref("desk.dock", "{not json").expect("save raw");

        let err = load_pref_with::<_, DockPref>(&store, "desk.dock").expect_err("decode fails");
        assert!(matches!(err, PrefsError::Deserialize { ref key, .. } if key == "desk.dock"));
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        assert_eq!(store.load_pref("k").expect("load"), None);
        store.save_pref("k", "{}").expect("save");
        store.delete_pref("k").expect("delete");
    }
}
