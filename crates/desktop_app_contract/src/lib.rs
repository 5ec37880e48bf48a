//! Shared contract types between the desktop window manager runtime and hosted mini-apps.
//!
//! The window manager treats every hosted app as an opaque renderable unit: it hands the app an
//! [`AppMountContext`] and receives either a view or an [`AppMountError`]. Failures are isolated
//! per window by the runtime's error boundary.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::View;
use platform_host::{load_pref_with, save_pref_with, PrefsError, PrefsStore};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Stable identifier for a runtime-managed window instance.
pub type WindowRuntimeId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Context handed to an app when its window body is mounted.
pub struct AppMountContext {
    /// Stable storage namespace of the app type (also its registry key token).
    pub app_namespace: &'static str,
    /// Runtime window instance id hosting this view.
    pub window_id: WindowRuntimeId,
}

impl AppMountContext {
    /// Returns the namespaced storage key for one of this app's records.
    pub fn storage_key(&self, key: &str) -> String {
        platform_host::app_storage_key(self.app_namespace, key)
    }

    /// Loads one of this app's JSON records from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`AppMountError::Storage`] when the store or decoding fails.
    pub fn load_record<S: PrefsStore + ?Sized, T: DeserializeOwned>(
        &self,
        store: &S,
        key: &str,
    ) -> Result<Option<T>, AppMountError> {
        Ok(load_pref_with(store, &self.storage_key(key))?)
    }

    /// Saves one of this app's JSON records to `store`.
    ///
    /// # Errors
    ///
    /// Returns [`AppMountError::Storage`] when encoding or the store fails.
    pub fn save_record<S: PrefsStore + ?Sized, T: Serialize>(
        &self,
        store: &S,
        key: &str,
        value: &T,
    ) -> Result<(), AppMountError> {
        Ok(save_pref_with(store, &self.storage_key(key), value)?)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Render-time failure of a hosted app.
pub enum AppMountError {
    /// The app's persisted records could not be read or written.
    #[error("app storage failed: {0}")]
    Storage(String),
    /// The app rejected its mount context or failed while building its view.
    #[error("app failed to render: {0}")]
    Render(String),
}

impl From<PrefsError> for AppMountError {
    fn from(err: PrefsError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Mount function signature implemented by hosted apps.
pub type AppMountFn = fn(AppMountContext) -> Result<View, AppMountError>;

#[derive(Debug, Clone, Copy)]
/// Renderable-unit factory registered for one app type.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    ///
    /// # Errors
    ///
    /// Propagates the app's own [`AppMountError`].
    pub fn mount(self, context: AppMountContext) -> Result<View, AppMountError> {
        (self.mount_fn)(context)
    }
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryPrefsStore;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Draft {
        body: String,
    }

    fn context() -> AppMountContext {
        AppMountContext {
            app_namespace: "markdown-notes",
            window_id: 7,
        }
    }

    #[test]
    fn records_are_stored_under_the_app_namespace() {
        let store = MemoryPrefsStore::default();
        let ctx = context();
        ctx.save_record(
            &store,
            "draft",
            &Draft {
                body: "# hello".to_string(),
            },
        )
        .expect("save record");

        assert_eq!(
            store
                .load_pref("vdesk.app.markdown-notes.draft")
                .expect("raw load"),
            Some("{\"body\":\"# hello\"}".to_string())
        );
        let loaded: Option<Draft> = ctx.load_record(&store, "draft").expect("load record");
        assert_eq!(loaded.map(|d| d.body), Some("# hello".to_string()));
    }

    #[test]
    fn storage_errors_become_mount_errors() {
        let store = MemoryPrefsStore::default();
        store
            .save_pref("vdesk.app.markdown-notes.draft", "[")
            .expect("save raw");
        let err = context()
            .load_record::<_, Draft>(&store, "draft")
            .expect_err("decode fails");
        assert!(matches!(err, AppMountError::Storage(_)));
    }
}
