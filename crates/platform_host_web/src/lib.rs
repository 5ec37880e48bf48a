//! Browser (`wasm32`) implementations of [`platform_host`] storage contracts.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;

pub use storage::local_prefs::WebPrefsStore;

/// Returns the preference store the desktop runtime should use on this target.
pub fn prefs_store() -> WebPrefsStore {
    WebPrefsStore
}
