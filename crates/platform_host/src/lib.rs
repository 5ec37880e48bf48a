//! Host-neutral storage contracts shared by the desktop runtime and browser adapters.
//!
//! Concrete browser adapters live in `platform_host_web`. Everything here compiles and runs
//! natively so runtime tests can inject [`MemoryPrefsStore`] instead of `localStorage`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;

pub use storage::namespace::{app_storage_key, APP_STORAGE_PREFIX};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsError, PrefsStore,
};
