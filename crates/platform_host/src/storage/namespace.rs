//! Key namespacing for hosted mini-app records.
//!
//! Every hosted app writes its own JSON records under `vdesk.app.<namespace>.<key>`; the window
//! manager never reads them.

/// Prefix shared by every hosted-app storage key.
pub const APP_STORAGE_PREFIX: &str = "vdesk.app";

/// Builds the storage key for `key` inside an app's `namespace`.
pub fn app_storage_key(namespace: &str, key: &str) -> String {
    format!("{APP_STORAGE_PREFIX}.{namespace}.{key}")
}
