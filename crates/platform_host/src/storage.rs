//! Preference and app-record storage contracts.

pub mod namespace;
pub mod prefs;
