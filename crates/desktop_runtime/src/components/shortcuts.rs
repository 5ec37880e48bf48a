//! Keyboard event adapters shared by the global shortcut listener and overlay handlers.

use crate::spotlight::{KeyChord, SpotlightKey};

/// Detaches key and modifier state from a DOM keyboard event.
pub(super) fn key_chord(ev: &web_sys::KeyboardEvent) -> KeyChord {
    KeyChord {
        key: ev.key(),
        ctrl: ev.ctrl_key(),
        meta: ev.meta_key(),
        alt: ev.alt_key(),
        shift: ev.shift_key(),
    }
}

/// Returns the spotlight navigation key for an unmodified key press.
pub(super) fn spotlight_key(ev: &web_sys::KeyboardEvent) -> Option<SpotlightKey> {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return None;
    }
    SpotlightKey::from_key_name(&ev.key())
}
