//! Desktop runtime persistence adapters for boot hydration and lightweight local preferences.
//!
//! Only preferences, theme, and desktop icon pins are stored. Open windows and the dock are
//! session state and start empty on every boot.

use platform_host::{load_pref_with, save_pref_with, PrefsError, PrefsStore};

use crate::model::{DesktopSnapshot, DesktopState, DesktopTheme, DESKTOP_LAYOUT_SCHEMA_VERSION};

const SNAPSHOT_KEY: &str = "vdesk.desktop.v1";
const THEME_KEY: &str = "vdesk.theme.v1";

/// Loads the boot snapshot with any separately stored theme applied on top.
///
/// Unreadable entries are logged and skipped so a corrupt record never blocks boot.
pub fn load_boot_snapshot<S: PrefsStore + ?Sized>(store: &S) -> Option<DesktopSnapshot> {
    let snapshot = match load_pref_with::<_, DesktopSnapshot>(store, SNAPSHOT_KEY) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            leptos::logging::warn!("desktop snapshot load failed: {err}");
            None
        }
    };
    let theme = match load_pref_with::<_, DesktopTheme>(store, THEME_KEY) {
        Ok(theme) => theme,
        Err(err) => {
            leptos::logging::warn!("theme load failed: {err}");
            None
        }
    };

    match (snapshot, theme) {
        (None, None) => None,
        (Some(mut snapshot), theme) => {
            if let Some(theme) = theme {
                snapshot.theme = theme;
            }
            Some(snapshot)
        }
        (None, Some(theme)) => {
            let mut snapshot = DesktopState::default().snapshot();
            snapshot.theme = theme;
            Some(snapshot)
        }
    }
}

/// Persists the desktop snapshot (preferences and desktop icon pins).
pub fn persist_layout_snapshot<S: PrefsStore + ?Sized>(
    store: &S,
    state: &DesktopState,
) -> Result<(), PrefsError> {
    let snapshot = state.snapshot();
    debug_assert_eq!(snapshot.schema_version, DESKTOP_LAYOUT_SCHEMA_VERSION);
    save_pref_with(store, SNAPSHOT_KEY, &snapshot)
}

/// Persists the desktop theme and wallpaper.
pub fn persist_theme<S: PrefsStore + ?Sized>(
    store: &S,
    theme: &DesktopTheme,
) -> Result<(), PrefsError> {
    save_pref_with(store, THEME_KEY, theme)
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AppKey, ThemeKey};

    #[test]
    fn empty_store_has_no_boot_snapshot() {
        assert_eq!(load_boot_snapshot(&MemoryPrefsStore::default()), None);
    }

    #[test]
    fn layout_and_theme_round_trip_through_prefs() {
        let store = MemoryPrefsStore::default();
        let mut state = DesktopState::default();
        state.dock.unpin_from_desktop(AppKey::Pomodoro);
        persist_layout_snapshot(&store, &state).expect("persist layout");
        persist_theme(
            &store,
            &DesktopTheme {
                theme: ThemeKey::MacOs,
                wallpaper_id: "dunes".to_string(),
            },
        )
        .expect("persist theme");

        let snapshot = load_boot_snapshot(&store).expect("snapshot");
        assert_eq!(snapshot.desktop_app_keys, vec![AppKey::MarkdownNotes]);
        assert_eq!(snapshot.theme.theme, ThemeKey::MacOs);
        assert_eq!(snapshot.theme.wallpaper_id, "dunes");
    }

    #[test]
    fn theme_alone_builds_a_default_snapshot() {
        let store = MemoryPrefsStore::default();
        persist_theme(
            &store,
            &DesktopTheme {
                theme: ThemeKey::MacOs,
                ..DesktopTheme::default()
            },
        )
        .expect("persist theme");

        let snapshot = load_boot_snapshot(&store).expect("snapshot");
        assert_eq!(snapshot.theme.theme, ThemeKey::MacOs);
        assert_eq!(
            snapshot.desktop_app_keys,
            DesktopState::default().snapshot().desktop_app_keys
        );
    }

    #[test]
    fn corrupt_snapshot_is_skipped() {
        let store = MemoryPrefsStore::default();
        store.save_pref(SNAPSHOT_KEY, "{not json").expect("raw save");
        assert_eq!(load_boot_snapshot(&store), None);
    }
}
