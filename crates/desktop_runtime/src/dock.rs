//! Dock and desktop-surface pinning plus the app launcher overlay flag.
//!
//! The dock follows window lifecycle through [`DockRegistry::handle_window_event`]; it never
//! reaches back into the window manager. Dock clicks are resolved against a read-only view of
//! the window manager into a [`DockClickAction`] the caller applies.

use crate::{
    model::{AppKey, WindowId},
    window_manager::{WindowEvent, WindowManager},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DockRegistry {
    dock_app_keys: Vec<AppKey>,
    desktop_app_keys: Vec<AppKey>,
    launcher_open: bool,
}

impl DockRegistry {
    pub fn with_desktop_apps(desktop_app_keys: impl IntoIterator<Item = AppKey>) -> Self {
        let mut registry = Self::default();
        for app_key in desktop_app_keys {
            registry.pin_to_desktop(app_key);
        }
        registry
    }

    pub fn with_dock_apps(mut self, dock_app_keys: impl IntoIterator<Item = AppKey>) -> Self {
        for app_key in dock_app_keys {
            self.pin_to_dock(app_key);
        }
        self
    }

    pub fn dock_app_keys(&self) -> &[AppKey] {
        &self.dock_app_keys
    }

    pub fn desktop_app_keys(&self) -> &[AppKey] {
        &self.desktop_app_keys
    }

    pub fn is_launcher_open(&self) -> bool {
        self.launcher_open
    }

    pub fn is_pinned_to_dock(&self, app_key: AppKey) -> bool {
        self.dock_app_keys.contains(&app_key)
    }

    pub fn is_pinned_to_desktop(&self, app_key: AppKey) -> bool {
        self.desktop_app_keys.contains(&app_key)
    }

    pub fn toggle_launcher(&mut self) {
        self.launcher_open = !self.launcher_open;
    }

    pub fn close_launcher(&mut self) {
        self.launcher_open = false;
    }

    /// Returns `true` when the key was newly pinned.
    pub fn pin_to_dock(&mut self, app_key: AppKey) -> bool {
        pin(&mut self.dock_app_keys, app_key)
    }

    pub fn unpin_from_dock(&mut self, app_key: AppKey) -> bool {
        unpin(&mut self.dock_app_keys, app_key)
    }

    pub fn pin_to_desktop(&mut self, app_key: AppKey) -> bool {
        pin(&mut self.desktop_app_keys, app_key)
    }

    pub fn unpin_from_desktop(&mut self, app_key: AppKey) -> bool {
        unpin(&mut self.desktop_app_keys, app_key)
    }

    /// Keeps the dock in step with running windows: pin on open, unpin when the last instance
    /// of an app closes.
    pub fn handle_window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Opened { app_key, .. } => {
                self.pin_to_dock(app_key);
            }
            WindowEvent::Closed {
                app_key,
                last_instance: true,
                ..
            } => {
                self.unpin_from_dock(app_key);
            }
            WindowEvent::Closed { .. } => {}
        }
    }
}

fn pin(keys: &mut Vec<AppKey>, app_key: AppKey) -> bool {
    if keys.contains(&app_key) {
        return false;
    }
    keys.push(app_key);
    true
}

fn unpin(keys: &mut Vec<AppKey>, app_key: AppKey) -> bool {
    let before = keys.len();
    keys.retain(|key| *key != app_key);
    keys.len() != before
}

/// What a click on a dock entry should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockClickAction {
    Open(AppKey),
    Restore(WindowId),
    Focus(WindowId),
}

/// Resolves a dock click: open when nothing runs, restore the most recently minimized instance
/// when one exists, otherwise focus the topmost instance.
pub fn resolve_dock_click(windows: &WindowManager, app_key: AppKey) -> DockClickAction {
    if let Some(window_id) = windows.most_recently_minimized(app_key) {
        return DockClickAction::Restore(window_id);
    }
    match windows.topmost_instance_of(app_key) {
        Some(window_id) => DockClickAction::Focus(window_id),
        None => DockClickAction::Open(app_key),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use system_ui::IconName;

    use super::*;
    use crate::apps::{AppDescriptor, AppRegistry};

    #[test]
    fn pins_are_idempotent_and_keep_order() {
        let mut dock = DockRegistry::default();
        assert!(dock.pin_to_dock(AppKey::JsonTools));
        assert!(dock.pin_to_dock(AppKey::Pomodoro));
        assert!(!dock.pin_to_dock(AppKey::JsonTools));
        assert_eq!(dock.dock_app_keys(), &[AppKey::JsonTools, AppKey::Pomodoro]);

        assert!(dock.unpin_from_dock(AppKey::JsonTools));
        assert!(!dock.unpin_from_dock(AppKey::JsonTools));
        assert_eq!(dock.dock_app_keys(), &[AppKey::Pomodoro]);
    }

    #[test]
    fn desktop_and_dock_sets_are_independent() {
        let mut dock = DockRegistry::with_desktop_apps([AppKey::Pomodoro]);
        dock.pin_to_dock(AppKey::KanbanBoard);
        dock.unpin_from_desktop(AppKey::Pomodoro);

        assert!(dock.desktop_app_keys().is_empty());
        assert_eq!(dock.dock_app_keys(), &[AppKey::KanbanBoard]);
    }

    #[test]
    fn launcher_toggles() {
        let mut dock = DockRegistry::default();
        dock.toggle_launcher();
        assert!(dock.is_launcher_open());
        dock.toggle_launcher();
        assert!(!dock.is_launcher_open());
    }

    #[test]
    fn window_events_drive_auto_pinning() {
        let mut dock = DockRegistry::default();
        let opened = WindowEvent::Opened {
            window_id: WindowId(1),
            app_key: AppKey::CodeSnippets,
        };
        dock.handle_window_event(opened);
        dock.handle_window_event(opened);
        assert_eq!(dock.dock_app_keys(), &[AppKey::CodeSnippets]);

        dock.handle_window_event(WindowEvent::Closed {
            window_id: WindowId(1),
            app_key: AppKey::CodeSnippets,
            last_instance: false,
        });
        assert_eq!(dock.dock_app_keys(), &[AppKey::CodeSnippets]);

        dock.handle_window_event(WindowEvent::Closed {
            window_id: WindowId(2),
            app_key: AppKey::CodeSnippets,
            last_instance: true,
        });
        assert!(dock.dock_app_keys().is_empty());
    }

    #[test]
    fn dock_click_resolution_follows_window_state() {
        let snippets =
            AppDescriptor::new(AppKey::CodeSnippets, "Code Snippets", "Snippets", IconName::Code);
        let registry = AppRegistry::new(vec![snippets]).expect("uncapped registry");
        let mut windows = WindowManager::default();
        assert_eq!(
            resolve_dock_click(&windows, AppKey::CodeSnippets),
            DockClickAction::Open(AppKey::CodeSnippets)
        );

        let mut ids = Vec::new();
        for _ in 0..3 {
            match windows.open_app(&registry, AppKey::CodeSnippets) {
                Ok(WindowEvent::Opened { window_id, .. }) => ids.push(window_id),
                other => panic!("unexpected open result: {other:?}"),
            }
        }
        windows.focus_app(ids[0]).expect("focus");
        assert_eq!(
            resolve_dock_click(&windows, AppKey::CodeSnippets),
            DockClickAction::Focus(ids[0])
        );

        windows.minimize_app(ids[2]).expect("minimize");
        windows.minimize_app(ids[1]).expect("minimize");
        assert_eq!(
            resolve_dock_click(&windows, AppKey::CodeSnippets),
            DockClickAction::Restore(ids[1])
        );
    }
}
