//! Window lifecycle, focus stacking, and minimize/maximize bookkeeping.
//!
//! [`WindowManager`] is the only owner of open window instances. Every operation either applies
//! completely or returns an error with the manager left untouched, and successful open/close
//! transitions are reported as [`WindowEvent`]s for other state owners (the dock) to consume.

use thiserror::Error;

use crate::{
    apps::AppRegistry,
    model::{AppKey, ResizeEdge, WindowId, WindowInstance, WindowRect},
};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 300;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 200;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("window {0} is not open")]
    WindowNotFound(WindowId),
    #[error("maximum instances reached for `{app_key}` ({max})")]
    CapacityExceeded { app_key: AppKey, max: usize },
    #[error("app `{0}` is not registered")]
    UnknownApp(AppKey),
}

/// Lifecycle signal emitted by the window manager after a successful open or close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Opened {
        window_id: WindowId,
        app_key: AppKey,
    },
    Closed {
        window_id: WindowId,
        app_key: AppKey,
        /// `true` when no other instance of `app_key` remains open.
        last_instance: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowManager {
    next_window_id: u64,
    open_instances: Vec<WindowInstance>,
    /// Back to front; the last id is the focused window.
    focus_stack: Vec<WindowId>,
    /// Kept in minimization order.
    minimized: Vec<WindowId>,
    maximized: Vec<WindowId>,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            open_instances: Vec::new(),
            focus_stack: Vec::new(),
            minimized: Vec::new(),
            maximized: Vec::new(),
        }
    }
}

impl WindowManager {
    /// Opens a new instance of `app_key` on top of the stack.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::UnknownApp`] when `registry` has no entry for the key and
    /// [`WindowError::CapacityExceeded`] when the descriptor's instance cap is already reached.
    pub fn open_app(
        &mut self,
        registry: &AppRegistry,
        app_key: AppKey,
    ) -> Result<WindowEvent, WindowError> {
        let descriptor = registry
            .get(app_key)
            .ok_or(WindowError::UnknownApp(app_key))?;
        if let Some(max) = descriptor.max_instances {
            if self.instance_count(app_key) >= max.get() {
                return Err(WindowError::CapacityExceeded {
                    app_key,
                    max: max.get(),
                });
            }
        }

        let window_id = WindowId(self.next_window_id);
        self.next_window_id = self.next_window_id.saturating_add(1);
        self.open_instances.push(WindowInstance {
            id: window_id,
            app_key,
            rect: WindowRect::cascade(window_id.0),
        });
        self.focus_stack.push(window_id);
        Ok(WindowEvent::Opened { window_id, app_key })
    }

    /// Closes `window_id` and drops it from every stacking and display set.
    pub fn close_app(&mut self, window_id: WindowId) -> Result<WindowEvent, WindowError> {
        let index = self.index_of(window_id)?;
        let closed = self.open_instances.remove(index);
        self.focus_stack.retain(|id| *id != window_id);
        self.minimized.retain(|id| *id != window_id);
        self.maximized.retain(|id| *id != window_id);
        Ok(WindowEvent::Closed {
            window_id,
            app_key: closed.app_key,
            last_instance: self.instance_count(closed.app_key) == 0,
        })
    }

    /// Raises `window_id` to the top of the stack. A minimized window stays minimized.
    pub fn focus_app(&mut self, window_id: WindowId) -> Result<(), WindowError> {
        self.index_of(window_id)?;
        self.raise(window_id);
        Ok(())
    }

    pub fn minimize_app(&mut self, window_id: WindowId) -> Result<(), WindowError> {
        self.index_of(window_id)?;
        if !self.minimized.contains(&window_id) {
            self.minimized.push(window_id);
        }
        Ok(())
    }

    /// Un-minimizes `window_id` and raises it to the top of the stack.
    pub fn restore_app(&mut self, window_id: WindowId) -> Result<(), WindowError> {
        self.index_of(window_id)?;
        self.minimized.retain(|id| *id != window_id);
        self.raise(window_id);
        Ok(())
    }

    /// Flips the maximized flag and returns the new value. The stored rect is left alone so
    /// un-maximizing returns the window to its last bounds.
    pub fn toggle_maximize_app(&mut self, window_id: WindowId) -> Result<bool, WindowError> {
        self.index_of(window_id)?;
        if let Some(pos) = self.maximized.iter().position(|id| *id == window_id) {
            self.maximized.remove(pos);
            Ok(false)
        } else {
            self.maximized.push(window_id);
            Ok(true)
        }
    }

    pub fn set_rect(&mut self, window_id: WindowId, rect: WindowRect) -> Result<(), WindowError> {
        let index = self.index_of(window_id)?;
        self.open_instances[index].rect = rect.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
        Ok(())
    }

    /// Open instances in creation order.
    pub fn instances(&self) -> &[WindowInstance] {
        &self.open_instances
    }

    pub fn instance(&self, window_id: WindowId) -> Option<&WindowInstance> {
        self.open_instances.iter().find(|w| w.id == window_id)
    }

    pub fn instances_of(&self, app_key: AppKey) -> impl Iterator<Item = &WindowInstance> + '_ {
        self.open_instances
            .iter()
            .filter(move |w| w.app_key == app_key)
    }

    pub fn instance_count(&self, app_key: AppKey) -> usize {
        self.instances_of(app_key).count()
    }

    pub fn is_empty(&self) -> bool {
        self.open_instances.is_empty()
    }

    pub fn focus_stack(&self) -> &[WindowId] {
        &self.focus_stack
    }

    pub fn minimized(&self) -> &[WindowId] {
        &self.minimized
    }

    pub fn maximized(&self) -> &[WindowId] {
        &self.maximized
    }

    pub fn is_minimized(&self, window_id: WindowId) -> bool {
        self.minimized.contains(&window_id)
    }

    pub fn is_maximized(&self, window_id: WindowId) -> bool {
        self.maximized.contains(&window_id)
    }

    /// Stacking position of `window_id` (0 = furthest back).
    pub fn stack_position(&self, window_id: WindowId) -> Option<usize> {
        self.focus_stack.iter().position(|id| *id == window_id)
    }

    /// Topmost non-minimized window; it receives pointer priority.
    pub fn topmost_visible(&self) -> Option<WindowId> {
        self.focus_stack
            .iter()
            .rev()
            .copied()
            .find(|id| !self.is_minimized(*id))
    }

    pub fn is_focused(&self, window_id: WindowId) -> bool {
        self.topmost_visible() == Some(window_id)
    }

    /// Highest-stacked instance of `app_key`, minimized or not.
    pub fn topmost_instance_of(&self, app_key: AppKey) -> Option<WindowId> {
        self.focus_stack
            .iter()
            .rev()
            .copied()
            .find(|id| self.instance(*id).is_some_and(|w| w.app_key == app_key))
    }

    /// Most recently minimized instance of `app_key`.
    pub fn most_recently_minimized(&self, app_key: AppKey) -> Option<WindowId> {
        self.minimized
            .iter()
            .rev()
            .copied()
            .find(|id| self.instance(*id).is_some_and(|w| w.app_key == app_key))
    }

    fn index_of(&self, window_id: WindowId) -> Result<usize, WindowError> {
        self.open_instances
            .iter()
            .position(|w| w.id == window_id)
            .ok_or(WindowError::WindowNotFound(window_id))
    }

    fn raise(&mut self, window_id: WindowId) {
        self.focus_stack.retain(|id| *id != window_id);
        self.focus_stack.push(window_id);
    }
}

/// Applies resize deltas for a given edge/corner drag, clamped to the minimum window size.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    let resized = match edge {
        ResizeEdge::East => WindowRect {
            w: start.w + dx,
            ..start
        },
        ResizeEdge::South => WindowRect {
            h: start.h + dy,
            ..start
        },
        ResizeEdge::SouthEast => WindowRect {
            w: start.w + dx,
            h: start.h + dy,
            ..start
        },
    };
    resized.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use std::num::NonZeroUsize;

    use super::*;

    /// Built-in catalog with Code Snippets uncapped, for multi-instance cases.
    fn registry() -> AppRegistry {
        AppRegistry::from_caps(AppRegistry::builtin().iter().map(|entry| {
            let cap = match entry.key {
                AppKey::CodeSnippets => None,
                _ => entry.max_instances.map(NonZeroUsize::get),
            };
            (*entry, cap)
        }))
        .expect("valid registry")
    }

    fn open(manager: &mut WindowManager, app_key: AppKey) -> WindowId {
        match manager.open_app(&registry(), app_key) {
            Ok(WindowEvent::Opened { window_id, .. }) => window_id,
            other => panic!("unexpected open result: {other:?}"),
        }
    }

    #[test]
    fn open_appends_instance_and_focuses_it() {
        let mut manager = WindowManager::default();
        let notes = open(&mut manager, AppKey::MarkdownNotes);
        let json = open(&mut manager, AppKey::JsonTools);

        assert_eq!(manager.focus_stack(), &[notes, json]);
        assert_eq!(manager.topmost_visible(), Some(json));
        assert!(manager.minimized().is_empty());
        assert!(manager.maximized().is_empty());
    }

    #[test]
    fn window_ids_are_never_reused() {
        let mut manager = WindowManager::default();
        let first = open(&mut manager, AppKey::Pomodoro);
        manager.close_app(first).expect("close");
        let second = open(&mut manager, AppKey::Pomodoro);
        assert!(second > first);
    }

    #[test]
    fn capacity_rejection_leaves_manager_untouched() {
        let mut manager = WindowManager::default();
        open(&mut manager, AppKey::Pomodoro);
        let before = manager.clone();

        let err = manager
            .open_app(&AppRegistry::builtin(), AppKey::Pomodoro)
            .expect_err("cap of one");

        assert_eq!(
            err,
            WindowError::CapacityExceeded {
                app_key: AppKey::Pomodoro,
                max: 1
            }
        );
        assert_eq!(manager, before);
    }

    #[test]
    fn uncapped_entries_open_repeatedly() {
        let mut manager = WindowManager::default();
        for _ in 0..5 {
            open(&mut manager, AppKey::CodeSnippets);
        }
        assert_eq!(manager.instance_count(AppKey::CodeSnippets), 5);
    }

    #[test]
    fn unknown_app_in_injected_registry_is_rejected() {
        let registry = AppRegistry::new(vec![]).expect("empty registry");
        let mut manager = WindowManager::default();
        assert_eq!(
            manager.open_app(&registry, AppKey::Pomodoro),
            Err(WindowError::UnknownApp(AppKey::Pomodoro))
        );
        assert!(manager.is_empty());
    }

    #[test]
    fn focus_does_not_unminimize() {
        let mut manager = WindowManager::default();
        let a = open(&mut manager, AppKey::CodeSnippets);
        let b = open(&mut manager, AppKey::CodeSnippets);
        manager.minimize_app(a).expect("minimize");
        manager.focus_app(a).expect("focus");

        assert_eq!(manager.focus_stack(), &[b, a]);
        assert!(manager.is_minimized(a));
        assert_eq!(manager.topmost_visible(), Some(b));
    }

    #[test]
    fn minimize_is_idempotent_and_keeps_first_position() {
        let mut manager = WindowManager::default();
        let a = open(&mut manager, AppKey::CodeSnippets);
        let b = open(&mut manager, AppKey::CodeSnippets);
        manager.minimize_app(a).expect("minimize a");
        manager.minimize_app(b).expect("minimize b");
        manager.minimize_app(a).expect("minimize a again");

        assert_eq!(manager.minimized(), &[a, b]);
        assert_eq!(manager.most_recently_minimized(AppKey::CodeSnippets), Some(b));
    }

    #[test]
    fn restore_unminimizes_and_raises() {
        let mut manager = WindowManager::default();
        let a = open(&mut manager, AppKey::CodeSnippets);
        let b = open(&mut manager, AppKey::JsonTools);
        manager.minimize_app(a).expect("minimize");
        manager.restore_app(a).expect("restore");

        assert!(!manager.is_minimized(a));
        assert_eq!(manager.focus_stack(), &[b, a]);
    }

    #[test]
    fn toggle_maximize_preserves_rect() {
        let mut manager = WindowManager::default();
        let a = open(&mut manager, AppKey::JsonTools);
        let rect = manager.instance(a).expect("open").rect;

        assert_eq!(manager.toggle_maximize_app(a), Ok(true));
        assert!(manager.is_maximized(a));
        assert_eq!(manager.toggle_maximize_app(a), Ok(false));
        assert_eq!(manager.instance(a).map(|w| w.rect), Some(rect));
    }

    #[test]
    fn window_may_be_minimized_and_maximized_together() {
        let mut manager = WindowManager::default();
        let a = open(&mut manager, AppKey::JsonTools);
        manager.toggle_maximize_app(a).expect("maximize");
        manager.minimize_app(a).expect("minimize");

        assert!(manager.is_minimized(a));
        assert!(manager.is_maximized(a));
        assert_eq!(manager.topmost_visible(), None);
    }

    #[test]
    fn close_cleans_every_set_and_reports_last_instance() {
        let mut manager = WindowManager::default();
        let a = open(&mut manager, AppKey::CodeSnippets);
        let b = open(&mut manager, AppKey::CodeSnippets);
        manager.minimize_app(a).expect("minimize");
        manager.toggle_maximize_app(a).expect("maximize");

        assert_eq!(
            manager.close_app(a),
            Ok(WindowEvent::Closed {
                window_id: a,
                app_key: AppKey::CodeSnippets,
                last_instance: false
            })
        );
        assert_eq!(manager.focus_stack(), &[b]);
        assert!(manager.minimized().is_empty());
        assert!(manager.maximized().is_empty());

        assert_eq!(
            manager.close_app(b),
            Ok(WindowEvent::Closed {
                window_id: b,
                app_key: AppKey::CodeSnippets,
                last_instance: true
            })
        );
    }

    #[test]
    fn unknown_ids_are_rejected_without_mutation() {
        let mut manager = WindowManager::default();
        open(&mut manager, AppKey::JsonTools);
        let before = manager.clone();
        let ghost = WindowId(99);

        assert_eq!(manager.close_app(ghost), Err(WindowError::WindowNotFound(ghost)));
        assert_eq!(manager.focus_app(ghost), Err(WindowError::WindowNotFound(ghost)));
        assert_eq!(manager.minimize_app(ghost), Err(WindowError::WindowNotFound(ghost)));
        assert_eq!(manager.restore_app(ghost), Err(WindowError::WindowNotFound(ghost)));
        assert_eq!(
            manager.toggle_maximize_app(ghost),
            Err(WindowError::WindowNotFound(ghost))
        );
        assert_eq!(manager, before);
    }

    #[test]
    fn resize_clamps_to_minimum_size() {
        let start = WindowRect {
            x: 10,
            y: 10,
            w: 400,
            h: 300,
        };
        assert_eq!(
            resize_rect(start, ResizeEdge::SouthEast, -500, 40),
            WindowRect {
                x: 10,
                y: 10,
                w: MIN_WINDOW_WIDTH,
                h: 340
            }
        );
        assert_eq!(resize_rect(start, ResizeEdge::East, 25, 900).h, 300);
    }
}
