use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{dock::DockRegistry, spotlight::SpotlightSearch, window_manager::WindowManager};

pub const DESKTOP_LAYOUT_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_WINDOW_WIDTH: i32 = 400;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;
pub const DEFAULT_NOTICE_TIMEOUT_MS: u32 = 3_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of hosted mini-app types. Adding an app means adding a variant here, a registry
/// entry in [`crate::apps`], and a mount arm in [`crate::apps::app_module`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppKey {
    Pomodoro,
    MarkdownNotes,
    CodeSnippets,
    JsonTools,
    CommandCenter,
    KnowledgeBase,
    KanbanBoard,
}

impl AppKey {
    pub const ALL: [AppKey; 7] = [
        Self::Pomodoro,
        Self::MarkdownNotes,
        Self::CodeSnippets,
        Self::JsonTools,
        Self::CommandCenter,
        Self::KnowledgeBase,
        Self::KanbanBoard,
    ];

    /// Stable token used in deep links, DOM ids, and app storage namespaces.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pomodoro => "pomodoro",
            Self::MarkdownNotes => "markdown-notes",
            Self::CodeSnippets => "code-snippets",
            Self::JsonTools => "json-tools",
            Self::CommandCenter => "command-center",
            Self::KnowledgeBase => "knowledge-base",
            Self::KanbanBoard => "kanban-board",
        }
    }
}

impl fmt::Display for AppKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown app key `{0}`")]
pub struct UnknownAppKey(pub String);

impl FromStr for AppKey {
    type Err = UnknownAppKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| UnknownAppKey(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    /// Default placement for the `ordinal`-th opened window, cascading down and right.
    pub fn cascade(ordinal: u64) -> Self {
        let step = (ordinal.saturating_sub(1) % 8) as i32 * 24;
        Self {
            x: 96 + step,
            y: 72 + step,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self::cascade(1)
    }
}

/// One running, closable occurrence of a mini-app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInstance {
    pub id: WindowId,
    pub app_key: AppKey,
    /// Last non-maximized bounds. Maximizing never touches it.
    pub rect: WindowRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeKey {
    #[default]
    Ubuntu,
    MacOs,
}

impl ThemeKey {
    pub fn token(self) -> &'static str {
        match self {
            Self::Ubuntu => "ubuntu",
            Self::MacOs => "macos",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopTheme {
    pub theme: ThemeKey,
    pub wallpaper_id: String,
}

impl Default for DesktopTheme {
    fn default() -> Self {
        Self {
            theme: ThemeKey::default(),
            wallpaper_id: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopPreferences {
    pub persist_desktop_icons: bool,
    pub notice_timeout_ms: u32,
}

impl Default for DesktopPreferences {
    fn default() -> Self {
        Self {
            persist_desktop_icons: true,
            notice_timeout_ms: DEFAULT_NOTICE_TIMEOUT_MS,
        }
    }
}

/// User-visible, dismissable shell notice (for example, an instance cap being hit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellNotice {
    pub id: u64,
    pub message: String,
}

pub fn default_desktop_apps() -> Vec<AppKey> {
    vec![AppKey::Pomodoro, AppKey::MarkdownNotes]
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    pub windows: WindowManager,
    pub dock: DockRegistry,
    pub spotlight: SpotlightSearch,
    pub theme: DesktopTheme,
    pub preferences: DesktopPreferences,
    pub notices: Vec<ShellNotice>,
    pub next_notice_id: u64,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            windows: WindowManager::default(),
            dock: DockRegistry::with_desktop_apps(default_desktop_apps()),
            spotlight: SpotlightSearch::default(),
            theme: DesktopTheme::default(),
            preferences: DesktopPreferences::default(),
            notices: Vec::new(),
            next_notice_id: 1,
        }
    }
}

impl DesktopState {
    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            schema_version: DESKTOP_LAYOUT_SCHEMA_VERSION,
            theme: self.theme.clone(),
            preferences: self.preferences.clone(),
            desktop_app_keys: self.dock.desktop_app_keys().to_vec(),
        }
    }

    /// Applies persisted preferences without touching running windows or the dock.
    pub fn apply_snapshot(&mut self, snapshot: DesktopSnapshot) {
        self.theme = snapshot.theme;
        self.preferences = snapshot.preferences;
        if self.preferences.persist_desktop_icons {
            self.dock = DockRegistry::with_desktop_apps(snapshot.desktop_app_keys)
                .with_dock_apps(self.dock.dock_app_keys().to_vec());
        }
    }

    pub fn push_notice(&mut self, message: impl Into<String>) -> u64 {
        let id = self.next_notice_id;
        self.next_notice_id = self.next_notice_id.saturating_add(1);
        self.notices.push(ShellNotice {
            id,
            message: message.into(),
        });
        id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopSnapshot {
    pub schema_version: u32,
    pub theme: DesktopTheme,
    pub preferences: DesktopPreferences,
    pub desktop_app_keys: Vec<AppKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    East,
    South,
    SouthEast,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 3] = [Self::East, Self::South, Self::SouthEast];

    pub fn token(self) -> &'static str {
        match self {
            Self::East => "east",
            Self::South => "south",
            Self::SouthEast => "south-east",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

/// Apps requested through the `?open=` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeepLinkState {
    pub open: Vec<AppKey>,
}

impl DeepLinkState {
    /// Parses a comma-separated list of app keys, skipping unknown entries.
    pub fn parse(raw: &str) -> Self {
        let open = raw
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .filter_map(|part| part.parse::<AppKey>().ok())
            .collect();
        Self { open }
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn app_keys_parse_from_their_tokens() {
        for key in AppKey::ALL {
            assert_eq!(key.as_str().parse::<AppKey>(), Ok(key));
        }
        assert_eq!("  JSON-Tools ".parse::<AppKey>(), Ok(AppKey::JsonTools));
        assert_eq!(
            "paint".parse::<AppKey>(),
            Err(UnknownAppKey("paint".to_string()))
        );
    }

    #[test]
    fn deep_link_skips_unknown_and_blank_entries() {
        let deep_link = DeepLinkState::parse("pomodoro,,paint, json-tools");
        assert_eq!(deep_link.open, vec![AppKey::Pomodoro, AppKey::JsonTools]);
        assert!(DeepLinkState::parse("").is_empty());
    }

    #[test]
    fn cascade_wraps_after_eight_windows() {
        assert_eq!(WindowRect::cascade(1), WindowRect::cascade(9));
        assert_eq!(WindowRect::cascade(2).x, WindowRect::cascade(1).x + 24);
    }

    #[test]
    fn snapshot_round_trips_preferences_but_keeps_running_dock() {
        let mut state = DesktopState::default();
        state.dock.pin_to_dock(AppKey::JsonTools);
        let mut snapshot = state.snapshot();
        snapshot.theme.theme = ThemeKey::MacOs;
        snapshot.desktop_app_keys = vec![AppKey::KanbanBoard];

        state.apply_snapshot(snapshot);

        assert_eq!(state.theme.theme, ThemeKey::MacOs);
        assert_eq!(state.dock.desktop_app_keys(), &[AppKey::KanbanBoard]);
        assert_eq!(state.dock.dock_app_keys(), &[AppKey::JsonTools]);
    }
}
