//! Spotlight: a keyboard-driven app search overlay over the [`AppRegistry`].
//!
//! Results are plain case-insensitive substring matches on display names, in registry order.
//! Invoking a result yields a [`SpotlightCommand`] the reducer applies to the window manager
//! before closing the overlay.

use system_ui::IconName;

use crate::{apps::AppRegistry, model::AppKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotlightResult {
    pub app_key: AppKey,
    pub display_name: &'static str,
    pub icon: IconName,
}

impl SpotlightResult {
    pub fn invoke(&self) -> SpotlightCommand {
        SpotlightCommand::OpenApp(self.app_key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotlightCommand {
    /// Open the app, then close the overlay.
    OpenApp(AppKey),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotlightKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

impl SpotlightKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "Down" => Some(Self::ArrowDown),
            "ArrowUp" | "Up" => Some(Self::ArrowUp),
            "Enter" => Some(Self::Enter),
            "Escape" | "Esc" => Some(Self::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpotlightSearch {
    open: bool,
    query: String,
    results: Vec<SpotlightResult>,
    /// `None` whenever `results` is empty.
    selected: Option<usize>,
}

impl SpotlightSearch {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SpotlightResult] {
        &self.results
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_result(&self) -> Option<&SpotlightResult> {
        self.selected.and_then(|index| self.results.get(index))
    }

    /// Opens with a cleared query. Returns `false` when already open, leaving state untouched.
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        *self = Self {
            open: true,
            ..Self::default()
        };
        true
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Replaces the query and recomputes results. Ignored while closed.
    pub fn set_query(&mut self, registry: &AppRegistry, query: impl Into<String>) {
        if !self.open {
            return;
        }
        self.query = query.into();
        self.results = filter_registry(registry, &self.query);
        self.selected = if self.results.is_empty() { None } else { Some(0) };
    }

    pub fn select_next(&mut self) {
        let len = self.results.len();
        if len == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |index| (index + 1) % len));
    }

    pub fn select_previous(&mut self) {
        let len = self.results.len();
        if len == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(len - 1, |index| (index + len - 1) % len));
    }

    /// Applies a navigation key. Only Escape works without results.
    pub fn handle_key(&mut self, key: SpotlightKey) -> Option<SpotlightCommand> {
        if !self.open {
            return None;
        }
        match key {
            SpotlightKey::Escape => Some(SpotlightCommand::Close),
            _ if self.results.is_empty() => None,
            SpotlightKey::ArrowDown => {
                self.select_next();
                None
            }
            SpotlightKey::ArrowUp => {
                self.select_previous();
                None
            }
            SpotlightKey::Enter => self.selected_result().map(SpotlightResult::invoke),
        }
    }

    /// Invokes the result at `index`, as a click on that row does.
    pub fn invoke_result(&self, index: usize) -> Option<SpotlightCommand> {
        if !self.open {
            return None;
        }
        self.results.get(index).map(SpotlightResult::invoke)
    }
}

/// Case-insensitive substring filter over display names, in registry order.
pub fn filter_registry(registry: &AppRegistry, query: &str) -> Vec<SpotlightResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    registry
        .iter()
        .filter(|entry| entry.display_name.to_lowercase().contains(&needle))
        .map(|entry| SpotlightResult {
            app_key: entry.key,
            display_name: entry.display_name,
            icon: entry.icon,
        })
        .collect()
}

/// Modifier and key state of a keyboard event, detached from the DOM.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

/// Ctrl+K or Cmd+K.
pub fn is_spotlight_shortcut(chord: &KeyChord) -> bool {
    (chord.ctrl || chord.meta) && !chord.alt && chord.key.eq_ignore_ascii_case("k")
}
