//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.
//!
//! The reducer composes the three state owners. Window lifecycle events returned by the
//! [`crate::window_manager::WindowManager`] are forwarded to the [`crate::dock::DockRegistry`];
//! nothing flows the other way.

use thiserror::Error;

use crate::{
    apps::AppRegistry,
    dock::{resolve_dock_click, DockClickAction},
    model::{
        AppKey, DeepLinkState, DesktopSnapshot, DesktopState, DragSession, InteractionState,
        PointerPosition, ResizeEdge, ResizeSession, ThemeKey, WindowId,
        DESKTOP_LAYOUT_SCHEMA_VERSION,
    },
    spotlight::{SpotlightCommand, SpotlightKey},
    window_manager::{resize_rect, WindowError},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new instance of an app.
    OpenApp { app_key: AppKey },
    CloseWindow { window_id: WindowId },
    /// Raise a window without changing its minimized state.
    FocusWindow { window_id: WindowId },
    MinimizeWindow { window_id: WindowId },
    /// Un-minimize and raise a window.
    RestoreWindow { window_id: WindowId },
    ToggleMaximizeWindow { window_id: WindowId },
    /// Dock icon click: open, restore, or focus depending on running instances.
    ActivateDockApp { app_key: AppKey },
    ToggleLauncher,
    CloseLauncher,
    /// Open an app from the launcher overlay and close the overlay.
    LaunchFromLauncher { app_key: AppKey },
    PinToDock { app_key: AppKey },
    UnpinFromDock { app_key: AppKey },
    PinToDesktop { app_key: AppKey },
    UnpinFromDesktop { app_key: AppKey },
    OpenSpotlight,
    CloseSpotlight,
    SetSpotlightQuery { query: String },
    SpotlightKey { key: SpotlightKey },
    /// Click on a spotlight result row.
    InvokeSpotlightResult { index: usize },
    BeginMove {
        window_id: WindowId,
        pointer: PointerPosition,
    },
    UpdateMove { pointer: PointerPosition },
    EndMove,
    BeginResize {
        window_id: WindowId,
        edge: ResizeEdge,
        pointer: PointerPosition,
    },
    UpdateResize { pointer: PointerPosition },
    EndResize,
    SetTheme { theme: ThemeKey },
    SetWallpaper { wallpaper_id: String },
    DismissNotice { notice_id: u64 },
    /// Hydrate preferences from a persisted snapshot.
    HydrateSnapshot { snapshot: DesktopSnapshot },
    /// Open the apps named in a `?open=` deep link.
    ApplyDeepLink { deep_link: DeepLinkState },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Persist the desktop snapshot (preferences and desktop icons).
    PersistLayout,
    /// Persist theme and wallpaper.
    PersistTheme,
    /// Move keyboard focus into the spotlight input.
    FocusSpotlightInput,
    /// Dismiss a notice once its timeout elapses.
    ScheduleNoticeDismiss { notice_id: u64, after_ms: u32 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions. State is unchanged whenever one is returned.
pub enum ReducerError {
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// Hitting an app's instance cap is not an error: a notice is queued and `Ok` is returned.
///
/// # Errors
///
/// Returns [`ReducerError::Window`] when an action references a window that is not open, or an
/// app missing from `registry`.
pub fn reduce_desktop(
    registry: &AppRegistry,
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenApp { app_key } => {
            open_app(registry, state, app_key, &mut effects)?;
        }
        DesktopAction::CloseWindow { window_id } => {
            let event = state.windows.close_app(window_id)?;
            state.dock.handle_window_event(event);
            clear_sessions_for(interaction, window_id);
        }
        DesktopAction::FocusWindow { window_id } => {
            state.windows.focus_app(window_id)?;
        }
        DesktopAction::MinimizeWindow { window_id } => {
            state.windows.minimize_app(window_id)?;
            clear_sessions_for(interaction, window_id);
        }
        DesktopAction::RestoreWindow { window_id } => {
            state.windows.restore_app(window_id)?;
        }
        DesktopAction::ToggleMaximizeWindow { window_id } => {
            state.windows.toggle_maximize_app(window_id)?;
            clear_sessions_for(interaction, window_id);
        }
        DesktopAction::ActivateDockApp { app_key } => {
            match resolve_dock_click(&state.windows, app_key) {
                DockClickAction::Open(app_key) => open_app(registry, state, app_key, &mut effects)?,
                DockClickAction::Restore(window_id) => state.windows.restore_app(window_id)?,
                DockClickAction::Focus(window_id) => state.windows.focus_app(window_id)?,
            }
        }
        DesktopAction::ToggleLauncher => {
            state.dock.toggle_launcher();
        }
        DesktopAction::CloseLauncher => {
            state.dock.close_launcher();
        }
        DesktopAction::LaunchFromLauncher { app_key } => {
            open_app(registry, state, app_key, &mut effects)?;
            state.dock.close_launcher();
        }
        DesktopAction::PinToDock { app_key } => {
            state.dock.pin_to_dock(app_key);
        }
        DesktopAction::UnpinFromDock { app_key } => {
            state.dock.unpin_from_dock(app_key);
        }
        DesktopAction::PinToDesktop { app_key } => {
            if state.dock.pin_to_desktop(app_key) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::UnpinFromDesktop { app_key } => {
            if state.dock.unpin_from_desktop(app_key) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::OpenSpotlight => {
            if state.spotlight.open() {
                state.dock.close_launcher();
                effects.push(RuntimeEffect::FocusSpotlightInput);
            }
        }
        DesktopAction::CloseSpotlight => {
            state.spotlight.close();
        }
        DesktopAction::SetSpotlightQuery { query } => {
            state.spotlight.set_query(registry, query);
        }
        DesktopAction::SpotlightKey { key } => {
            if let Some(command) = state.spotlight.handle_key(key) {
                run_spotlight_command(registry, state, command, &mut effects)?;
            }
        }
        DesktopAction::InvokeSpotlightResult { index } => {
            if let Some(command) = state.spotlight.invoke_result(index) {
                run_spotlight_command(registry, state, command, &mut effects)?;
            }
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let rect_start = state
                .windows
                .instance(window_id)
                .map(|window| window.rect)
                .ok_or(WindowError::WindowNotFound(window_id))?;
            state.windows.focus_app(window_id)?;
            if !state.windows.is_maximized(window_id) {
                interaction.dragging = Some(DragSession {
                    window_id,
                    pointer_start: pointer,
                    rect_start,
                });
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                if !state.windows.is_maximized(session.window_id) {
                    state
                        .windows
                        .set_rect(session.window_id, session.rect_start.offset(dx, dy))?;
                }
            }
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            let rect_start = state
                .windows
                .instance(window_id)
                .map(|window| window.rect)
                .ok_or(WindowError::WindowNotFound(window_id))?;
            state.windows.focus_app(window_id)?;
            if !state.windows.is_maximized(window_id) {
                interaction.resizing = Some(ResizeSession {
                    window_id,
                    edge,
                    pointer_start: pointer,
                    rect_start,
                });
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                if !state.windows.is_maximized(session.window_id) {
                    state.windows.set_rect(
                        session.window_id,
                        resize_rect(session.rect_start, session.edge, dx, dy),
                    )?;
                }
            }
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::SetTheme { theme } => {
            if state.theme.theme != theme {
                state.theme.theme = theme;
                effects.push(RuntimeEffect::PersistTheme);
            }
        }
        DesktopAction::SetWallpaper { wallpaper_id } => {
            let wallpaper_id = wallpaper_id.trim();
            if !wallpaper_id.is_empty() && state.theme.wallpaper_id != wallpaper_id {
                state.theme.wallpaper_id = wallpaper_id.to_string();
                effects.push(RuntimeEffect::PersistTheme);
            }
        }
        DesktopAction::DismissNotice { notice_id } => {
            state.notices.retain(|notice| notice.id != notice_id);
        }
        DesktopAction::HydrateSnapshot { snapshot } => {
            if snapshot.schema_version == DESKTOP_LAYOUT_SCHEMA_VERSION {
                state.apply_snapshot(snapshot);
            }
        }
        DesktopAction::ApplyDeepLink { deep_link } => {
            let known = deep_link
                .open
                .into_iter()
                .filter(|app_key| registry.get(*app_key).is_some());
            for app_key in known {
                open_app(registry, state, app_key, &mut effects)?;
            }
        }
    }

    Ok(effects)
}

fn open_app(
    registry: &AppRegistry,
    state: &mut DesktopState,
    app_key: AppKey,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    match state.windows.open_app(registry, app_key) {
        Ok(event) => {
            state.dock.handle_window_event(event);
            Ok(())
        }
        Err(WindowError::CapacityExceeded { app_key, max }) => {
            let name = registry
                .get(app_key)
                .map_or(app_key.as_str(), |entry| entry.display_name);
            let notice_id = state.push_notice(capacity_notice(name, max));
            effects.push(RuntimeEffect::ScheduleNoticeDismiss {
                notice_id,
                after_ms: state.preferences.notice_timeout_ms,
            });
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn capacity_notice(name: &str, max: usize) -> String {
    if max == 1 {
        format!("Maximum instances reached: {name} can only have one open window.")
    } else {
        format!("Maximum instances reached: {name} can have at most {max} open windows.")
    }
}

fn run_spotlight_command(
    registry: &AppRegistry,
    state: &mut DesktopState,
    command: SpotlightCommand,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    match command {
        SpotlightCommand::OpenApp(app_key) => {
            open_app(registry, state, app_key, effects)?;
            state.spotlight.close();
            Ok(())
        }
        SpotlightCommand::Close => {
            state.spotlight.close();
            Ok(())
        }
    }
}

fn clear_sessions_for(interaction: &mut InteractionState, window_id: WindowId) {
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.dragging = None;
    }
    if interaction
        .resizing
        .as_ref()
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.resizing = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{WindowRect, DEFAULT_NOTICE_TIMEOUT_MS};

    fn reduce(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) -> Result<Vec<RuntimeEffect>, ReducerError> {
        reduce_desktop(&AppRegistry::builtin(), state, interaction, action)
    }

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, app_key: AppKey) -> WindowId {
        reduce(state, interaction, DesktopAction::OpenApp { app_key }).expect("open app");
        *state.windows.focus_stack().last().expect("focused window")
    }

    #[test]
    fn capacity_hit_queues_notice_and_schedules_dismissal() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, AppKey::KanbanBoard);
        let windows_before = state.windows.clone();

        let effects = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApp {
                app_key: AppKey::KanbanBoard,
            },
        )
        .expect("capacity is not an error");

        assert_eq!(state.windows, windows_before);
        assert_eq!(state.notices.len(), 1);
        assert!(state.notices[0].message.contains("Kanban Board"));
        assert_eq!(
            effects,
            vec![RuntimeEffect::ScheduleNoticeDismiss {
                notice_id: state.notices[0].id,
                after_ms: DEFAULT_NOTICE_TIMEOUT_MS,
            }]
        );

        let notice_id = state.notices[0].id;
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::DismissNotice { notice_id },
        )
        .expect("dismiss");
        assert!(state.notices.is_empty());
    }

    #[test]
    fn unknown_window_is_an_error_without_mutation() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, AppKey::JsonTools);
        let before = state.clone();

        let err = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: WindowId(42),
            },
        )
        .expect_err("missing window");

        assert_eq!(err, ReducerError::Window(WindowError::WindowNotFound(WindowId(42))));
        assert_eq!(state, before);
    }

    #[test]
    fn dragging_moves_window_unless_maximized() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let window_id = open(&mut state, &mut interaction, AppKey::JsonTools);
        let start = state.windows.instance(window_id).expect("window").rect;

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id,
                pointer: PointerPosition { x: 10, y: 10 },
            },
        )
        .expect("begin move");
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 40, y: 25 },
            },
        )
        .expect("update move");
        reduce(&mut state, &mut interaction, DesktopAction::EndMove).expect("end move");

        let moved = state.windows.instance(window_id).expect("window").rect;
        assert_eq!(moved, start.offset(30, 15));
        assert_eq!(interaction, InteractionState::default());

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximizeWindow { window_id },
        )
        .expect("maximize");
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .expect("begin move while maximized");
        assert_eq!(interaction.dragging, None);
    }

    #[test]
    fn resize_clamps_and_maximize_restores_last_bounds() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let window_id = open(&mut state, &mut interaction, AppKey::CodeSnippets);
        let start = state.windows.instance(window_id).expect("window").rect;

        for action in [
            DesktopAction::BeginResize {
                window_id,
                edge: ResizeEdge::SouthEast,
                pointer: PointerPosition { x: 0, y: 0 },
            },
            DesktopAction::UpdateResize {
                pointer: PointerPosition { x: -900, y: 50 },
            },
            DesktopAction::EndResize,
            DesktopAction::ToggleMaximizeWindow { window_id },
            DesktopAction::ToggleMaximizeWindow { window_id },
        ] {
            reduce(&mut state, &mut interaction, action).expect("resize flow");
        }

        assert_eq!(
            state.windows.instance(window_id).map(|w| w.rect),
            Some(WindowRect {
                w: 300,
                h: start.h + 50,
                ..start
            })
        );
    }

    #[test]
    fn closing_a_dragged_window_drops_the_session() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let window_id = open(&mut state, &mut interaction, AppKey::JsonTools);
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .expect("begin move");
        reduce(&mut state, &mut interaction, DesktopAction::CloseWindow { window_id })
            .expect("close");

        assert_eq!(interaction.dragging, None);
        assert_eq!(
            reduce(
                &mut state,
                &mut interaction,
                DesktopAction::UpdateMove {
                    pointer: PointerPosition { x: 5, y: 5 }
                }
            ),
            Ok(Vec::new())
        );
    }

    #[test]
    fn launcher_launch_opens_and_closes_overlay() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce(&mut state, &mut interaction, DesktopAction::ToggleLauncher).expect("toggle");
        assert!(state.dock.is_launcher_open());

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::LaunchFromLauncher {
                app_key: AppKey::CommandCenter,
            },
        )
        .expect("launch");

        assert!(!state.dock.is_launcher_open());
        assert_eq!(state.windows.instance_count(AppKey::CommandCenter), 1);
        assert_eq!(state.dock.dock_app_keys(), &[AppKey::CommandCenter]);
    }

    #[test]
    fn failed_launches_keep_their_overlay_open() {
        let registry = AppRegistry::new(Vec::new()).expect("empty registry");
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        state.dock.toggle_launcher();
        let before = state.clone();

        let err = reduce_desktop(
            &registry,
            &mut state,
            &mut interaction,
            DesktopAction::LaunchFromLauncher {
                app_key: AppKey::Pomodoro,
            },
        )
        .expect_err("not in registry");
        assert_eq!(err, ReducerError::Window(WindowError::UnknownApp(AppKey::Pomodoro)));
        assert_eq!(state, before);

        state.dock.close_launcher();
        state.spotlight.open();
        state.spotlight.set_query(&AppRegistry::builtin(), "pomo");
        let before = state.clone();
        reduce_desktop(
            &registry,
            &mut state,
            &mut interaction,
            DesktopAction::SpotlightKey {
                key: SpotlightKey::Enter,
            },
        )
        .expect_err("not in registry");
        assert_eq!(state, before);
        assert!(state.spotlight.is_open());
    }

    #[test]
    fn desktop_pins_persist_layout_only_on_change() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let pin = DesktopAction::PinToDesktop {
            app_key: AppKey::JsonTools,
        };
        assert_eq!(
            reduce(&mut state, &mut interaction, pin.clone()),
            Ok(vec![RuntimeEffect::PersistLayout])
        );
        assert_eq!(reduce(&mut state, &mut interaction, pin), Ok(Vec::new()));
        assert_eq!(
            state.dock.desktop_app_keys(),
            &[AppKey::Pomodoro, AppKey::MarkdownNotes, AppKey::JsonTools]
        );
    }

    #[test]
    fn opening_spotlight_requests_input_focus_once() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        assert_eq!(
            reduce(&mut state, &mut interaction, DesktopAction::OpenSpotlight),
            Ok(vec![RuntimeEffect::FocusSpotlightInput])
        );
        assert_eq!(
            reduce(&mut state, &mut interaction, DesktopAction::OpenSpotlight),
            Ok(Vec::new())
        );
    }

    #[test]
    fn theme_changes_persist() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        assert_eq!(
            reduce(
                &mut state,
                &mut interaction,
                DesktopAction::SetTheme {
                    theme: ThemeKey::MacOs
                }
            ),
            Ok(vec![RuntimeEffect::PersistTheme])
        );
        assert_eq!(
            reduce(
                &mut state,
                &mut interaction,
                DesktopAction::SetWallpaper {
                    wallpaper_id: "  ".to_string()
                }
            ),
            Ok(Vec::new())
        );
        assert_eq!(state.theme.wallpaper_id, "default");
    }

    #[test]
    fn stale_snapshot_schema_is_ignored() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let mut snapshot = state.snapshot();
        snapshot.schema_version = DESKTOP_LAYOUT_SCHEMA_VERSION + 1;
        snapshot.desktop_app_keys.clear();

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateSnapshot { snapshot },
        )
        .expect("hydrate");

        assert_eq!(state, DesktopState::default());
    }

    #[test]
    fn deep_link_opens_apps_and_respects_caps() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::ApplyDeepLink {
                deep_link: DeepLinkState::parse("json-tools,pomodoro,pomodoro"),
            },
        )
        .expect("deep link");

        assert_eq!(state.windows.instance_count(AppKey::JsonTools), 1);
        assert_eq!(state.windows.instance_count(AppKey::Pomodoro), 1);
        assert_eq!(state.notices.len(), 1);
    }
}
