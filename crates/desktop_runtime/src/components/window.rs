use desktop_app_contract::AppMountContext;
use leptos::*;
use system_ui::{
    Icon, IconName, IconSize, ResizeHandle, WindowBody, WindowControlButton, WindowControls,
    WindowFrame, WindowTitle, WindowTitleBar,
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use super::pointer_from_pointer_event;
use crate::{
    apps::app_module,
    model::{AppKey, DesktopState, ResizeEdge, WindowId, WindowRect},
    reducer::DesktopAction,
    runtime_context::use_desktop_runtime,
};

const WINDOW_Z_BASE: usize = 100;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

/// Inline style for a window frame. Stacking follows the focus stack; a window missing from it
/// renders behind every stacked window.
pub(super) fn window_frame_style(
    rect: WindowRect,
    stack_position: Option<usize>,
    maximized: bool,
    minimized: bool,
) -> String {
    let z_index = stack_position.map_or(WINDOW_Z_BASE - 1, |position| WINDOW_Z_BASE + position);
    let bounds = if maximized {
        "left:0;top:0;width:100%;height:100%;".to_string()
    } else {
        format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;",
            rect.x, rect.y, rect.w, rect.h
        )
    };
    let visibility = if minimized { "display:none;" } else { "" };
    format!("{bounds}z-index:{z_index};{visibility}")
}

fn frame_style_for(state: &DesktopState, window_id: WindowId) -> String {
    let windows = &state.windows;
    windows
        .instance(window_id)
        .map(|window| {
            window_frame_style(
                window.rect,
                windows.stack_position(window_id),
                windows.is_maximized(window_id),
                windows.is_minimized(window_id),
            )
        })
        .unwrap_or_default()
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let Some(app_key) = state.with_untracked(|desktop| {
        desktop
            .windows
            .instance(window_id)
            .map(|window| window.app_key)
    }) else {
        return ().into_view();
    };
    let descriptor = runtime
        .registry
        .with_value(|registry| registry.get(app_key).copied());
    let title = descriptor.map_or(app_key.as_str(), |descriptor| descriptor.display_name);
    let icon = descriptor.map_or(IconName::AppGrid, |descriptor| descriptor.icon);

    let style = Signal::derive(move || state.with(|desktop| frame_style_for(desktop, window_id)));
    let focused = Signal::derive(move || state.with(|desktop| desktop.windows.is_focused(window_id)));
    let minimized =
        Signal::derive(move || state.with(|desktop| desktop.windows.is_minimized(window_id)));
    let maximized =
        Signal::derive(move || state.with(|desktop| desktop.windows.is_maximized(window_id)));

    let focus = Callback::new(move |_: web_sys::PointerEvent| {
        let is_top = state.with_untracked(|desktop| {
            desktop.windows.focus_stack().last() == Some(&window_id)
        });
        if !is_top {
            runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        }
    });
    let begin_move = Callback::new(move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) || maximized.get_untracked() {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    });
    let begin_resize = move |edge: ResizeEdge, ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let toggle_maximize = Callback::new(move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::ToggleMaximizeWindow { window_id });
    });

    view! {
        <WindowFrame
            style=style
            aria_label=title.to_string()
            focused=focused
            minimized=minimized
            maximized=maximized
            on_pointerdown=focus
        >
            <WindowTitleBar
                draggable=Signal::derive(move || !maximized.get())
                on_pointerdown=begin_move
                on_dblclick=toggle_maximize
            >
                <WindowTitle>
                    <Icon icon=icon size=IconSize::Sm />
                    <span>{title}</span>
                </WindowTitle>
                <WindowControls>
                    <WindowControlButton
                        aria_label="Minimize window".to_string()
                        on_click=Callback::new(move |_| {
                            runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id });
                        })
                    >
                        <Icon icon=IconName::WindowMinimize size=IconSize::Xs />
                    </WindowControlButton>
                    <WindowControlButton
                        aria_label=Signal::derive(move || {
                            let label = if maximized.get() {
                                "Restore window"
                            } else {
                                "Maximize window"
                            };
                            label.to_string()
                        })
                        on_click=toggle_maximize
                    >
                        {move || {
                            let icon = if maximized.get() {
                                IconName::WindowRestore
                            } else {
                                IconName::WindowMaximize
                            };
                            view! { <Icon icon=icon size=IconSize::Xs /> }
                        }}
                    </WindowControlButton>
                    <WindowControlButton
                        aria_label="Close window".to_string()
                        on_click=Callback::new(move |_| {
                            runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
                        })
                    >
                        <Icon icon=IconName::Dismiss size=IconSize::Xs />
                    </WindowControlButton>
                </WindowControls>
            </WindowTitleBar>
            <WindowBody>
                <HostedApp window_id=window_id app_key=app_key />
            </WindowBody>
            <Show when=move || !maximized.get() fallback=|| ()>
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| {
                        view! {
                            <ResizeHandle
                                edge=edge.token()
                                on_pointerdown=Callback::new(move |ev| begin_resize(edge, ev))
                            />
                        }
                    })
                    .collect_view()}
            </Show>
        </WindowFrame>
    }
    .into_view()
}

/// Mounts the hosted app inside an error boundary so a failing app only blanks its own window.
#[component]
fn HostedApp(window_id: WindowId, app_key: AppKey) -> impl IntoView {
    let mounted = app_module(app_key).mount(AppMountContext {
        app_namespace: app_key.as_str(),
        window_id: window_id.0,
    });
    if let Err(err) = &mounted {
        logging::error!("{app_key} window {window_id} failed to mount: {err}");
    }

    view! {
        <ErrorBoundary fallback=|errors| {
            view! {
                <div class="app-error" role="alert">
                    <Icon icon=IconName::Warning size=IconSize::Md />
                    <p>"This app failed to load. Other windows are unaffected."</p>
                    <ul>
                        {move || {
                            errors
                                .get()
                                .into_iter()
                                .map(|(_, err)| view! { <li>{err.to_string()}</li> })
                                .collect_view()
                        }}
                    </ul>
                </div>
            }
        }>
            {mounted}
        </ErrorBoundary>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const RECT: WindowRect = WindowRect {
        x: 12,
        y: 34,
        w: 400,
        h: 300,
    };

    #[test]
    fn frame_style_stacks_by_focus_position() {
        assert_eq!(
            window_frame_style(RECT, Some(2), false, false),
            "left:12px;top:34px;width:400px;height:300px;z-index:102;"
        );
        assert_eq!(
            window_frame_style(RECT, None, false, false),
            "left:12px;top:34px;width:400px;height:300px;z-index:99;"
        );
    }

    #[test]
    fn maximized_frame_fills_viewport_and_minimized_is_hidden() {
        assert_eq!(
            window_frame_style(RECT, Some(0), true, true),
            "left:0;top:0;width:100%;height:100%;z-index:100;display:none;"
        );
    }
}
