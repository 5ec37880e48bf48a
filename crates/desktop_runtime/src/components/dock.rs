use leptos::*;
use system_ui::{DockBar, DockButton, IconName};

use crate::{model::AppKey, reducer::DesktopAction, runtime_context::use_desktop_runtime};

#[component]
/// Bottom dock: launcher toggle followed by apps pinned to the dock.
pub(super) fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <DockBar aria_label="Dock">
            <DockButton
                icon=IconName::AppGrid
                title="Show applications".to_string()
                pressed=Signal::derive(move || state.with(|desktop| desktop.dock.is_launcher_open()))
                on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    runtime.dispatch_action(DesktopAction::ToggleLauncher);
                })
            />
            <For
                each=move || state.with(|desktop| desktop.dock.dock_app_keys().to_vec())
                key=|app_key| *app_key
                let:app_key
            >
                <DockAppButton app_key=app_key />
            </For>
        </DockBar>
    }
}

#[component]
fn DockAppButton(app_key: AppKey) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let descriptor = runtime
        .registry
        .with_value(|registry| registry.get(app_key).copied());
    let title = descriptor.map_or(app_key.as_str(), |descriptor| descriptor.display_name);
    let icon = descriptor.map_or(IconName::AppGrid, |descriptor| descriptor.icon);

    let running_count =
        Signal::derive(move || state.with(|desktop| desktop.windows.instance_count(app_key)));
    let has_focus = Signal::derive(move || {
        state.with(|desktop| {
            desktop
                .windows
                .topmost_visible()
                .and_then(|window_id| desktop.windows.instance(window_id))
                .is_some_and(|window| window.app_key == app_key)
        })
    });

    view! {
        <DockButton
            icon=icon
            title=title.to_string()
            running_count=running_count
            pressed=has_focus
            on_click=Callback::new(move |_| {
                runtime.dispatch_action(DesktopAction::ActivateDockApp { app_key });
            })
        />
    }
}
