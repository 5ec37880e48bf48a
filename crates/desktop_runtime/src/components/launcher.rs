use leptos::*;
use system_ui::{Button, ButtonVariant, Icon, IconSize, Modal};

use crate::{apps::AppDescriptor, reducer::DesktopAction, runtime_context::use_desktop_runtime};

#[component]
/// Full app list overlay opened from the dock.
pub(super) fn AppLauncher() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let entries: Vec<AppDescriptor> = runtime
        .registry
        .with_value(|registry| registry.iter().copied().collect());
    let entries = store_value(entries);

    view! {
        <Show
            when=move || state.with(|desktop| desktop.dock.is_launcher_open())
            fallback=|| ()
        >
            <Modal
                layout_class="app-launcher"
                aria_label="Applications".to_string()
                on_dismiss=Callback::new(move |_| runtime.dispatch_action(DesktopAction::CloseLauncher))
                on_keydown=Callback::new(move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        ev.prevent_default();
                        runtime.dispatch_action(DesktopAction::CloseLauncher);
                    }
                })
            >
                <h2 data-ui-slot="launcher-heading">"Applications"</h2>
                <ul data-ui-slot="launcher-grid">
                    {entries
                        .get_value()
                        .into_iter()
                        .map(|entry| view! { <LauncherEntry entry=entry /> })
                        .collect_view()}
                </ul>
            </Modal>
        </Show>
    }
}

#[component]
fn LauncherEntry(entry: AppDescriptor) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_key = entry.key;
    let pinned =
        Signal::derive(move || runtime.state.with(|desktop| desktop.dock.is_pinned_to_desktop(app_key)));

    view! {
        <li data-ui-slot="launcher-entry">
            <Button
                variant=ButtonVariant::Quiet
                ui_slot="launcher-open"
                title=entry.display_name.to_string()
                on_click=Callback::new(move |_| {
                    runtime.dispatch_action(DesktopAction::LaunchFromLauncher { app_key });
                })
            >
                <Icon icon=entry.icon size=IconSize::Lg />
                <span>{entry.display_name}</span>
            </Button>
            <Button
                variant=ButtonVariant::Standard
                ui_slot="launcher-pin"
                disabled=pinned
                aria_label=format!("Add {} to desktop", entry.display_name)
                on_click=Callback::new(move |_| {
                    runtime.dispatch_action(DesktopAction::PinToDesktop { app_key });
                })
            >
                {move || if pinned.get() { "On desktop" } else { "Add to desktop" }}
            </Button>
        </li>
    }
}
