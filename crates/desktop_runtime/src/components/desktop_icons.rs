use leptos::*;
use system_ui::{DesktopIconButton, DesktopIconGrid, Icon, IconName, IconSize, MenuItem, MenuSurface};

use crate::{model::AppKey, reducer::DesktopAction, runtime_context::use_desktop_runtime};

const DESKTOP_ICON_MENU_ID: &str = "desktop-icon-context-menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IconContextMenuState {
    app_key: AppKey,
    x: i32,
    y: i32,
}

#[component]
/// Desktop surface icons for apps pinned to the desktop, with a per-icon context menu.
pub(super) fn DesktopIcons() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let context_menu = create_rw_signal(None::<IconContextMenuState>);

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && context_menu.get_untracked().is_some() {
            ev.prevent_default();
            context_menu.set(None);
        }
    });
    on_cleanup(move || escape_listener.remove());

    view! {
        <DesktopIconGrid>
            <For
                each=move || state.with(|desktop| desktop.dock.desktop_app_keys().to_vec())
                key=|app_key| *app_key
                let:app_key
            >
                <DesktopIcon app_key=app_key context_menu=context_menu />
            </For>
        </DesktopIconGrid>
        <Show when=move || context_menu.get().is_some() fallback=|| ()>
            <div data-ui-slot="menu-dismiss-layer" on:mousedown=move |_| context_menu.set(None) />
            {move || {
                context_menu
                    .get()
                    .map(|menu| {
                        let app_key = menu.app_key;
                        view! {
                            <MenuSurface
                                id=DESKTOP_ICON_MENU_ID
                                aria_label=format!("{app_key} options")
                                style=format!("position:fixed;left:{}px;top:{}px;", menu.x, menu.y)
                            >
                                <MenuItem on_click=Callback::new(move |_| {
                                    context_menu.set(None);
                                    runtime.dispatch_action(DesktopAction::OpenApp { app_key });
                                })>
                                    "Open"
                                </MenuItem>
                                <MenuItem on_click=Callback::new(move |_| {
                                    context_menu.set(None);
                                    runtime.dispatch_action(DesktopAction::UnpinFromDesktop { app_key });
                                })>
                                    "Remove from desktop"
                                </MenuItem>
                            </MenuSurface>
                        }
                    })
            }}
        </Show>
    }
}

#[component]
fn DesktopIcon(app_key: AppKey, context_menu: RwSignal<Option<IconContextMenuState>>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let descriptor = runtime
        .registry
        .with_value(|registry| registry.get(app_key).copied());
    let title = descriptor.map_or(app_key.as_str(), |descriptor| descriptor.display_name);
    let label = descriptor.map_or(app_key.as_str(), |descriptor| descriptor.short_name);
    let icon = descriptor.map_or(IconName::AppGrid, |descriptor| descriptor.icon);

    view! {
        <DesktopIconButton
            title=title.to_string()
            on_click=Callback::new(move |_| {
                context_menu.set(None);
                runtime.dispatch_action(DesktopAction::OpenApp { app_key });
            })
            on_contextmenu=Callback::new(move |ev: web_sys::MouseEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                context_menu.set(Some(IconContextMenuState {
                    app_key,
                    x: ev.client_x(),
                    y: ev.client_y(),
                }));
            })
        >
            <span>
                <Icon icon=icon size=IconSize::Lg />
            </span>
            <span>{label}</span>
        </DesktopIconButton>
    }
}
