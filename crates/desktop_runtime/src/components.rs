//! Desktop shell UI composition and interaction surfaces.

mod desktop_icons;
mod dock;
mod launcher;
mod notices;
mod shortcuts;
mod spotlight;
mod window;

use leptos::*;
use system_ui::{DesktopBackdrop, DesktopRoot, DesktopWindowLayer};

use self::{
    desktop_icons::DesktopIcons, dock::Dock, launcher::AppLauncher, notices::NoticeStack,
    shortcuts::key_chord, spotlight::SpotlightOverlay, window::DesktopWindow,
};
use crate::{
    model::PointerPosition, reducer::DesktopAction, runtime_context::use_desktop_runtime,
    runtime_context::DesktopRuntimeContext, spotlight::is_spotlight_shortcut,
};

pub(crate) const SPOTLIGHT_INPUT_ID: &str = "spotlight-input";
const DESKTOP_ROOT_ID: &str = "desktop-shell-root";

#[component]
/// Renders the full desktop shell: wallpaper, desktop icons, windows, dock, and overlays.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let shortcut_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.repeat() {
            return;
        }
        if is_spotlight_shortcut(&key_chord(&ev)) {
            ev.prevent_default();
            runtime.dispatch_action(DesktopAction::OpenSpotlight);
        }
    });
    on_cleanup(move || shortcut_listener.remove());

    let on_pointer_move = Callback::new(move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
    });
    let on_pointer_end =
        Callback::new(move |_: web_sys::PointerEvent| end_active_pointer_interaction(runtime));

    view! {
        <DesktopRoot
            id=DESKTOP_ROOT_ID
            theme=Signal::derive(move || state.get().theme.theme.token().to_string())
            on_pointermove=on_pointer_move
            on_pointerup=on_pointer_end
        >
            <DesktopBackdrop wallpaper=Signal::derive(move || state.get().theme.wallpaper_id)>
                <div
                    data-ui-slot="dismiss-layer"
                    on:mousedown=move |_| runtime.dispatch_action(DesktopAction::CloseLauncher)
                />
                <DesktopIcons />
                <DesktopWindowLayer>
                    <For
                        each=move || state.get().windows.instances().to_vec()
                        key=|win| win.id.0
                        let:win
                    >
                        <DesktopWindow window_id=win.id />
                    </For>
                </DesktopWindowLayer>
            </DesktopBackdrop>

            <Dock />
            <AppLauncher />
            <SpotlightOverlay />
            <NoticeStack />
        </DesktopRoot>
    }
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}
