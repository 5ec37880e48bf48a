use super::*;

#[component]
/// Centered modal overlay with a dismissable backdrop.
///
/// Callers mount it conditionally; the modal itself is always visible while mounted.
pub fn Modal(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
    #[prop(optional)] on_keydown: Option<Callback<KeyboardEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="ui-modal-layer" data-ui-primitive="true" data-ui-kind="modal-layer">
            <div
                data-ui-slot="modal-backdrop"
                aria-hidden="true"
                on:mousedown=move |_| {
                    if let Some(on_dismiss) = on_dismiss.as_ref() {
                        on_dismiss.call(());
                    }
                }
            />
            <div
                class=merge_layout_class("ui-modal", layout_class)
                role="dialog"
                aria-modal="true"
                aria-label=aria_label
                data-ui-primitive="true"
                data-ui-kind="modal"
                on:keydown=move |ev| {
                    if let Some(on_keydown) = on_keydown.as_ref() {
                        on_keydown.call(ev);
                    }
                }
            >
                {children()}
            </div>
        </div>
    }
}

#[component]
/// Shared overlay surface for menus and popups.
pub fn MenuSurface(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] style: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-menu-surface", layout_class)
            id=id
            role="menu"
            aria-label=aria_label
            style=style
            data-ui-primitive="true"
            data-ui-kind="menu-surface"
        >
            {children()}
        </div>
    }
}

#[component]
/// Shared overlay menu item primitive.
pub fn MenuItem(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] selected: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <Button
            layout_class=layout_class.unwrap_or("")
            selected=selected
            ui_slot="menu-item"
            variant=ButtonVariant::Quiet
            on_click=Callback::new(move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            })
        >
            <span role="menuitem">{children()}</span>
        </Button>
    }
}

#[component]
/// Transient notice toast.
pub fn NoticeToast(
    #[prop(into)] message: String,
    #[prop(optional)] on_dismiss: Option<Callback<MouseEvent>>,
) -> impl IntoView {
    view! {
        <div
            class="ui-notice-toast"
            role="status"
            aria-live="polite"
            data-ui-primitive="true"
            data-ui-kind="notice-toast"
        >
            <Icon icon=IconName::Warning size=IconSize::Sm />
            <span data-ui-slot="notice-message">{message}</span>
            <Button
                variant=ButtonVariant::Quiet
                ui_slot="notice-dismiss"
                aria_label="Dismiss notice"
                on_click=Callback::new(move |ev| {
                    if let Some(on_dismiss) = on_dismiss.as_ref() {
                        on_dismiss.call(ev);
                    }
                })
            >
                <Icon icon=IconName::Dismiss size=IconSize::Xs />
            </Button>
        </div>
    }
}
