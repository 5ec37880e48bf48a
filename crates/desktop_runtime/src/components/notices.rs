use leptos::*;
use system_ui::NoticeToast;

use crate::{reducer::DesktopAction, runtime_context::use_desktop_runtime};

#[component]
/// Stack of pending shell notices, newest last.
pub(super) fn NoticeStack() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <div data-ui-slot="notice-stack" aria-live="polite">
            <For
                each=move || state.with(|desktop| desktop.notices.clone())
                key=|notice| notice.id
                let:notice
            >
                {
                    let notice_id = notice.id;
                    view! {
                        <NoticeToast
                            message=notice.message
                            on_dismiss=Callback::new(move |_| {
                                runtime.dispatch_action(DesktopAction::DismissNotice { notice_id });
                            })
                        />
                    }
                }
            </For>
        </div>
    }
}
