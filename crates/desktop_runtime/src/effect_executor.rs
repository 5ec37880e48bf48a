//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use std::time::Duration;

use leptos::*;

use crate::{
    components::SPOTLIGHT_INPUT_ID, persistence, reducer::DesktopAction,
    reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext,
};

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the current queue before processing so nested dispatches enqueue a fresh batch instead
    // of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_runtime_effect(runtime, effect);
        }
    });
}

fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::PersistLayout => {
            let state = runtime.state.get_untracked();
            let saved = runtime
                .prefs
                .with_value(|prefs| persistence::persist_layout_snapshot(prefs.as_ref(), &state));
            if let Err(err) = saved {
                logging::warn!("persist layout failed: {err}");
            }
        }
        RuntimeEffect::PersistTheme => {
            let theme = runtime.state.with_untracked(|state| state.theme.clone());
            let saved = runtime
                .prefs
                .with_value(|prefs| persistence::persist_theme(prefs.as_ref(), &theme));
            if let Err(err) = saved {
                logging::warn!("persist theme failed: {err}");
            }
        }
        RuntimeEffect::FocusSpotlightInput => {
            request_animation_frame(|| focus_element_by_id(SPOTLIGHT_INPUT_ID));
        }
        RuntimeEffect::ScheduleNoticeDismiss {
            notice_id,
            after_ms,
        } => {
            set_timeout(
                move || runtime.dispatch_action(DesktopAction::DismissNotice { notice_id }),
                Duration::from_millis(u64::from(after_ms)),
            );
        }
    }
}

fn focus_element_by_id(id: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let Some(element) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(id))
        else {
            return;
        };
        if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
            let _ = element.focus();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = id;
    }
}
