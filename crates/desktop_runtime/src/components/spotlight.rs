use leptos::*;
use system_ui::{Icon, IconName, IconSize, Modal};

use super::{shortcuts::spotlight_key, SPOTLIGHT_INPUT_ID};
use crate::{reducer::DesktopAction, runtime_context::use_desktop_runtime};

const SPOTLIGHT_LISTBOX_ID: &str = "spotlight-results";

fn spotlight_option_id(index: usize) -> String {
    format!("spotlight-option-{index}")
}

#[component]
/// Spotlight search overlay. Mounted only while open.
pub(super) fn SpotlightOverlay() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let spotlight = Signal::derive(move || state.with(|desktop| desktop.spotlight.clone()));

    let on_keydown = Callback::new(move |ev: web_sys::KeyboardEvent| {
        if let Some(key) = spotlight_key(&ev) {
            ev.prevent_default();
            ev.stop_propagation();
            runtime.dispatch_action(DesktopAction::SpotlightKey { key });
        }
    });

    view! {
        <Show when=move || spotlight.with(|spotlight| spotlight.is_open()) fallback=|| ()>
            <Modal
                layout_class="spotlight"
                aria_label="Spotlight search".to_string()
                on_dismiss=Callback::new(move |_| runtime.dispatch_action(DesktopAction::CloseSpotlight))
                on_keydown=on_keydown
            >
                <div data-ui-slot="spotlight-field">
                    <Icon icon=IconName::Search size=IconSize::Md />
                    <input
                        id=SPOTLIGHT_INPUT_ID
                        type="text"
                        role="combobox"
                        autocomplete="off"
                        spellcheck="false"
                        placeholder="Search apps"
                        aria-expanded=move || {
                            spotlight.with(|spotlight| (!spotlight.results().is_empty()).to_string())
                        }
                        aria-controls=SPOTLIGHT_LISTBOX_ID
                        aria-activedescendant=move || {
                            spotlight.with(|spotlight| spotlight.selected_index().map(spotlight_option_id))
                        }
                        prop:value=move || spotlight.with(|spotlight| spotlight.query().to_string())
                        on:input=move |ev| {
                            runtime.dispatch_action(DesktopAction::SetSpotlightQuery {
                                query: event_target_value(&ev),
                            });
                        }
                    />
                </div>
                <ul id=SPOTLIGHT_LISTBOX_ID role="listbox" data-ui-slot="spotlight-results">
                    {move || {
                        spotlight.with(|spotlight| {
                            let selected = spotlight.selected_index();
                            spotlight
                                .results()
                                .iter()
                                .enumerate()
                                .map(|(index, result)| {
                                    let is_selected = selected == Some(index);
                                    view! {
                                        <li
                                            id=spotlight_option_id(index)
                                            role="option"
                                            aria-selected=is_selected.to_string()
                                            data-ui-state=if is_selected { "selected" } else { "idle" }
                                            on:mousedown=|ev| ev.prevent_default()
                                            on:click=move |_| {
                                                runtime.dispatch_action(
                                                    DesktopAction::InvokeSpotlightResult { index },
                                                );
                                            }
                                        >
                                            <Icon icon=result.icon size=IconSize::Sm />
                                            <span>{result.display_name}</span>
                                        </li>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </ul>
                <Show
                    when=move || {
                        spotlight.with(|spotlight| {
                            !spotlight.query().trim().is_empty() && spotlight.results().is_empty()
                        })
                    }
                    fallback=|| ()
                >
                    <p data-ui-slot="spotlight-empty">"No apps match your search."</p>
                </Show>
            </Modal>
        </Show>
    }
}
