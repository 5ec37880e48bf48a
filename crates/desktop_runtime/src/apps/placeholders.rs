//! Built-in hosted mini-apps.
//!
//! Each app keeps one JSON record in the shared preference store, namespaced by its app key.
//! A record that fails to decode fails the mount, which the window's error boundary contains.

use std::rc::Rc;

use desktop_app_contract::{AppMountContext, AppMountError};
use leptos::*;
use platform_host::PrefsStore;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::runtime_context::use_desktop_runtime;

const STATE_RECORD: &str = "state";

fn prefs_store() -> Rc<dyn PrefsStore> {
    use_desktop_runtime().prefs.get_value()
}

fn load_state<T: DeserializeOwned + Default>(
    context: &AppMountContext,
    store: &dyn PrefsStore,
) -> Result<T, AppMountError> {
    Ok(context.load_record(store, STATE_RECORD)?.unwrap_or_default())
}

/// Saves `state` whenever it changes.
fn persist_on_change<T: Serialize + 'static>(
    context: AppMountContext,
    store: Rc<dyn PrefsStore>,
    state: RwSignal<T>,
) {
    create_effect(move |_| {
        let saved = state.with(|value| context.save_record(store.as_ref(), STATE_RECORD, value));
        if let Err(err) = saved {
            logging::warn!("{} state save failed: {err}", context.app_namespace);
        }
    });
}

fn mount_with_state<T, F, V>(context: AppMountContext, render: F) -> Result<View, AppMountError>
where
    T: Serialize + DeserializeOwned + Default + 'static,
    F: FnOnce(RwSignal<T>) -> V,
    V: IntoView,
{
    let store = prefs_store();
    let restored = load_state::<T>(&context, store.as_ref())?;
    let state = create_rw_signal(restored);
    persist_on_change(context, store, state);
    Ok(render(state).into_view())
}

// Pomodoro

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PomodoroState {
    focus_minutes: u32,
    break_minutes: u32,
    completed_sessions: u32,
}

impl Default for PomodoroState {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            break_minutes: 5,
            completed_sessions: 0,
        }
    }
}

fn parse_minutes(raw: &str, fallback: u32) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(fallback).clamp(1, 120)
}

pub(super) fn mount_pomodoro_app(context: AppMountContext) -> Result<View, AppMountError> {
    mount_with_state(context, |state: RwSignal<PomodoroState>| {
        view! {
            <div class="app-shell app-pomodoro">
                <div class="app-toolbar" role="group" aria-label="Pomodoro settings">
                    <label>
                        "Focus "
                        <input
                            class="app-field"
                            type="number"
                            min="1"
                            max="120"
                            prop:value=move || state.get().focus_minutes.to_string()
                            on:change=move |ev| {
                                let minutes = parse_minutes(&event_target_value(&ev), 25);
                                state.update(|s| s.focus_minutes = minutes);
                            }
                        />
                        " min"
                    </label>
                    <label>
                        "Break "
                        <input
                            class="app-field"
                            type="number"
                            min="1"
                            max="120"
                            prop:value=move || state.get().break_minutes.to_string()
                            on:change=move |ev| {
                                let minutes = parse_minutes(&event_target_value(&ev), 5);
                                state.update(|s| s.break_minutes = minutes);
                            }
                        />
                        " min"
                    </label>
                </div>
                <p class="app-pomodoro-readout">
                    {move || format!("{:02}:00", state.get().focus_minutes)}
                </p>
                <div class="app-toolbar">
                    <button
                        type="button"
                        class="app-action"
                        on:click=move |_| state.update(|s| s.completed_sessions += 1)
                    >
                        "Complete session"
                    </button>
                    <button
                        type="button"
                        class="app-action"
                        on:click=move |_| state.update(|s| s.completed_sessions = 0)
                    >
                        "Reset count"
                    </button>
                </div>
                <div class="app-statusbar">
                    <span>{move || format!("Sessions completed: {}", state.get().completed_sessions)}</span>
                </div>
            </div>
        }
    })
}

// Markdown notes

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct NoteDraft {
    body: String,
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub(super) fn mount_markdown_notes_app(context: AppMountContext) -> Result<View, AppMountError> {
    mount_with_state(context, |state: RwSignal<NoteDraft>| {
        view! {
            <div class="app-shell app-notes">
                <textarea
                    class="app-editor"
                    aria-label="Note"
                    placeholder="# Start writing"
                    prop:value=move || state.get().body
                    on:input=move |ev| {
                        let body = event_target_value(&ev);
                        state.update(|s| s.body = body);
                    }
                ></textarea>
                <div class="app-statusbar">
                    <span>{move || format!("{} words", state.with(|s| word_count(&s.body)))}</span>
                    <span>{move || format!("{} characters", state.with(|s| s.body.chars().count()))}</span>
                </div>
            </div>
        }
    })
}

// Record lists shared by snippets, commands, and knowledge base articles

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ListEntry {
    id: u64,
    title: String,
    body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct EntryListState {
    entries: Vec<ListEntry>,
    next_id: u64,
}

impl EntryListState {
    /// Appends a trimmed entry. Blank titles are rejected.
    fn add(&mut self, title: &str, body: &str) -> Option<u64> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(ListEntry {
            id,
            title: title.to_string(),
            body: body.trim_end().to_string(),
        });
        Some(id)
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }

    fn filtered(&self, filter: &str) -> Vec<ListEntry> {
        let needle = filter.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                needle.is_empty()
                    || entry.title.to_lowercase().contains(&needle)
                    || entry.body.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct EntryListLabels {
    noun: &'static str,
    title_placeholder: &'static str,
    body_placeholder: &'static str,
    monospace: bool,
}

fn render_entry_list(state: RwSignal<EntryListState>, labels: EntryListLabels) -> impl IntoView {
    let title = create_rw_signal(String::new());
    let body = create_rw_signal(String::new());
    let filter = create_rw_signal(String::new());
    let body_class = if labels.monospace {
        "app-entry-body app-mono"
    } else {
        "app-entry-body"
    };

    let add = move |_| {
        let added = state
            .try_update(|s| s.add(&title.get_untracked(), &body.get_untracked()))
            .flatten();
        if added.is_some() {
            title.set(String::new());
            body.set(String::new());
        }
    };

    view! {
        <div class="app-shell app-entry-list">
            <form class="app-toolbar" on:submit=move |ev| ev.prevent_default()>
                <input
                    class="app-field"
                    type="text"
                    placeholder=labels.title_placeholder
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <textarea
                    class=body_class
                    placeholder=labels.body_placeholder
                    prop:value=move || body.get()
                    on:input=move |ev| body.set(event_target_value(&ev))
                ></textarea>
                <button type="submit" class="app-action" on:click=add>
                    {format!("Add {}", labels.noun)}
                </button>
            </form>
            <input
                class="app-field"
                type="search"
                placeholder="Filter"
                prop:value=move || filter.get()
                on:input=move |ev| filter.set(event_target_value(&ev))
            />
            <ul class="app-entry-items">
                {move || {
                    let visible = state.with(|s| s.filtered(&filter.get()));
                    visible
                        .into_iter()
                        .map(|entry| {
                            let id = entry.id;
                            view! {
                                <li>
                                    <strong>{entry.title}</strong>
                                    <pre class=body_class>{entry.body}</pre>
                                    <button
                                        type="button"
                                        class="app-action"
                                        on:click=move |_| state.update(|s| s.remove(id))
                                    >
                                        "Delete"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <div class="app-statusbar">
                <span>{move || format!("{} {}(s)", state.with(|s| s.entries.len()), labels.noun)}</span>
            </div>
        </div>
    }
}

pub(super) fn mount_code_snippets_app(context: AppMountContext) -> Result<View, AppMountError> {
    mount_with_state(context, |state| {
        render_entry_list(
            state,
            EntryListLabels {
                noun: "snippet",
                title_placeholder: "Snippet name",
                body_placeholder: "Paste code here",
                monospace: true,
            },
        )
    })
}

pub(super) fn mount_command_center_app(context: AppMountContext) -> Result<View, AppMountError> {
    mount_with_state(context, |state| {
        render_entry_list(
            state,
            EntryListLabels {
                noun: "command",
                title_placeholder: "What it does",
                body_placeholder: "git log --oneline",
                monospace: true,
            },
        )
    })
}

pub(super) fn mount_knowledge_base_app(context: AppMountContext) -> Result<View, AppMountError> {
    mount_with_state(context, |state| {
        render_entry_list(
            state,
            EntryListLabels {
                noun: "article",
                title_placeholder: "Article title",
                body_placeholder: "What you learned",
                monospace: false,
            },
        )
    })
}

// JSON tools

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonMode {
    Pretty,
    Minify,
}

fn transform_json(input: &str, mode: JsonMode) -> Result<String, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    match mode {
        JsonMode::Pretty => serde_json::to_string_pretty(&value),
        JsonMode::Minify => serde_json::to_string(&value),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct JsonToolsState {
    input: String,
}

pub(super) fn mount_json_tools_app(context: AppMountContext) -> Result<View, AppMountError> {
    mount_with_state(context, |state: RwSignal<JsonToolsState>| {
        let output = create_rw_signal(Ok::<String, String>(String::new()));
        let run = move |mode: JsonMode| {
            let result = state.with_untracked(|s| transform_json(&s.input, mode));
            output.set(result.map_err(|err| err.to_string()));
        };

        view! {
            <div class="app-shell app-json-tools">
                <textarea
                    class="app-editor app-mono"
                    aria-label="JSON input"
                    placeholder="{\"paste\": \"json\"}"
                    prop:value=move || state.get().input
                    on:input=move |ev| {
                        let input = event_target_value(&ev);
                        state.update(|s| s.input = input);
                    }
                ></textarea>
                <div class="app-toolbar">
                    <button type="button" class="app-action" on:click=move |_| run(JsonMode::Pretty)>
                        "Format"
                    </button>
                    <button type="button" class="app-action" on:click=move |_| run(JsonMode::Minify)>
                        "Minify"
                    </button>
                </div>
                {move || match output.get() {
                    Ok(text) => view! { <pre class="app-mono" aria-label="JSON output">{text}</pre> }.into_view(),
                    Err(message) => view! { <p class="app-error" role="alert">{message}</p> }.into_view(),
                }}
            </div>
        }
    })
}

// Kanban board

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum KanbanColumn {
    Todo,
    Doing,
    Done,
}

impl KanbanColumn {
    const ALL: [KanbanColumn; 3] = [Self::Todo, Self::Doing, Self::Done];

    fn title(self) -> &'static str {
        match self {
            Self::Todo => "To do",
            Self::Doing => "In progress",
            Self::Done => "Done",
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Todo => Some(Self::Doing),
            Self::Doing => Some(Self::Done),
            Self::Done => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            Self::Todo => None,
            Self::Doing => Some(Self::Todo),
            Self::Done => Some(Self::Doing),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct KanbanCard {
    id: u64,
    title: String,
    column: KanbanColumn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct KanbanState {
    cards: Vec<KanbanCard>,
    next_id: u64,
}

impl KanbanState {
    fn add(&mut self, title: &str) -> Option<u64> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.cards.push(KanbanCard {
            id,
            title: title.to_string(),
            column: KanbanColumn::Todo,
        });
        Some(id)
    }

    /// Moves a card one column forward or back. Returns `false` at the board edges.
    fn shift(&mut self, id: u64, forward: bool) -> bool {
        let Some(card) = self.cards.iter_mut().find(|card| card.id == id) else {
            return false;
        };
        let target = if forward {
            card.column.next()
        } else {
            card.column.previous()
        };
        match target {
            Some(column) => {
                card.column = column;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: u64) {
        self.cards.retain(|card| card.id != id);
    }

    fn column(&self, column: KanbanColumn) -> Vec<KanbanCard> {
        self.cards
            .iter()
            .filter(|card| card.column == column)
            .cloned()
            .collect()
    }
}

pub(super) fn mount_kanban_board_app(context: AppMountContext) -> Result<View, AppMountError> {
    mount_with_state(context, |state: RwSignal<KanbanState>| {
        let draft = create_rw_signal(String::new());
        let add = move |_| {
            let added = state
                .try_update(|s| s.add(&draft.get_untracked()))
                .flatten();
            if added.is_some() {
                draft.set(String::new());
            }
        };

        view! {
            <div class="app-shell app-kanban">
                <form class="app-toolbar" on:submit=move |ev| ev.prevent_default()>
                    <input
                        class="app-field"
                        type="text"
                        placeholder="New card"
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                    />
                    <button type="submit" class="app-action" on:click=add>"Add card"</button>
                </form>
                <div class="app-kanban-columns">
                    {KanbanColumn::ALL
                        .into_iter()
                        .map(|column| {
                            view! {
                                <section class="app-kanban-column" aria-label=column.title()>
                                    <h3>{column.title()}</h3>
                                    <ul>
                                        {move || {
                                            state
                                                .with(|s| s.column(column))
                                                .into_iter()
                                                .map(|card| {
                                                    let id = card.id;
                                                    view! {
                                                        <li class="app-kanban-card">
                                                            <span>{card.title}</span>
                                                            <button
                                                                type="button"
                                                                aria-label="Move back"
                                                                disabled=column.previous().is_none()
                                                                on:click=move |_| {
                                                                    state.update(|s| {
                                                                        s.shift(id, false);
                                                                    });
                                                                }
                                                            >
                                                                "<"
                                                            </button>
                                                            <button
                                                                type="button"
                                                                aria-label="Move forward"
                                                                disabled=column.next().is_none()
                                                                on:click=move |_| {
                                                                    state.update(|s| {
                                                                        s.shift(id, true);
                                                                    });
                                                                }
                                                            >
                                                                ">"
                                                            </button>
                                                            <button
                                                                type="button"
                                                                aria-label="Delete card"
                                                                on:click=move |_| state.update(|s| s.remove(id))
                                                            >
                                                                "x"
                                                            </button>
                                                        </li>
                                                    }
                                                })
                                                .collect_view()
                                        }}
                                    </ul>
                                </section>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn json_tools_format_and_minify() {
        let input = r#"{ "b": [1, 2], "a": null }"#;
        assert_eq!(
            transform_json(input, JsonMode::Minify).expect("valid json"),
            r#"{"b":[1,2],"a":null}"#
        );
        assert_eq!(
            transform_json("[1]", JsonMode::Pretty).expect("valid json"),
            "[\n  1\n]"
        );
        assert!(transform_json("{", JsonMode::Pretty).is_err());
    }

    #[test]
    fn entry_lists_reject_blank_titles_and_filter_by_text() {
        let mut list = EntryListState::default();
        assert_eq!(list.add("   ", "body"), None);
        let first = list.add(" Deploy ", "cargo build --release\n").expect("added");
        list.add("Logs", "journalctl -f").expect("added");

        assert_eq!(list.entries[0].title, "Deploy");
        assert_eq!(list.entries[0].body, "cargo build --release");
        assert_eq!(list.filtered("JOURNAL").len(), 1);
        assert_eq!(list.filtered("").len(), 2);

        list.remove(first);
        assert_eq!(list.entries.len(), 1);
    }

    #[test]
    fn kanban_cards_move_between_columns_within_bounds() {
        let mut board = KanbanState::default();
        let id = board.add("Write tests").expect("added");

        assert!(!board.shift(id, false));
        assert!(board.shift(id, true));
        assert!(board.shift(id, true));
        assert!(!board.shift(id, true));
        assert_eq!(board.column(KanbanColumn::Done).len(), 1);
        assert!(!board.shift(99, true));
    }

    #[test]
    fn pomodoro_minutes_are_clamped() {
        assert_eq!(parse_minutes("0", 25), 1);
        assert_eq!(parse_minutes("500", 25), 120);
        assert_eq!(parse_minutes("abc", 25), 25);
        assert_eq!(word_count("  one two\nthree "), 3);
    }
}
