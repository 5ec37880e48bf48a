//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, and boot
//! hydration. UI composition stays in [`crate::components`].

use std::rc::Rc;

use leptos::*;
use platform_host::PrefsStore;

use crate::{
    apps::AppRegistry,
    effect_executor,
    model::{DeepLinkState, DesktopState, InteractionState},
    persistence,
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// App catalog fixed for the lifetime of the provider.
    pub registry: StoredValue<AppRegistry>,
    /// Preference store used for shell and hosted-app persistence.
    pub prefs: StoredValue<Rc<dyn PrefsStore>>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag/resize interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Preference store assembled by the entry layer.
    prefs_store: Rc<dyn PrefsStore>,
    /// App catalog; defaults to the built-in registry.
    #[prop(optional)]
    registry: Option<AppRegistry>,
    /// Apps to open once boot hydration is done.
    #[prop(optional)]
    deep_link: Option<DeepLinkState>,
    children: Children,
) -> impl IntoView {
    let registry = store_value(registry.unwrap_or_default());
    let prefs = store_value(prefs_store);
    let state = create_rw_signal(DesktopState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui.clone();

        let reduced =
            registry.with_value(|registry| reduce_desktop(registry, &mut desktop, &mut ui, action));
        match reduced {
            Ok(new_effects) => {
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        registry,
        prefs,
        state,
        interaction,
        effects,
        dispatch,
    };

    provide_context(runtime);
    effect_executor::install(runtime);
    boot(runtime, deep_link);

    children().into_view()
}

fn boot(runtime: DesktopRuntimeContext, deep_link: Option<DeepLinkState>) {
    let snapshot = runtime
        .prefs
        .with_value(|prefs| persistence::load_boot_snapshot(prefs.as_ref()));
    if let Some(snapshot) = snapshot {
        runtime.dispatch_action(DesktopAction::HydrateSnapshot { snapshot });
    }
    if let Some(deep_link) = deep_link.filter(|deep_link| !deep_link.is_empty()) {
        logging::log!("opening {} app(s) from deep link", deep_link.open.len());
        runtime.dispatch_action(DesktopAction::ApplyDeepLink { deep_link });
    }
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
