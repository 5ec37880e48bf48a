use std::rc::Rc;

use desktop_runtime::{DeepLinkState, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host::PrefsStore;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Virtual Desktop" />
        <Meta name="description" content="A browser desktop with windowed productivity apps." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/*any" view=DesktopEntry />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
/// Desktop route. `?open=pomodoro,json-tools` opens those apps after boot.
pub fn DesktopEntry() -> impl IntoView {
    let query = use_query_map();
    let deep_link = query.with_untracked(|map| {
        map.get("open")
            .map(|raw| DeepLinkState::parse(raw))
            .unwrap_or_default()
    });
    let prefs_store: Rc<dyn PrefsStore> = Rc::new(platform_host_web::prefs_store());

    view! {
        <DesktopProvider prefs_store=prefs_store deep_link=deep_link>
            <DesktopShell />
        </DesktopProvider>
    }
}
