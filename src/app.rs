use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::config::ProfilesConfig;
use crate::pages::songs::SongsPage;

#[component]
pub fn App(config: ProfilesConfig) -> impl IntoView {
    provide_context(config);

    view! {
        <Router>
            <main class="content">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=SongsPage />
                    <Route path=path!("/songs") view=SongsPage />
                </Routes>
            </main>
        </Router>
    }
}
