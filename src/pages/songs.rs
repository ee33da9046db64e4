use leptos::prelude::*;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};

use crate::components::profile_panel::ProfilePanel;
use crate::config::ProfilesConfig;

/// Wrap the named global JS function as a callback, or `None` when no name is configured.
///
/// The function is looked up on every call, so a song-list script loaded
/// after the panel mounts is still picked up.
pub fn songs_refresher(name: &str) -> Option<Callback<()>> {
    if name.is_empty() {
        return None;
    }
    let name = name.to_string();
    Some(Callback::new(move |_: ()| call_global(&name)))
}

fn call_global(name: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let function = js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.dyn_into::<js_sys::Function>().ok());
    match function {
        Some(function) => {
            if let Err(e) = function.call0(&JsValue::NULL) {
                warn!("{}() threw: {:?}", name, e);
            }
        }
        None => debug!("{} is not defined, skipping song refresh", name),
    }
}

#[component]
pub fn SongsPage() -> impl IntoView {
    let config = use_context::<ProfilesConfig>().unwrap_or_default();
    let refresher = songs_refresher(&config.songs_refresher);

    view! {
        <div class="page songs-page">
            <h2>"Songs"</h2>
            <p class="page-description">
                "Highscores are tracked per profile."
            </p>

            <ProfilePanel config=config on_profile_change=refresher />

            // Filled by the song list script
            <div id="songs_list" class="songs-list"></div>
        </div>
    }
}
