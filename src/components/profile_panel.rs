use std::rc::Rc;

use leptos::html::Input;
use leptos::prelude::*;
use tracing::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpBackend;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::status_line::StatusLine;
use crate::config::ProfilesConfig;
use crate::cookie::CookieJar;
use crate::selection::{parse_option_value, select_options, Selection};
use crate::selector::{ProfileSelector, SelectorSnapshot};

type WebSelector = Rc<ProfileSelector<HttpBackend, CookieJar>>;

fn selected_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        .map(|s| s.value())
        .unwrap_or_default()
}

/// Profile picker for the songs page: select, create and delete profiles.
#[component]
pub fn ProfilePanel(
    config: ProfilesConfig,
    /// Reloads dependent song data whenever the active profile changes
    on_profile_change: Option<Callback<()>>,
) -> impl IntoView {
    let mut selector = ProfileSelector::new(
        HttpBackend::new(config.api_base.clone()),
        CookieJar::new(config.cookie_name.clone(), config.cookie_days),
    );
    if let Some(refresh) = on_profile_change {
        selector = selector.with_refresher(move || refresh.run(()));
    }
    let selector: StoredValue<WebSelector, LocalStorage> =
        StoredValue::new_local(Rc::new(selector));

    let (state, set_state) = signal(SelectorSnapshot::default());
    let (name, set_name) = signal(String::new());
    let (busy, set_busy) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    let sync = move |s: &WebSelector| set_state.set(s.snapshot());

    // Load profiles on mount
    Effect::new(move |_| {
        let s = selector.get_value();
        spawn_local(async move {
            // Failures are already on the status line.
            let _ = s.load_profiles().await;
            sync(&s);
            info!("Profile selector initialised");
        });
    });

    let create = move || {
        let s = selector.get_value();
        let raw = name.get_untracked();
        // Blank names never disable the input, so focus can go straight back.
        if s.check_name(&raw).is_err() {
            sync(&s);
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            if let Ok(profile) = s.create_profile(&raw).await {
                debug!("Now using profile {}", profile.id);
                set_name.set(String::new());
            }
            set_busy.set(false);
            sync(&s);
        });
    };

    let on_select = move |ev: web_sys::Event| {
        let id = parse_option_value(&selected_value(&ev));
        selector.with_value(|s| {
            s.select_profile(id);
            sync(s);
        });
    };

    let ask_delete = move |id: i64| {
        selector.with_value(|s| {
            s.request_delete(id);
            sync(s);
        });
    };

    let confirm_delete = Callback::new(move |_: ()| {
        set_state.update(|st| st.pending_delete = None);
        let s = selector.get_value();
        spawn_local(async move {
            let _ = s.confirm_delete().await;
            sync(&s);
        });
    });

    let cancel_delete = Callback::new(move |_: ()| {
        selector.with_value(|s| {
            s.cancel_delete();
            sync(s);
        });
    });

    view! {
        <section class="settings-section profile-panel">
            <h3>"Profile"</h3>
            <div class="form-group">
                <label for="profile_select">"Current profile"</label>
                <div class="input-row">
                    <select id="profile_select" class="input" on:change=on_select>
                        {move || {
                            let st = state.get();
                            select_options(&st.profiles, st.selection)
                                .into_iter()
                                .map(|opt| {
                                    view! {
                                        <option value=opt.value prop:selected=opt.selected>
                                            {opt.label}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </select>
                </div>
            </div>

            <div class="form-group">
                <label for="profile_name_input">"New profile"</label>
                <div class="input-row">
                    <input
                        id="profile_name_input"
                        type="text"
                        placeholder="Profile name"
                        class="input"
                        node_ref=input_ref
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" { create(); }
                        }
                        disabled=move || busy.get()
                    />
                    <button
                        id="create_profile_btn"
                        class="btn btn-save"
                        on:click=move |_| create()
                        disabled=move || busy.get()
                    >
                        {move || if busy.get() { "Creating..." } else { "Create" }}
                    </button>
                </div>
            </div>

            <ul class="profile-list">
                {move || {
                    state.get().profiles.into_iter().map(|p| {
                        let id = p.id;
                        let active = move || state.get().selection == Selection::Bound(id);
                        view! {
                            <li class="profile-item" class:active=active>
                                <span class="profile-name">{p.name}</span>
                                <button
                                    class="btn btn-delete"
                                    title="Delete profile and its highscores"
                                    on:click=move |_| ask_delete(id)
                                >
                                    "Delete"
                                </button>
                            </li>
                        }
                    }).collect::<Vec<_>>()
                }}
            </ul>

            <StatusLine status=Signal::derive(move || state.get().status) />

            // Delete confirmation modal
            {move || {
                state.get().pending_delete.map(|p| {
                    view! {
                        <ConfirmDialog
                            title="Delete Profile?"
                            message=format!(
                                "This will permanently delete \"{}\" and all of its highscores. This cannot be undone.",
                                p.name
                            )
                            confirm_label="Delete"
                            on_confirm=confirm_delete
                            on_cancel=cancel_delete
                        />
                    }
                })
            }}
        </section>
    }
}
