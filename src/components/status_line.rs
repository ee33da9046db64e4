use leptos::prelude::*;

use crate::selector::{Status, Tone};

#[component]
pub fn StatusLine(
    /// Message and tone to show; an empty message renders an empty line
    #[prop(into)]
    status: Signal<Status>,
) -> impl IntoView {
    let class = move || match status.get().tone {
        Tone::Info => "status-text status-saved",
        Tone::Error => "status-text status-error",
    };

    view! {
        <p id="profile_message" class=class role="status">
            {move || status.get().text}
        </p>
    }
}
