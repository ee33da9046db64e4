mod api;
mod app;
mod components;
mod config;
mod cookie;
mod error;
mod logging;
mod pages;
mod selection;
mod selector;

use leptos::prelude::*;
use tracing::warn;

use app::App;
use config::ProfilesConfig;

fn main() {
    let (config, config_error) = match ProfilesConfig::from_window() {
        Ok(config) => (config, None),
        Err(e) => (ProfilesConfig::default(), Some(e)),
    };
    logging::init(&config.log_filter);
    if let Some(e) = config_error {
        warn!("Ignoring invalid {}: {}", config::CONFIG_GLOBAL, e);
    }

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
