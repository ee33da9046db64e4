use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Request, RequestInit, Response};

use crate::error::{Action, ProfileError};
use crate::selector::ProfileBackend;

pub const GET_PROFILES: &str = "/api/get_profiles";
pub const CREATE_PROFILE: &str = "/api/create_profile";
pub const DELETE_PROFILE: &str = "/api/delete_profile";
pub const SET_CURRENT_PROFILE: &str = "/api/set_current_profile";

// -- Profile matching backend rows --

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
}

// -- Request bodies --

#[derive(Serialize)]
struct CreateProfileArgs<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct DeleteProfileArgs {
    profile_id: i64,
}

#[derive(Serialize)]
struct SetCurrentProfileArgs {
    profile_id: Option<i64>,
}

// -- Response bodies --

#[derive(Deserialize)]
struct ProfilesResponse {
    #[serde(default)]
    profiles: Option<Vec<Profile>>,
}

#[derive(Deserialize)]
struct CreateProfileResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    profile: Option<Profile>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct DeleteProfileResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

fn decode<T: DeserializeOwned>(action: Action, body: &str) -> Result<T, ProfileError> {
    serde_json::from_str(body).map_err(|e| ProfileError::parse(action, e.to_string()))
}

/// A missing or null `profiles` field reads as an empty list.
pub fn parse_profiles(body: &str) -> Result<Vec<Profile>, ProfileError> {
    let resp: ProfilesResponse = decode(Action::Load, body)?;
    Ok(resp.profiles.unwrap_or_default())
}

pub fn parse_create_response(body: &str) -> Result<Profile, ProfileError> {
    let resp: CreateProfileResponse = decode(Action::Create, body)?;
    if !resp.success {
        return Err(ProfileError::rejected(Action::Create, resp.error));
    }
    resp.profile
        .ok_or_else(|| ProfileError::parse(Action::Create, "success response without profile"))
}

pub fn parse_delete_response(body: &str) -> Result<(), ProfileError> {
    let resp: DeleteProfileResponse = decode(Action::Delete, body)?;
    if resp.success {
        Ok(())
    } else {
        Err(ProfileError::rejected(Action::Delete, resp.error))
    }
}

fn js_detail(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Issue a request through `window.fetch` and return the raw body text.
/// Non-2xx statuses are not errors here; the body decides.
async fn send(method: &str, url: &str, body: Option<String>) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| js_detail(&e))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| js_detail(&e))?;
    }

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_detail(&e))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| js_detail(&e))?;
    if !resp.ok() {
        debug!("{} {} answered HTTP {}", method, url, resp.status());
    }

    let text = JsFuture::from(resp.text().map_err(|e| js_detail(&e))?)
        .await
        .map_err(|e| js_detail(&e))?;
    Ok(text.as_string().unwrap_or_default())
}

async fn post_json<T: Serialize>(url: &str, args: &T) -> Result<String, String> {
    let body = serde_json::to_string(args).map_err(|e| e.to_string())?;
    send("POST", url, Some(body)).await
}

/// Talks to the songs backend through the browser's `fetch`.
#[derive(Debug, Clone, Default)]
pub struct HttpBackend {
    base: String,
}

impl HttpBackend {
    /// `base` is prefixed to every endpoint path; empty means same origin.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl ProfileBackend for HttpBackend {
    async fn get_profiles(&self) -> Result<Vec<Profile>, ProfileError> {
        let body = send("GET", &self.url(GET_PROFILES), None)
            .await
            .map_err(|e| ProfileError::network(Action::Load, e))?;
        parse_profiles(&body)
    }

    async fn create_profile(&self, name: &str) -> Result<Profile, ProfileError> {
        let body = post_json(&self.url(CREATE_PROFILE), &CreateProfileArgs { name })
            .await
            .map_err(|e| ProfileError::network(Action::Create, e))?;
        parse_create_response(&body)
    }

    async fn delete_profile(&self, id: i64) -> Result<(), ProfileError> {
        let body = post_json(&self.url(DELETE_PROFILE), &DeleteProfileArgs { profile_id: id })
            .await
            .map_err(|e| ProfileError::network(Action::Delete, e))?;
        parse_delete_response(&body)
    }

    fn announce_current(&self, id: Option<i64>) {
        let url = self.url(SET_CURRENT_PROFILE);
        spawn_local(async move {
            if let Err(e) = post_json(&url, &SetCurrentProfileArgs { profile_id: id }).await {
                debug!("set_current_profile({:?}) failed: {}", id, e);
            }
        });
    }
}
