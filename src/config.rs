use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Name of the optional global the host page sets before loading the app.
pub const CONFIG_GLOBAL: &str = "__PROFILES_CONFIG__";

/// Runtime settings. Any field the host page leaves out keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfilesConfig {
    /// Prefix for the `/api/...` endpoints; empty means same origin.
    pub api_base: String,
    pub cookie_name: String,
    pub cookie_days: i64,
    /// Global JS function that reloads the song list. Empty disables it.
    pub songs_refresher: String,
    /// `tracing` filter directive, e.g. `"debug"` or `"songs_profiles=trace"`.
    pub log_filter: String,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            cookie_name: "currentProfileId".to_string(),
            cookie_days: 365,
            songs_refresher: "get_songs".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl ProfilesConfig {
    /// Read `window.__PROFILES_CONFIG__`, falling back to defaults when it is absent.
    pub fn from_window() -> Result<Self, String> {
        let Some(window) = web_sys::window() else {
            return Ok(Self::default());
        };
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
            .map_err(|e| format!("{:?}", e))?;
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_yields_defaults() {
        let config: ProfilesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProfilesConfig::default());
        assert_eq!(config.cookie_name, "currentProfileId");
        assert_eq!(config.cookie_days, 365);
        assert_eq!(config.songs_refresher, "get_songs");
    }

    #[test]
    fn test_partial_override() {
        let config: ProfilesConfig =
            serde_json::from_str(r#"{"api_base":"http://pi.local:5000","log_filter":"debug"}"#)
                .unwrap();
        assert_eq!(config.api_base, "http://pi.local:5000");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.cookie_days, 365);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(serde_json::from_str::<ProfilesConfig>(r#"{"cookie_days":"forever"}"#).is_err());
    }
}
