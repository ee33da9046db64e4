use chrono::{DateTime, TimeDelta, Utc};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::selector::SelectionStore;

const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
const DEFAULT_DAYS: i64 = 365;

/// Expiry `days` after `now`. A lifetime chrono cannot represent falls back to a year.
pub fn expiry_after(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    let expires = TimeDelta::try_days(days).and_then(|delta| now.checked_add_signed(delta));
    expires.unwrap_or_else(|| {
        warn!("Cookie lifetime of {} days is out of range, using {}", days, DEFAULT_DAYS);
        now + TimeDelta::days(DEFAULT_DAYS)
    })
}

/// Build a site-wide `Set-Cookie`-style assignment for `document.cookie`.
pub fn format_cookie(name: &str, value: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{}={};expires={};path=/",
        name,
        urlencoding::encode(value),
        expires.format(EXPIRES_FORMAT)
    )
}

/// Assignment that makes the browser drop the cookie.
pub fn expired_cookie(name: &str) -> String {
    format_cookie(name, "", DateTime::<Utc>::UNIX_EPOCH)
}

/// Look up `name` in a `document.cookie` string (`a=1; b=2`), URL-decoding the value.
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim_start)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()
}

/// Durable selection kept in a browser cookie.
#[derive(Debug, Clone)]
pub struct CookieJar {
    name: String,
    days: i64,
}

impl CookieJar {
    pub fn new(name: impl Into<String>, days: i64) -> Self {
        Self {
            name: name.into(),
            days,
        }
    }

    fn write(&self, assignment: &str) {
        let Some(doc) = html_document() else {
            return;
        };
        if let Err(e) = doc.set_cookie(assignment) {
            warn!("Failed to write cookie {}: {:?}", self.name, e);
        }
    }
}

impl SelectionStore for CookieJar {
    fn load(&self) -> Option<i64> {
        let cookies = html_document()?.cookie().ok()?;
        find_cookie(&cookies, &self.name)?.trim().parse().ok()
    }

    fn save(&self, id: i64) {
        let expires = expiry_after(Utc::now(), self.days);
        self.write(&format_cookie(&self.name, &id.to_string(), expires));
    }

    fn clear(&self) {
        self.write(&expired_cookie(&self.name));
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_cookie_layout() {
        let expires = Utc.with_ymd_and_hms(2027, 10, 16, 8, 30, 0).unwrap();
        assert_eq!(
            format_cookie("currentProfileId", "42", expires),
            "currentProfileId=42;expires=Sat, 16 Oct 2027 08:30:00 GMT;path=/"
        );
    }

    #[test]
    fn test_format_cookie_encodes_value() {
        let expires = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
        let cookie = format_cookie("k", "a b;c", expires);
        assert!(cookie.starts_with("k=a%20b%3Bc;"), "got {}", cookie);
    }

    #[test]
    fn test_expired_cookie_is_in_the_past() {
        assert_eq!(
            expired_cookie("currentProfileId"),
            "currentProfileId=;expires=Thu, 01 Jan 1970 00:00:00 GMT;path=/"
        );
    }

    #[test]
    fn test_expiry_after_adds_days() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        assert_eq!(
            expiry_after(now, 365),
            Utc.with_ymd_and_hms(2027, 10, 16, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_expiry_after_out_of_range_falls_back_to_a_year() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let year_later = Utc.with_ymd_and_hms(2027, 10, 16, 12, 0, 0).unwrap();
        assert_eq!(expiry_after(now, 1_000_000_000_000), year_later);
        assert_eq!(expiry_after(now, i64::MIN), year_later);
        assert_eq!(expiry_after(now, 100_000_000), year_later);
    }

    #[test]
    fn test_find_cookie_among_others() {
        let cookies = "theme=dark; currentProfileId=2; session=abc";
        assert_eq!(find_cookie(cookies, "currentProfileId").as_deref(), Some("2"));
        assert_eq!(find_cookie(cookies, "theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_find_cookie_requires_exact_name() {
        let cookies = "xcurrentProfileId=5; currentProfileIdx=6";
        assert_eq!(find_cookie(cookies, "currentProfileId"), None);
        assert_eq!(find_cookie("", "currentProfileId"), None);
    }

    #[test]
    fn test_find_cookie_decodes_value() {
        assert_eq!(find_cookie("name=J%C3%BCrgen%20K", "name").as_deref(), Some("Jürgen K"));
    }
}
