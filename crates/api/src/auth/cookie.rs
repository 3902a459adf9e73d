//! `Set-Cookie` values for the session and federated sign-in state, and
//! lookup of incoming cookies.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Cookie carrying the session token for browser clients.
pub const SESSION_COOKIE: &str = "alumni_session";

/// Cookie binding a federated sign-in callback to the browser that started it.
pub const OAUTH_STATE_COOKIE: &str = "alumni_oauth_state";

/// How long a federated sign-in may take before its state cookie lapses.
pub const OAUTH_STATE_MAX_AGE_SECS: i64 = 600;

/// Build a `Set-Cookie` value. A `max_age_secs` of zero expires the cookie.
pub fn build_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn expire_cookie(name: &str, secure: bool) -> String {
    build_cookie(name, "", 0, secure)
}

/// The value of cookie `name` in the request, if present and non-empty.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
