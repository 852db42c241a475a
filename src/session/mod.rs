//! Session cookie handling.
//!
//! The upstream provider authenticates every call with the `session_id` it
//! handed out at sign-in. The browser keeps that id (and the member id) in the
//! session cookie pair; legacy `fotochat_*` names are still honoured on read.

pub mod client;
pub mod cookies;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::error::ApiError;

pub use client::ClientMeta;
pub use cookies::{clear_session_cookies, set_session_cookies, SessionCookies};

pub const SESSION_ID_COOKIE: &str = "dating_session_id";
pub const USER_ID_COOKIE: &str = "dating_user_id";
pub const LANG_COOKIE: &str = "dating_lang";
pub const TOKEN_LOGIN_COOKIE: &str = "dating_token_login";
pub const LEGACY_SESSION_ID_COOKIE: &str = "fotochat_session_id";
pub const LEGACY_USER_ID_COOKIE: &str = "fotochat_user_id";

/// Upstream session id taken from the request cookies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
}

/// Session plus the numeric member id, for endpoints that address "me" upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub session_id: String,
    pub user_id: i64,
}

fn cookie_value(jar: &CookieJar, primary: &str, legacy: &str) -> Option<String> {
    jar.get(primary)
        .or_else(|| jar.get(legacy))
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_id_from(jar: &CookieJar) -> Result<String, ApiError> {
    cookie_value(jar, SESSION_ID_COOKIE, LEGACY_SESSION_ID_COOKIE)
        .ok_or_else(|| ApiError::auth_required("Authentication required"))
}

pub fn user_id_from(jar: &CookieJar) -> Result<i64, ApiError> {
    let raw = cookie_value(jar, USER_ID_COOKIE, LEGACY_USER_ID_COOKIE)
        .ok_or_else(|| ApiError::auth_required("Authentication required"))?;

    match parse_leading_int(&raw) {
        Some(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::auth_required("Authentication required")),
    }
}

/// Integer prefix of a string after optional whitespace and sign ("42abc" -> 42)
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Session {
            session_id: session_id_from(&jar)?,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(SessionUser {
            session_id: session_id_from(&jar)?,
            user_id: user_id_from(&jar)?,
        })
    }
}
