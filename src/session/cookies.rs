use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::{
    LANG_COOKIE, LEGACY_SESSION_ID_COOKIE, LEGACY_USER_ID_COOKIE, SESSION_ID_COOKIE,
    TOKEN_LOGIN_COOKIE, USER_ID_COOKIE,
};

/// Values written after a successful sign-in or sign-up
#[derive(Debug, Clone, Default)]
pub struct SessionCookies {
    pub session_id: String,
    pub user_id: String,
    pub lang: Option<String>,
    pub token_login: Option<String>,
    /// `Some(false)` issues browser-session cookies; anything else persists them
    pub remember_me: Option<bool>,
}

fn base_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .build()
}

pub fn set_session_cookies(
    mut jar: CookieJar,
    input: SessionCookies,
    secure: bool,
    max_age_secs: i64,
) -> CookieJar {
    let persist = input.remember_me != Some(false);

    let make = |name: &'static str, value: String| {
        let mut cookie = base_cookie(name, value, secure);
        if persist {
            cookie.set_max_age(Duration::seconds(max_age_secs));
        }
        cookie
    };

    jar = jar
        .add(make(SESSION_ID_COOKIE, input.session_id))
        .add(make(USER_ID_COOKIE, input.user_id));

    if let Some(lang) = input.lang.filter(|v| !v.is_empty()) {
        jar = jar.add(make(LANG_COOKIE, lang));
    }

    if let Some(token) = input.token_login.filter(|v| !v.is_empty()) {
        jar = jar.add(make(TOKEN_LOGIN_COOKIE, token));
    }

    jar
}

pub fn clear_session_cookies(jar: CookieJar, secure: bool) -> CookieJar {
    [
        SESSION_ID_COOKIE,
        USER_ID_COOKIE,
        LANG_COOKIE,
        TOKEN_LOGIN_COOKIE,
        LEGACY_SESSION_ID_COOKIE,
        LEGACY_USER_ID_COOKIE,
    ]
    .into_iter()
    .fold(jar, |jar, name| {
        let mut cookie = base_cookie(name, String::new(), secure);
        cookie.set_max_age(Duration::ZERO);
        jar.add(cookie)
    })
}
