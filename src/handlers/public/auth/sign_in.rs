// handlers/public/auth/sign_in.rs - POST /api/auth/sign-in handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::auth::{SignInInput, SignInResult};
use crate::services::AuthService;
use crate::session::{set_session_cookies, ClientMeta, SessionCookies};
use crate::state::AppState;
use crate::validation::BodyCheck;

pub(crate) fn parse_sign_in(body: &Value) -> ApiResult<SignInInput> {
    let mut check = BodyCheck::new(body);
    let username = check.required_string("username", true, "Username is required");
    let password = check.required_string("password", false, "Password is required");
    let remember_me = check.optional_bool("rememberMe").unwrap_or(false);
    check.finish("Invalid sign-in payload")?;

    let (Some(username), Some(password)) = (username, password) else {
        return Err(ApiError::validation_error("Invalid sign-in payload"));
    };

    Ok(SignInInput {
        username,
        password,
        remember_me,
    })
}

/// Authenticate against the provider and store its session in cookies.
///
/// Body: `{"username", "password", "rememberMe"?}`. Without `rememberMe` the
/// cookies last for the browser session only.
pub async fn sign_in_post(
    State(state): State<AppState>,
    meta: ClientMeta,
    jar: CookieJar,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<SignInResult>)> {
    let Json(body) = body?;
    let input = parse_sign_in(&body)?;

    let result = AuthService::new(&state.upstream).sign_in(&input, &meta).await?;

    let jar = set_session_cookies(
        jar,
        SessionCookies {
            session_id: result.session_id.clone(),
            user_id: result.user_id.clone(),
            lang: result.lang.clone(),
            token_login: result.token_login.clone(),
            remember_me: Some(input.remember_me),
        },
        state.config.session.secure_cookies,
        state.config.session.max_age_secs,
    );

    Ok((jar, Json(result)))
}
