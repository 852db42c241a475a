// handlers/public/auth/sign_up.rs - POST /api/auth/sign-up handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::auth::{Gender, LookingFor, SignUpInput, SignUpResult};
use crate::services::AuthService;
use crate::session::{set_session_cookies, ClientMeta, SessionCookies};
use crate::state::AppState;
use crate::validation::{is_valid_email, BodyCheck};

pub(crate) fn parse_sign_up(body: &Value) -> ApiResult<SignUpInput> {
    let mut check = BodyCheck::new(body);

    let username = check.required_string("username", true, "Username is required");
    let password = check.required_string("password", false, "Password is required");

    let email = check.required_string("email", true, "Invalid email address");
    if matches!(&email, Some(email) if !is_valid_email(email)) {
        check.reject("email", "Invalid email address");
    }

    let gender = check.one_of("gender", &Gender::VALUES, Gender::parse);
    let looking_for = check.one_of("lookingFor", &LookingFor::VALUES, LookingFor::parse);
    let date_of_birth = check.required_string("dateOfBirth", false, "Date of birth is required");

    let city = check.optional_trimmed("city");
    if matches!(&city, Some(city) if !city.chars().all(|c| c.is_ascii_digit())) {
        check.reject("city", "City must be numeric");
    }

    check.finish("Invalid sign-up payload")?;

    match (username, password, email, gender, looking_for, date_of_birth) {
        (Some(username), Some(password), Some(email), Some(gender), Some(looking_for), Some(date_of_birth)) => {
            Ok(SignUpInput {
                username,
                password,
                email,
                gender,
                looking_for,
                date_of_birth,
                city,
            })
        }
        _ => Err(ApiError::validation_error("Invalid sign-up payload")),
    }
}

/// Register with the provider and start a persistent session
pub async fn sign_up_post(
    State(state): State<AppState>,
    meta: ClientMeta,
    jar: CookieJar,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<SignUpResult>)> {
    let Json(body) = body?;
    let input = parse_sign_up(&body)?;

    let result = AuthService::new(&state.upstream).sign_up(&input, &meta).await?;

    let jar = set_session_cookies(
        jar,
        SessionCookies {
            session_id: result.session_id.clone(),
            user_id: result.user_id.clone(),
            lang: result.lang.clone(),
            ..Default::default()
        },
        state.config.session.secure_cookies,
        state.config.session.max_age_secs,
    );

    Ok((jar, Json(result)))
}
