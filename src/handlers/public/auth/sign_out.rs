// handlers/public/auth/sign_out.rs - POST /api/auth/sign-out handler

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use serde_json::{json, Value};

use crate::session::clear_session_cookies;
use crate::state::AppState;

/// Drop the session cookie pair (and legacy names); succeeds without a session
pub async fn sign_out_post(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = clear_session_cookies(jar, state.config.session.secure_cookies);
    tracing::info!("session cookies cleared");
    (jar, Json(json!({ "success": true })))
}
