//! Response-side middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::error::ErrorCode;
use crate::session::clear_session_cookies;
use crate::state::AppState;

/// Expire every session cookie on an AUTH_REQUIRED response, using the same
/// `Secure` setting that sign-in used to write them
pub async fn clear_dead_session(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    if response.extensions().get::<ErrorCode>() != Some(&ErrorCode::AuthRequired) {
        return response;
    }

    let jar = clear_session_cookies(CookieJar::new(), state.config.session.secure_cookies);
    (jar, response).into_response()
}
