pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod session;
pub mod state;
pub mod upstream;
pub mod validation;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::error::method_not_allowed;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.cors_origins);

    Router::new()
        // Service
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_routes())
        // Session-protected routes
        .merge(chat_routes())
        .merge(dashboard_routes())
        .merge(profile_routes())
        .merge(gift_routes())
        .merge(match_routes())
        .merge(wallet_routes())
        // Global middleware
        .layer(axum::middleware::from_fn_with_state(state.clone(), middleware::clear_dead_session))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Listed origins get credentialed CORS; an empty list means permissive (local tooling)
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

fn auth_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/api/auth/sign-in", post(auth::sign_in_post).fallback(method_not_allowed))
        .route("/api/auth/sign-up", post(auth::sign_up_post).fallback(method_not_allowed))
        .route("/api/auth/sign-out", post(auth::sign_out_post))
}

fn chat_routes() -> Router<AppState> {
    use handlers::protected::chat;

    Router::new()
        .route("/api/chat/contacts", get(chat::contacts_get))
        .route("/api/chat/messages", get(chat::messages_get))
        .route("/api/chat/send", post(chat::send_post))
}

fn dashboard_routes() -> Router<AppState> {
    use handlers::protected::dashboard;

    Router::new()
        .route("/api/dashboard/activity", get(dashboard::activity_get))
        .route("/api/dashboard/top-members", get(dashboard::top_members_get))
        .route("/api/dashboard/recent-visitors", get(dashboard::recent_visitors_get))
}

fn profile_routes() -> Router<AppState> {
    use handlers::protected::profile;

    Router::new().route(
        "/api/user/profile",
        get(profile::profile_get).patch(profile::profile_patch),
    )
}

fn gift_routes() -> Router<AppState> {
    use handlers::protected::gifts;

    Router::new()
        .route("/api/gifts/catalog", get(gifts::catalog_get))
        .route("/api/gifts/inventory", get(gifts::inventory_get))
        .route("/api/gifts/history", get(gifts::history_get))
        .route("/api/gifts/buy", post(gifts::buy_post))
        .route("/api/gifts/send", post(gifts::send_post))
}

fn match_routes() -> Router<AppState> {
    use handlers::protected::matches;

    Router::new()
        .route("/api/match/discover", get(matches::discover_get))
        .route("/api/match/matches", get(matches::matches_get))
        .route("/api/match/action", post(matches::action_post))
}

fn wallet_routes() -> Router<AppState> {
    use handlers::protected::wallet;

    Router::new()
        .route("/api/wallet", get(wallet::wallet_get))
        .route("/api/wallet/purchase", post(wallet::purchase_post))
}

async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Pairly BFF",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Backend-for-frontend between the Pairly web app and the dating provider API",
            "endpoints": {
                "health": "/health (public)",
                "auth": "/api/auth/sign-in, /api/auth/sign-up, /api/auth/sign-out (public)",
                "chat": "/api/chat/contacts, /api/chat/messages, /api/chat/send (session)",
                "dashboard": "/api/dashboard/activity, /api/dashboard/top-members, /api/dashboard/recent-visitors (session)",
                "profile": "/api/user/profile (session)",
                "gifts": "/api/gifts/catalog, /api/gifts/inventory, /api/gifts/history, /api/gifts/buy, /api/gifts/send (session)",
                "match": "/api/match/discover, /api/match/matches, /api/match/action (session)",
                "wallet": "/api/wallet, /api/wallet/purchase (session)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.upstream.ping().await {
        Ok(status) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "upstream": "ok",
                    "upstream_status": status
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "upstream unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "upstream_error": e
                }
            })),
        ),
    }
}
