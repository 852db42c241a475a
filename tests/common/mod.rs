#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use pairly_bff::{app, config::AppConfig, state::AppState};

pub const API_KEY: &str = "test-api-key";
pub const SESSION: &str = "dating_session_id=sess-1; dating_user_id=7";
pub const EXPIRED_SESSION: &str = "dating_session_id=expired; dating_user_id=7";

/// One call received by the fake provider
#[derive(Debug, Clone)]
pub struct UpstreamCall {
    pub path: String,
    pub method: String,
    /// Query-string parameters, first value per key
    pub params: HashMap<String, String>,
    /// Query-string pairs in wire order
    pub query: Vec<(String, String)>,
    /// Form-body pairs in wire order (empty for GET)
    pub form: Vec<(String, String)>,
    pub content_type: Option<String>,
}

fn pairs(raw: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

type CallLog = Arc<Mutex<Vec<UpstreamCall>>>;

pub struct TestServer {
    pub base_url: String,
    pub upstream_url: String,
    pub client: reqwest::Client,
    calls: CallLog,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Parameters of the most recent provider call on `path`
    pub fn last_call(&self, path: &str) -> Option<HashMap<String, String>> {
        self.last_request(path).map(|call| call.params)
    }

    /// Full record of the most recent provider call on `path`
    pub fn last_request(&self, path: &str) -> Option<UpstreamCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|call| call.path == path)
            .cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

async fn bind_ephemeral() -> Result<(TcpListener, String)> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind 127.0.0.1:{port}"))?;
    Ok((listener, format!("http://127.0.0.1:{port}")))
}

/// Start a fake provider and a BFF pointed at it. Each test gets its own pair
/// because tokio tests do not share a runtime.
pub async fn spawn() -> Result<TestServer> {
    let calls: CallLog = Arc::default();

    let (upstream_listener, upstream_url) = bind_ephemeral().await?;
    let fake = Router::new().fallback(fake_provider).with_state(calls.clone());
    tokio::spawn(async move {
        let _ = axum::serve(upstream_listener, fake).await;
    });

    let mut config = AppConfig::development();
    config.upstream.base_url = upstream_url.clone();
    config.upstream.api_key = API_KEY.to_string().into();
    config.upstream.timeout_secs = 5;

    let (listener, base_url) = bind_ephemeral().await?;
    let router = app(AppState::new(config)?);
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer {
        base_url,
        upstream_url,
        client: reqwest::Client::new(),
        calls,
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

fn ok(body: Value) -> Response {
    Json(body).into_response()
}

/// Canned provider behaviour keyed on path and a few magic parameter values:
/// `session_id=expired` answers `connected: 0`, `session_id=broken` answers 500.
async fn fake_provider(
    State(calls): State<CallLog>,
    method: axum::http::Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    let query = pairs(uri.query().unwrap_or_default());

    let mut params = HashMap::new();
    for (key, value) in &query {
        params.entry(key.clone()).or_insert_with(|| value.clone());
    }

    calls.lock().unwrap().push(UpstreamCall {
        path: path.clone(),
        method: method.to_string(),
        params: params.clone(),
        query,
        form: pairs(&body),
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    let param = |name: &str| params.get(name).map(String::as_str).unwrap_or("");

    match param("session_id") {
        "expired" => return ok(json!({ "connected": 0 })),
        "broken" => {
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Provider database down" })))
                .into_response()
        }
        "garbage" => return (StatusCode::OK, "<html>oops</html>").into_response(),
        _ => {}
    }

    match path.as_str() {
        "/" => ok(json!({ "status": "up" })),

        "/index_api/login" => {
            if param("login") == "anna" && param("pass") == "secret" {
                ok(json!({
                    "connected": 1,
                    "session_id": "sess-1",
                    "user_id": 7,
                    "token_login": "tok-9",
                    "lang": "en"
                }))
            } else {
                ok(json!({ "connected": 0, "session_id": "", "user_id": 0 }))
            }
        }

        "/index_api/subscribe" => {
            if param("login") == "taken" {
                ok(json!({ "accepted": 0, "error": "Username already taken" }))
            } else {
                ok(json!({ "accepted": 1, "session_id": "sess-new", "user_id": "81", "lang": "en" }))
            }
        }

        "/ajax_api/load_contacts" => ok(json!({
            "contacts": [
                {
                    "m_id": "42",
                    "pseudo": "Lena",
                    "photo": "https://cdn.example.com/lena.jpg",
                    "nb_new": "2",
                    "online": "green",
                    "is_friend": "1",
                    "tab_last_msg": ["See you soon"]
                },
                { "m_id": "0", "pseudo": "ghost" },
                { "m_id": 43, "pseudo": "Marc", "online": "yellow" }
            ]
        })),

        "/ajax_api/load_messages" => ok(json!({
            "eclairs": [
                { "id": "501", "exp": "42", "date": "2026-10-01 10:00:00", "msg": "Hi" },
                { "exp": "7", "date": "2026-10-01 10:01:00", "msg": "Hello" }
            ]
        })),

        "/ajax_api/send_message" => ok(json!({ "msg": param("msg"), "date": "2026-10-01 10:02:00" })),

        "/ajax_api/getActivities" => ok(json!({
            "wall_online": { "id": "11", "pseudo": "Nora", "sexe1": "2", "date": "2026-10-01" },
            "wall_change": [],
            "wall_addPhoto": { "user_id": "12", "pseudo": "Paul", "jour": "2026-09-30" },
            "wall_birthday": false
        })),

        "/index_api/topmembers" | "/index_api/guest/get/visites" => ok(json!({
            "connected": 1,
            "nb_pages": "3",
            "result": [
                {
                    "id": "21",
                    "pseudo": "Ines",
                    "sexe1": "2",
                    "age": "29",
                    "zone_name": "Lyon",
                    "moyenne": "4.5",
                    "photos": "{\"sq_middle\": \"https://cdn.example.com/ines.jpg\"}"
                },
                { "pseudo": "no-id" }
            ]
        })),

        "/index_api/user" => ok(json!({
            "connected": 1,
            "result": {
                "id": "7",
                "pseudo": "anna",
                "prenom": "Anna",
                "age": "31",
                "sexe1": "2",
                "zone_name": "Paris",
                "email": "anna@example.com",
                "description": "  Likes hiking  ",
                "taille": "170",
                "photos": [
                    {
                        "url_big": "https://cdn.example.com/a-big.jpg",
                        "url_middle": "https://cdn.example.com/a-mid.jpg",
                        "url_small": "https://cdn.example.com/a-small.jpg"
                    }
                ]
            }
        })),

        "/index_api/user/modify/informations" | "/index_api/user/modify/description" => {
            ok(json!({ "accepted": 1 }))
        }

        "/index_api/gifts/catalog" => ok(json!({
            "connected": 1,
            "result": [
                { "id": "1", "nom": "Rose", "slug": "rose", "image": "https://cdn.example.com/rose.png", "prix": "5" },
                { "id": "2", "prix": "12" }
            ]
        })),

        "/index_api/gifts/inventory" => ok(json!({
            "connected": 1,
            "result": [{ "gift_id": "1", "nom": "Rose", "quantite": "3" }]
        })),

        "/index_api/gifts/history" => ok(json!({
            "connected": 1,
            "result": [
                { "id": "90", "gift_id": "1", "nom": "Rose", "destinataire_id": "42", "prix": "5", "date": "2026-10-02" },
                { "id": "91", "gift_id": "2", "nom": "Bear", "destinataire_id": "43", "prix": "12", "date": "2026-10-03" },
                { "id": "92", "gift_id": "1", "nom": "Rose", "destinataire_id": "44", "prix": "5", "date": "2026-10-04" }
            ]
        })),

        "/index_api/gifts/buy" => {
            if param("gift_id") == "999" {
                ok(json!({ "accepted": 0, "error": "Not enough coins" }))
            } else {
                ok(json!({ "accepted": 1, "spent": "5", "solde": "95" }))
            }
        }

        "/index_api/gifts/send" => ok(json!({ "accepted": 1, "restant": "2" })),

        "/index_api/match/discover" | "/index_api/match/list" => ok(json!({
            "connected": 1,
            "nb_pages": 4,
            "result": [
                { "id": "31", "pseudo": "Zoe", "sexe1": "2", "age": "27", "zone_name": "Nice", "photo": "https://cdn.example.com/zoe.jpg" }
            ]
        })),

        "/index_api/match/vote" => ok(json!({ "accepted": 1, "match": "1" })),

        "/index_api/credits/wallet" => ok(json!({
            "connected": 1,
            "solde": "120.5",
            "devise": "eur",
            "total_achat": "200",
            "total_depense": "79.5",
            "en_attente": "0",
            "transactions": [
                { "id": "1", "type": "PURCHASE", "motif": "Pack 10", "statut": "done", "montant": "10", "date": "2026-09-01" },
                { "id": "2", "type": "Spend", "statut": "pending", "montant": "-5" }
            ]
        })),

        "/index_api/credits/checkout" => ok(json!({
            "connected": 1,
            "accepted": 1,
            "token": "chk_123",
            "redirect_url": "https://pay.example.com/chk_123"
        })),

        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "Unknown endpoint" }))).into_response(),
    }
}

/// `Set-Cookie` headers of a response, as `name=value...` strings
pub fn set_cookies(res: &reqwest::Response) -> Vec<String> {
    res.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}
