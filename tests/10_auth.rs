mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{set_cookies, API_KEY};

#[tokio::test]
async fn sign_in_sets_session_cookies() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/auth/sign-in"))
        .header("user-agent", "integration-test")
        .json(&json!({ "username": "  anna ", "password": "secret", "rememberMe": true }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let cookies = set_cookies(&res);
    assert!(cookies.iter().any(|c| c.starts_with("dating_session_id=sess-1")), "{cookies:?}");
    assert!(cookies.iter().any(|c| c.starts_with("dating_user_id=7")));
    assert!(cookies.iter().any(|c| c.starts_with("dating_token_login=tok-9")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly") && c.contains("Max-Age=")));

    let body = res.json::<Value>().await?;
    assert_eq!(body["connected"], 1);
    assert_eq!(body["sessionId"], "sess-1");
    assert_eq!(body["userId"], "7");

    let forwarded = server.last_call("/index_api/login").expect("login call");
    assert_eq!(forwarded["login"], "anna");
    assert_eq!(forwarded["api_key"], API_KEY);
    assert_eq!(forwarded["rememberme"], "1");
    assert_eq!(forwarded["browser"], "integration-test");

    Ok(())
}

#[tokio::test]
async fn sign_in_without_remember_me_uses_browser_session_cookies() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/auth/sign-in"))
        .json(&json!({ "username": "anna", "password": "secret" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let cookies = set_cookies(&res);
    assert!(!cookies.is_empty());
    assert!(cookies.iter().all(|c| !c.contains("Max-Age")), "{cookies:?}");
    assert!(!server.last_call("/index_api/login").unwrap().contains_key("rememberme"));

    Ok(())
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/auth/sign-in"))
        .json(&json!({ "username": "anna", "password": "nope" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&res).is_empty());
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(body["error"]["message"], "Invalid credentials");

    Ok(())
}

#[tokio::test]
async fn sign_in_validation_never_reaches_provider() -> Result<()> {
    let server = common::spawn().await?;
    let before = server.call_count();

    let res = server
        .client
        .post(server.url("/api/auth/sign-in"))
        .json(&json!({ "username": "   " }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"]["message"], "Invalid sign-in payload");
    let fields: Vec<&str> = body["error"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["username", "password"]);
    assert_eq!(server.call_count(), before);

    Ok(())
}

#[tokio::test]
async fn sign_in_only_accepts_post() -> Result<()> {
    let server = common::spawn().await?;

    let res = server.client.get(server.url("/api/auth/sign-in")).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.json::<Value>().await?["error"]["message"], "Method not allowed");

    Ok(())
}

#[tokio::test]
async fn sign_up_creates_session() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/auth/sign-up"))
        .json(&json!({
            "username": "newbie",
            "password": "pw",
            "email": "newbie@example.com",
            "gender": "woman",
            "lookingFor": "man",
            "dateOfBirth": "1995-04-12",
            "city": "75056"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let cookies = set_cookies(&res);
    assert!(cookies.iter().any(|c| c.starts_with("dating_session_id=sess-new")));
    let body = res.json::<Value>().await?;
    assert_eq!(body["accepted"], 1);
    assert_eq!(body["userId"], "81");

    let forwarded = server.last_call("/index_api/subscribe").expect("subscribe call");
    assert_eq!(forwarded["mail"], "newbie@example.com");
    assert_eq!(forwarded["city"], "75056");
    assert_eq!(forwarded["birthday_date"], "1995-04-12");

    Ok(())
}

#[tokio::test]
async fn sign_up_rejection_surfaces_provider_message() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/auth/sign-up"))
        .json(&json!({
            "username": "taken",
            "password": "pw",
            "email": "taken@example.com",
            "gender": "man",
            "lookingFor": "women",
            "dateOfBirth": "1990-01-01"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Username already taken");

    Ok(())
}

#[tokio::test]
async fn sign_up_validates_fields() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/auth/sign-up"))
        .json(&json!({
            "username": "x",
            "password": "pw",
            "email": "not-an-email",
            "gender": "robot",
            "lookingFor": "man",
            "dateOfBirth": "1990-01-01",
            "city": "Paris"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    let fields: Vec<&str> = body["error"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["field"].as_str())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"gender"));
    assert!(fields.contains(&"city"));
    assert!(server.last_call("/index_api/subscribe").is_none());

    Ok(())
}

#[tokio::test]
async fn sign_out_clears_cookies() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/auth/sign-out"))
        .header("cookie", common::SESSION)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let cookies = set_cookies(&res);
    assert_eq!(cookies.len(), 6);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    assert_eq!(res.json::<Value>().await?, json!({ "success": true }));

    Ok(())
}
