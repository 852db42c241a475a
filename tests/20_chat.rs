mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{set_cookies, API_KEY, SESSION};

#[tokio::test]
async fn contacts_are_normalized() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .get(server.url("/api/chat/contacts"))
        .header("cookie", SESSION)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let contacts = body["contacts"].as_array().unwrap();

    // The entry with id 0 is dropped
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0]["id"], 42);
    assert_eq!(contacts[0]["unreadCount"], 2);
    assert_eq!(contacts[0]["onlineStatus"], "online");
    assert_eq!(contacts[0]["isFriend"], true);
    assert_eq!(contacts[0]["lastMessagePreview"], "See you soon");
    assert_eq!(contacts[1]["onlineStatus"], "recent");

    let forwarded = server.last_call("/ajax_api/load_contacts").unwrap();
    assert_eq!(forwarded["session_id"], "sess-1");
    assert_eq!(forwarded["api_key"], API_KEY);

    Ok(())
}

#[tokio::test]
async fn legacy_cookie_names_still_work() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .get(server.url("/api/chat/contacts"))
        .header("cookie", "fotochat_session_id=legacy-sess")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(server.last_call("/ajax_api/load_contacts").unwrap()["session_id"], "legacy-sess");

    Ok(())
}

#[tokio::test]
async fn missing_session_is_rejected_and_cookies_cleared() -> Result<()> {
    let server = common::spawn().await?;

    let res = server.client.get(server.url("/api/chat/contacts")).send().await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(set_cookies(&res).len(), 6);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
    assert!(server.last_call("/ajax_api/load_contacts").is_none());

    Ok(())
}

#[tokio::test]
async fn messages_fall_back_to_synthetic_ids() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .get(server.url("/api/chat/messages?contactId=42&contact=lena"))
        .header("cookie", SESSION)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages[0]["id"], 501);
    assert_eq!(messages[0]["senderId"], 42);
    assert_eq!(messages[1]["id"], "7-2026-10-01 10:01:00-1");

    let forwarded = server.last_call("/ajax_api/load_messages").unwrap();
    assert_eq!(forwarded["contact_id"], "42");
    assert_eq!(forwarded["contact"], "lena");
    assert_eq!(forwarded["api-key"], API_KEY);

    Ok(())
}

#[tokio::test]
async fn messages_require_a_contact_id() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .get(server.url("/api/chat/messages"))
        .header("cookie", SESSION)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(server.last_call("/ajax_api/load_messages").is_none());

    Ok(())
}

#[tokio::test]
async fn repeated_contact_id_uses_first_value() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .get(server.url("/api/chat/messages?contactId=42&contactId=99"))
        .header("cookie", SESSION)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.json::<Value>().await?["messages"].is_array());
    assert_eq!(server.last_call("/ajax_api/load_messages").unwrap()["contact_id"], "42");

    Ok(())
}

#[tokio::test]
async fn send_message_forwards_trimmed_text() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/chat/send"))
        .header("cookie", SESSION)
        .json(&json!({ "contactId": 42, "message": "  hello there  " }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "hello there");
    assert_eq!(server.last_call("/ajax_api/send_message").unwrap()["msg"], "hello there");

    Ok(())
}

#[tokio::test]
async fn send_message_reports_every_bad_field() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/chat/send"))
        .header("cookie", SESSION)
        .json(&json!({ "contactId": "42", "message": "   " }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"]["message"], "Invalid message payload");
    assert_eq!(body["error"]["fields"].as_array().unwrap().len(), 2);

    Ok(())
}

#[tokio::test]
async fn provider_failure_maps_to_bad_gateway() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .get(server.url("/api/chat/contacts"))
        .header("cookie", "dating_session_id=broken")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"]["message"], "Provider database down");

    Ok(())
}

#[tokio::test]
async fn non_json_provider_body_is_bad_gateway() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .get(server.url("/api/chat/contacts"))
        .header("cookie", "dating_session_id=garbage")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"]["message"], "Chat upstream returned invalid JSON");

    Ok(())
}
