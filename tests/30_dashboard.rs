mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

use common::SESSION;

#[tokio::test]
async fn activity_flattens_wall_blocks() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .get(server.url("/api/dashboard/activity"))
        .header("cookie", SESSION)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let items = body["items"].as_array().unwrap();

    // Empty-array and `false` blocks are skipped
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["action"], "con");
    assert_eq!(items[0]["username"], "Nora");
    assert_eq!(items[0]["gender"], "woman");
    assert_eq!(items[1]["action"], "add_tof");
    assert_eq!(items[1]["id"], 12);

    Ok(())
}

#[tokio::test]
async fn top_members_maps_gender_and_photos() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .get(server.url("/api/dashboard/top-members?gender=women&page=2&ageRange=25-35"))
        .header("cookie", SESSION)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 21);
    assert_eq!(items[0]["rating"], 4.5);
    assert_eq!(items[0]["photoUrl"], "https://cdn.example.com/ines.jpg");
    assert_eq!(body["page"], 2);
    assert_eq!(body["totalPages"], 3);

    let forwarded = server.last_call("/index_api/topmembers").unwrap();
    assert_eq!(forwarded["sex"], "woman");
    assert_eq!(forwarded["page"], "2");
    assert_eq!(forwarded["age_range"], "25-35");

    Ok(())
}

#[tokio::test]
async fn top_members_rejects_unknown_gender() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .get(server.url("/api/dashboard/top-members?gender=all"))
        .header("cookie", SESSION)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"]["message"], "Invalid gender query parameter");
    assert!(server.last_call("/index_api/topmembers").is_none());

    Ok(())
}

#[tokio::test]
async fn recent_visitors_validates_page() -> Result<()> {
    let server = common::spawn().await?;

    let res = server
        .client
        .get(server.url("/api/dashboard/recent-visitors?page=0"))
        .header("cookie", SESSION)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"]["message"], "Invalid page query parameter");

    let res = server
        .client
        .get(server.url("/api/dashboard/recent-visitors"))
        .header("cookie", SESSION)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!server.last_call("/index_api/guest/get/visites").unwrap().contains_key("page"));

    Ok(())
}
