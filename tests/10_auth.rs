mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn notes_require_authorization_header() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/notes", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert!(
        body.get("message").and_then(|m| m.as_str()).is_some(),
        "error body should carry a message: {}",
        body
    );

    Ok(())
}

#[tokio::test]
async fn notes_reject_garbage_token() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/notes", server.base_url))
        .bearer_auth("definitely-not-a-jwt")
        .json(&serde_json::json!({ "user": server.user_id, "title": "x", "text": "y" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn notes_reject_non_bearer_scheme() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/notes", server.base_url))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn health_is_public() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.get("status").and_then(|s| s.as_str()), Some("ok"));

    Ok(())
}
