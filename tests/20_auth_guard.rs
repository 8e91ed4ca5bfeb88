mod common;

use anyhow::Result;
use chrono::Utc;
use reqwest::StatusCode;
use serde_json::json;

use orgdesk_api::auth::{Claims, JwtKeys};
use orgdesk_api::database::models::{User, UserType};
use orgdesk_api::middleware::UNAUTHENTICATED_MESSAGE;

fn user(user_type: UserType) -> User {
    User::new(
        "guard@example.com".into(),
        "Guard".into(),
        "Test".into(),
        "not-a-real-hash".into(),
        None,
        user_type,
    )
}

fn keys() -> JwtKeys {
    JwtKeys::new(common::TEST_JWT_SECRET, 1).expect("secret is not empty")
}

async fn assert_unauthorized(res: reqwest::Response) -> Result<()> {
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status_code"], 401);
    assert_eq!(body["message"], UNAUTHENTICATED_MESSAGE);
    Ok(())
}

#[tokio::test]
async fn missing_token_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/users")).send().await?;
    assert_unauthorized(res).await?;

    let res = client
        .post(server.url("/help-center/topics"))
        .json(&json!({"title": "Title", "content": "Content"}))
        .send()
        .await?;
    assert_unauthorized(res).await
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = keys().issue(&user(UserType::SuperAdmin))?;

    let res = reqwest::Client::new()
        .get(server.url("/users"))
        .header("Authorization", format!("Basic {}", token))
        .send()
        .await?;
    assert_unauthorized(res).await
}

#[tokio::test]
async fn expired_token_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;
    let mut claims = Claims::for_user(&user(UserType::SuperAdmin), 1);
    claims.exp = Utc::now().timestamp() - 5;
    let token = keys().sign(&claims)?;

    let res = reqwest::Client::new()
        .get(server.url("/users"))
        .bearer_auth(token)
        .send()
        .await?;
    assert_unauthorized(res).await
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = JwtKeys::new("some-other-secret", 1)?.issue(&user(UserType::SuperAdmin))?;

    let res = reqwest::Client::new()
        .get(server.url("/users"))
        .bearer_auth(token)
        .send()
        .await?;
    assert_unauthorized(res).await
}
