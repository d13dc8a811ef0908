mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn public_routes_need_no_token() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let root = client.get(format!("{}/", server.base_url)).send().await?;
    assert_eq!(root.status(), StatusCode::OK);
    let payload = root.json::<serde_json::Value>().await?;
    assert_eq!(payload["success"], true);

    let health = client.get(format!("{}/health", server.base_url)).send().await?;
    assert_eq!(health.status(), StatusCode::OK);
    let payload = health.json::<serde_json::Value>().await?;
    assert_eq!(payload["data"]["status"], "ok");

    Ok(())
}

#[tokio::test]
async fn doc_routes_reject_missing_token() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/doc/CRM Lead/sort_options", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["success"], false);
    assert_eq!(payload["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn doc_routes_reject_foreign_token() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    // Signed with a different secret than the server's
    let security = crm_view_api::config::SecurityConfig {
        enable_cors: false,
        cors_origins: vec![],
        jwt_secret: "someone-else".to_string(),
        jwt_expiry_hours: 1,
    };
    let token = crm_view_api::auth::issue_token(common::USER, &security)?;

    let res = client
        .post(format!("{}/api/doc/CRM Lead/list", server.base_url))
        .bearer_auth(token)
        .json(&serde_json::json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn server_stops_when_guard_drops() -> Result<()> {
    let server = common::spawn_server().await?;
    let health_url = format!("{}/health", server.base_url);
    let client = reqwest::Client::new();
    assert_eq!(client.get(&health_url).send().await?.status(), StatusCode::OK);

    drop(server);

    // The process is killed and reaped, so nothing listens on the port anymore
    assert!(client.get(&health_url).send().await.is_err());
    Ok(())
}
