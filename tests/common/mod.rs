use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crm_view_api::auth::issue_token;
use crm_view_api::config::SecurityConfig;
use reqwest::StatusCode;

const JWT_SECRET: &str = "integration-test-secret";

pub const USER: &str = "ada@example.com";

/// One running server process, stopped when the guard is dropped
pub struct TestServer {
    #[allow(dead_code)]
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Serve the fixture store so no database is needed
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_crm-view-api"));
        cmd.args(["serve", "--port", &port.to_string(), "--fixtures", "tests/fixtures/crm.json"])
            .env("APP_ENV", "development")
            .env("JWT_SECRET", JWT_SECRET)
            .env("CONTROLLERS_FILE", "config/controllers.yaml")
            .env("LIST_MAX_PAGE_LENGTH", "50")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Start a fresh server for one test; it is killed when the returned guard drops
pub async fn spawn_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Bearer token accepted by the spawned server
#[allow(dead_code)]
pub fn token_for(user: &str) -> Result<String> {
    let security = SecurityConfig {
        enable_cors: false,
        cors_origins: vec![],
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiry_hours: 1,
    };
    Ok(issue_token(user, &security)?)
}

/// Client that sends the session user's bearer token on every request
#[allow(dead_code)]
pub fn authed_client() -> Result<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();
    let value = format!("Bearer {}", token_for(USER)?);
    headers.insert(reqwest::header::AUTHORIZATION, value.parse()?);
    Ok(reqwest::Client::builder().default_headers(headers).build()?)
}
