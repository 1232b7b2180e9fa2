//! Test helpers for integration tests
//!
//! A [`TestServer`] targets `TEST_SERVER_URL` when set. Otherwise it boots the
//! application in-process when `DATABASE_URL` and `JWT_SECRET` are available.
//! With neither, tests skip.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use social_api::{create_app, create_app_state};
use social_common::AppConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Prefix of every REST route
pub const API: &str = "/api/v1";

/// A reachable server plus an HTTP client
pub struct TestServer {
    base_url: String,
    pub client: Client,
    _handle: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Connect to or start a server; `None` when the environment has neither
    pub async fn start() -> Result<Option<Self>> {
        dotenvy::dotenv().ok();

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        if let Ok(url) = env::var("TEST_SERVER_URL") {
            let base_url = url.trim_end_matches('/').to_string();
            if client.get(format!("{base_url}/health")).send().await.is_err() {
                eprintln!("Skipping test: server at {base_url} is not reachable");
                return Ok(None);
            }
            return Ok(Some(Self {
                base_url,
                client,
                _handle: None,
            }));
        }

        if env::var("DATABASE_URL").is_err() || env::var("JWT_SECRET").is_err() {
            eprintln!("Skipping test: set TEST_SERVER_URL, or DATABASE_URL and JWT_SECRET");
            return Ok(None);
        }

        Self::spawn(test_config()?, client).await.map(Some)
    }

    async fn spawn(config: AppConfig, client: Client) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            client,
            _handle: Some(handle),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `ws://` URL of the push gateway
    pub fn gateway_url(&self) -> String {
        format!("{}/gateway", self.base_url.replacen("http", "ws", 1))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API}{path}", self.base_url)
    }

    fn authed(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET a path relative to the server root (not the API prefix)
    pub async fn get_root(&self, path: &str) -> Result<Response> {
        let url = format!("{}{path}", self.base_url);
        Ok(self.client.get(url).send().await?)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let builder = self.client.get(self.url(path));
        Ok(Self::authed(builder, token).send().await?)
    }

    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &T,
    ) -> Result<Response> {
        let builder = self.client.post(self.url(path)).json(body);
        Ok(Self::authed(builder, token).send().await?)
    }

    /// POST without a body
    pub async fn post_empty(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).bearer_auth(token).send().await?)
    }

    pub async fn patch<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        let builder = self.client.patch(self.url(path)).bearer_auth(token).json(body);
        Ok(builder.send().await?)
    }

    /// PATCH without a body
    pub async fn patch_empty(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.patch(self.url(path)).bearer_auth(token).send().await?)
    }

    pub async fn put(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.put(self.url(path)).bearer_auth(token).send().await?)
    }

    pub async fn delete(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).bearer_auth(token).send().await?)
    }
}

/// Configuration for an in-process server
///
/// Rate limits are raised so parallel tests do not throttle each other.
pub fn test_config() -> Result<AppConfig> {
    let config = AppConfig::from_lookup(|key| match key {
        "RATE_LIMIT_PER_SECOND" => Some("1000".to_string()),
        "RATE_LIMIT_BURST" => Some("1000".to_string()),
        _ => env::var(key).ok(),
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: crate::fixtures::ErrorResponse = assert_json(response, expected_status).await?;
    Ok(body.error.code)
}
