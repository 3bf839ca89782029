use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::{sync::OnceLock, time::Duration};
use tracing::debug;

use crate::request::{Method, RawResponse, TransportRequest};

use super::TransportClient;

static SHARED: OnceLock<HttpTransport> = OnceLock::new();

/// Production transport backed by `reqwest`.
///
/// Non-2xx responses are reported as failures carrying the status and the
/// start of the body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// Use a preconfigured client (proxies, TLS roots, default headers).
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http })
    }

    /// Process-wide default transport. Clones share one connection pool.
    pub fn shared() -> Self {
        SHARED.get_or_init(Self::new).clone()
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransportClient for HttpTransport {
    async fn execute(&self, request: &TransportRequest) -> Result<RawResponse> {
        let url = request.url()?;
        let target = url.to_string();

        debug!(method = %request.method, url = %target, "sending request");

        let mut builder = self.http.request(reqwest_method(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let res = builder
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to {target}", request.method))?;

        let status = res.status();
        let headers = res
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = res
            .bytes()
            .await
            .with_context(|| format!("Failed to read response body from {target}"))?
            .to_vec();

        debug!(url = %target, status = status.as_u16(), bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(anyhow!(
                "Request to {target} failed with status {status}: {}",
                truncate_body(&String::from_utf8_lossy(&body)),
            ));
        }

        Ok(RawResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}
